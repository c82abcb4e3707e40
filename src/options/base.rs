//! Model loading and runtime options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Hardware delegate used to run the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delegate {
    Cpu,
    Gpu,
    EdgeTpu,
}

/// Caller-facing model and runtime options.
///
/// Every field is optional; the engine applies its own default for anything
/// left unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseOptions {
    /// Path to the model file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<PathBuf>,
    /// Model bytes already loaded in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content: Option<Vec<u8>>,
    /// Number of CPU threads the engine may use (`-1` lets it decide).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_threads: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Delegate>,
}

impl BaseOptions {
    /// Options that load the model from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            file_name: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Options that load the model from in-memory bytes.
    pub fn from_content(content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_num_threads(mut self, num_threads: i32) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_delegate(mut self, delegate: Delegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Convert into the engine's base option representation.
    ///
    /// No validation happens here: an empty model source is handed to the
    /// engine as-is so that it can report the problem itself.
    pub fn to_engine_options(&self) -> EngineBaseOptions {
        EngineBaseOptions {
            model_file: ExternalFile {
                file_name: self.file_name.clone(),
                file_content: self.file_content.clone(),
            },
            compute: ComputeSettings {
                num_threads: self.num_threads,
                delegate: self.delegate,
            },
        }
    }
}

/// Engine-facing model source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalFile {
    pub file_name: Option<PathBuf>,
    pub file_content: Option<Vec<u8>>,
}

impl ExternalFile {
    /// Whether neither a non-empty path nor any content was provided.
    pub fn is_unspecified(&self) -> bool {
        let has_name = self
            .file_name
            .as_ref()
            .is_some_and(|name| !name.as_os_str().is_empty());
        let has_content = self.file_content.as_ref().is_some_and(|c| !c.is_empty());
        !has_name && !has_content
    }
}

/// Engine-facing compute settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputeSettings {
    pub num_threads: Option<i32>,
    pub delegate: Option<Delegate>,
}

/// Engine-facing base options, produced by [`BaseOptions::to_engine_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineBaseOptions {
    pub model_file: ExternalFile,
    pub compute: ComputeSettings,
}
