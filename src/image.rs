//! Image input and the frames built from it.

mod data;
mod frame;

pub use data::{ImageData, PixelFormat};
pub use frame::{FrameBuffer, build_frame};
