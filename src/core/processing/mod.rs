pub mod crop;
pub mod downsample;
pub mod fft;
pub mod normalize;

pub use crop::crop;
pub use downsample::{downsample, downsample_stack};
pub use normalize::normalize;
