#![doc = r#"
stackprep — numeric preprocessing for image stacks.

This crate provides three independent, stateless transforms on 2D planes and
3D stacks of pixel data, as used ahead of analysis in scientific imaging
pipelines:

- [`downsample`] / [`downsample_stack`] — reduce spatial resolution by
  truncating the image's real-FFT spectrum to the lowest frequencies and
  rescaling so the total signal energy is preserved.
- [`crop`] — extract a centered square region from the trailing two axes,
  leaving any leading axes untouched.
- [`normalize`] — standardize each slice of a stack to zero mean and unit
  variance, with the statistics taken only from pixels at or beyond a radius
  from the slice center.

All arrays are `ndarray` types; inputs are never mutated.

Quick start
-----------
```rust
use ndarray::{Array2, Array3};
use stackprep::{DownsampleTarget, crop, downsample, normalize};

fn main() -> stackprep::Result<()> {
    let image = Array2::<f64>::from_elem((128, 128), 3.0);

    // Halve the resolution in the frequency domain.
    let small = downsample(&image, DownsampleTarget::Factor(2.0))?;
    assert_eq!(small.dim(), (64, 64));

    // Centered 32x32 window.
    let window = crop(&small, 32)?;
    assert_eq!(window.dim(), (32, 32));

    let stack = Array3::<f64>::from_shape_fn((4, 64, 64), |(n, i, j)| {
        (n + i * j) as f64
    });
    // Zero mean / unit variance per slice, measured outside the default
    // radius of half the smaller spatial dimension.
    let normed = normalize(&stack, None)?;
    assert_eq!(normed.dim(), stack.dim());
    Ok(())
}
```

Error handling
--------------
All public functions return [`Result`]; match on [`Error`] for the specific
condition. Bad parameters (oversized crop or downsample targets, zero sizes,
non-positive factors or radii) are [`Error::InvalidShape`],
[`Error::ZeroSize`], or [`Error::InvalidArgument`]; a normalization region
with nothing to measure is [`Error::DegenerateRegion`]. There are no
retryable failures.

Numeric conventions
-------------------
`downsample` keeps the input element type (`f32` in, `f32` out) and computes
internally in `f64`. `normalize` accepts any element convertible to `f64`
and always returns `f64`; its standard deviation is the population form
(divide by count, not count minus one). `crop` copies elements of any type.
"#]

pub mod core;
pub mod error;
pub mod types;

// Curated public API surface
pub use crate::core::processing::{crop, downsample, downsample_stack, normalize};
pub use error::{Error, Result};
pub use types::DownsampleTarget;
