use ndarray::{Array2, Array3, ArrayBase, Axis, Data, Ix2, Ix3, s};
use num_complex::Complex;
use num_traits::{Float, NumCast};
use tracing::debug;

use crate::core::processing::fft;
use crate::error::{Error, Result};
use crate::types::DownsampleTarget;

/// Resample a plane to a smaller resolution by spectral truncation.
///
/// The input's real half-spectrum is cut down to the lowest frequencies that
/// fit the target shape, rescaled to keep the total signal energy, and
/// inverted back into the spatial domain. Low-frequency content survives
/// exactly; everything above the new Nyquist limit is discarded. The result
/// keeps the input element type.
///
/// Upsampling is not supported: a target larger than the input on either axis
/// is [`Error::InvalidShape`].
pub fn downsample<A, S>(x: &ArrayBase<S, Ix2>, target: DownsampleTarget) -> Result<Array2<A>>
where
    A: Float,
    S: Data<Elem = A>,
{
    let (rows, cols) = x.dim();
    let (target_rows, target_cols) = target.resolve(rows, cols)?;
    validate_target(target_rows, target_cols, rows, cols)?;
    debug!(
        "Downsampling {}x{} -> {}x{}",
        rows, cols, target_rows, target_cols
    );

    let plane = x.mapv(|v| v.to_f64().unwrap_or(f64::NAN));
    let out = downsample_plane(&plane, target_rows, target_cols);
    Ok(out.mapv(|v| NumCast::from(v).unwrap_or_else(A::nan)))
}

/// [`downsample`] applied independently to every slice of a stack.
///
/// All slices share the trailing spatial shape, so the target is resolved
/// once and reused.
pub fn downsample_stack<A, S>(
    stack: &ArrayBase<S, Ix3>,
    target: DownsampleTarget,
) -> Result<Array3<A>>
where
    A: Float,
    S: Data<Elem = A>,
{
    let (n, rows, cols) = stack.dim();
    let (target_rows, target_cols) = target.resolve(rows, cols)?;
    validate_target(target_rows, target_cols, rows, cols)?;
    debug!(
        "Downsampling {} slice(s) of {}x{} -> {}x{}",
        n, rows, cols, target_rows, target_cols
    );

    let mut out = Array3::<A>::zeros((n, target_rows, target_cols));
    for (plane, mut dst) in stack.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
        let plane = plane.mapv(|v| v.to_f64().unwrap_or(f64::NAN));
        let resampled = downsample_plane(&plane, target_rows, target_cols);
        dst.assign(&resampled.mapv(|v| NumCast::from(v).unwrap_or_else(A::nan)));
    }
    Ok(out)
}

fn validate_target(target_rows: usize, target_cols: usize, rows: usize, cols: usize) -> Result<()> {
    if target_rows == 0 || target_cols == 0 {
        return Err(Error::ZeroSize {
            size: target_rows.min(target_cols),
        });
    }
    if target_rows > rows || target_cols > cols {
        return Err(Error::InvalidShape {
            target_rows,
            target_cols,
            rows,
            cols,
        });
    }
    Ok(())
}

fn downsample_plane(plane: &Array2<f64>, target_rows: usize, target_cols: usize) -> Array2<f64> {
    let (rows, cols) = plane.dim();
    let spectrum = fft::rfft2(&plane.view());

    // Keep the lowest frequencies: non-negative row frequencies from the top
    // of the spectrum, the highest negative ones from the bottom, stacked in
    // that order. The wrap-around block takes the remaining
    // `target_rows - target_rows/2` rows, so odd targets keep one more
    // negative-frequency row than positive and the stacked spectrum has
    // exactly `target_rows` rows.
    let split = target_rows / 2;
    let half = target_cols / 2 + 1;
    let top = spectrum.slice(s![..split, ..half]);
    let wrap = spectrum.slice(s![-((target_rows - split) as isize).., ..half]);
    let mut truncated =
        Array2::<Complex<f64>>::zeros((top.nrows() + wrap.nrows(), half));
    truncated.slice_mut(s![..top.nrows(), ..]).assign(&top);
    truncated.slice_mut(s![top.nrows().., ..]).assign(&wrap);

    // Forward/inverse transforms at different sizes normalize differently;
    // this keeps the mean intensity of the image unchanged.
    let scale = (target_rows * target_cols) as f64 / (rows * cols) as f64;
    truncated.mapv_inplace(|c| c * scale);

    fft::irfft2(&truncated.view(), (target_rows, target_cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, Array3};
    use std::f64::consts::PI;

    #[test]
    fn constant_image_keeps_its_value() {
        let x = Array2::from_elem((8, 8), 3.0);
        let out = downsample(&x, DownsampleTarget::Factor(2.0)).unwrap();
        assert_eq!(out.dim(), (4, 4));
        for &v in out.iter() {
            assert_abs_diff_eq!(v, 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn explicit_shape_overrides_input_dimensions() {
        let x = Array2::from_elem((16, 12), 1.0);
        let out = downsample(&x, DownsampleTarget::Shape { rows: 5, cols: 7 }).unwrap();
        assert_eq!(out.dim(), (5, 7));
        for &v in out.iter() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn low_frequency_cosine_survives_with_its_amplitude() {
        // One full period along the rows fits under the new Nyquist limit,
        // so the 16x16 wave must reappear as the same wave on the 8x8 grid.
        let x = Array2::from_shape_fn((16, 16), |(i, _)| (2.0 * PI * i as f64 / 16.0).cos());
        let out = downsample(&x, DownsampleTarget::Factor(2.0)).unwrap();
        for ((i, _), &v) in out.indexed_iter() {
            let expected = (2.0 * PI * i as f64 / 8.0).cos();
            assert_abs_diff_eq!(v, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn element_type_is_preserved() {
        let x = Array2::<f32>::from_elem((8, 8), 2.0);
        let out: Array2<f32> = downsample(&x, DownsampleTarget::Factor(2.0)).unwrap();
        for &v in out.iter() {
            assert_abs_diff_eq!(v, 2.0_f32, epsilon = 1e-5);
        }
    }

    #[test]
    fn odd_target_shapes_are_supported() {
        let x = Array2::from_elem((9, 9), 5.0);
        let out = downsample(&x, DownsampleTarget::Shape { rows: 3, cols: 5 }).unwrap();
        assert_eq!(out.dim(), (3, 5));
        for &v in out.iter() {
            assert_abs_diff_eq!(v, 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn odd_target_keeps_the_extra_negative_frequency_row() {
        // A pure sine along the rows splits into one positive- and one
        // negative-frequency coefficient. Resampling 6 rows to 3 keeps only
        // the negative one (the wrap-around block holds 2 rows, the top
        // block 1), so the wave comes back at half amplitude with its sign
        // intact. A wrap-around block that is one row short instead drops
        // the kept coefficient into the positive-frequency bin and flips
        // the sign.
        let x = Array2::from_shape_fn((6, 4), |(i, _)| (2.0 * PI * i as f64 / 6.0).sin());
        let out = downsample(&x, DownsampleTarget::Shape { rows: 3, cols: 4 }).unwrap();
        assert_eq!(out.dim(), (3, 4));
        for ((i, _), &v) in out.indexed_iter() {
            let expected = 0.5 * (2.0 * PI * i as f64 / 3.0).sin();
            assert_abs_diff_eq!(v, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_row_target_uses_the_last_spectrum_row() {
        // With one target row the top block is empty and the wrap-around
        // block is exactly the last spectrum row, never the whole spectrum.
        // For the ramp below that row is 16*S(3) at the DC column, with
        // S(3) = sum(n * exp(2*pi*i*n/4)) = -2 - 2i; after the 1/4 energy
        // rescale and the inverse transform every output pixel is -2.
        let x = Array2::from_shape_fn((4, 4), |(i, j)| (i * 4 + j) as f64);
        let out = downsample(&x, DownsampleTarget::Shape { rows: 1, cols: 4 }).unwrap();
        assert_eq!(out.dim(), (1, 4));
        for &v in out.iter() {
            assert_abs_diff_eq!(v, -2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn stack_slices_are_independent() {
        let x = Array3::from_shape_fn((3, 8, 8), |(n, _, _)| n as f64 + 1.0);
        let out = downsample_stack(&x, DownsampleTarget::Factor(2.0)).unwrap();
        assert_eq!(out.dim(), (3, 4, 4));
        for (n, plane) in out.axis_iter(Axis(0)).enumerate() {
            for &v in plane.iter() {
                assert_abs_diff_eq!(v, n as f64 + 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn upsampling_is_rejected() {
        let x = Array2::<f64>::zeros((4, 4));
        let res = downsample(&x, DownsampleTarget::Shape { rows: 8, cols: 4 });
        assert!(matches!(res, Err(Error::InvalidShape { .. })));
    }

    #[test]
    fn zero_target_is_rejected() {
        let x = Array2::<f64>::zeros((4, 4));
        let res = downsample(&x, DownsampleTarget::Shape { rows: 0, cols: 4 });
        assert!(matches!(res, Err(Error::ZeroSize { .. })));
    }
}
