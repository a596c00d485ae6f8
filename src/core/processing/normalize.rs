use ndarray::{Array2, Array3, ArrayBase, Axis, Data, Ix3, Zip};
use tracing::debug;

use crate::error::{Error, Result};

/// Standardize each slice of a stack from its own background statistics.
///
/// For every slice along the leading axis, the mean and population standard
/// deviation are computed over the pixels at or beyond `radius` from the
/// slice's geometric center, then `(v - mean) / std` is applied to the whole
/// slice. `radius` defaults to half the smaller spatial dimension. The output
/// is always `f64`, regardless of the input element type.
///
/// Errors with [`Error::DegenerateRegion`] when the radius leaves no pixels
/// to measure or the background has zero variance.
pub fn normalize<A, S>(stack: &ArrayBase<S, Ix3>, radius: Option<f64>) -> Result<Array3<f64>>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
{
    let (n, rows, cols) = stack.dim();
    let radius = radius.unwrap_or(rows.min(cols) as f64 / 2.0);
    if !(radius > 0.0) {
        return Err(Error::InvalidArgument {
            arg: "radius",
            value: radius.to_string(),
        });
    }

    // One mask shared by every slice.
    let mask = background_mask(rows, cols, radius);
    let background = mask.iter().filter(|&&m| m).count();
    if background == 0 {
        return Err(Error::DegenerateRegion {
            detail: format!("no pixels at or beyond radius {radius} in a {rows}x{cols} slice"),
        });
    }
    debug!(
        "Normalizing {} slice(s) of {}x{} from {} background pixel(s)",
        n, rows, cols, background
    );

    let mut normed = Array3::<f64>::zeros((n, rows, cols));
    for (i, plane) in stack.axis_iter(Axis(0)).enumerate() {
        // Welford's online algorithm over the background pixels.
        let mut count = 0u64;
        let mut mean = 0.0_f64;
        let mut m2 = 0.0_f64;
        Zip::from(&mask).and(&plane).for_each(|&masked, &v| {
            if masked {
                count += 1;
                let v: f64 = v.into();
                let delta = v - mean;
                mean += delta / count as f64;
                m2 += delta * (v - mean);
            }
        });
        let std = (m2 / count as f64).sqrt();
        if std == 0.0 {
            return Err(Error::DegenerateRegion {
                detail: format!("zero variance in the background of slice {i}"),
            });
        }
        normed
            .index_axis_mut(Axis(0), i)
            .assign(&plane.mapv(|v| (v.into() - mean) / std));
    }
    Ok(normed)
}

/// Pixels at or beyond `radius` from the plane center `(rows/2, cols/2)`.
fn background_mask(rows: usize, cols: usize, radius: f64) -> Array2<bool> {
    let cy = rows as f64 / 2.0;
    let cx = cols as f64 / 2.0;
    Array2::from_shape_fn((rows, cols), |(y, x)| {
        let dy = cy - y as f64;
        let dx = cx - x as f64;
        (dy * dy + dx * dx).sqrt() >= radius
    })
}
