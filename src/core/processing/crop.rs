use ndarray::{Array, ArrayBase, Data, Dimension, Slice};
use tracing::debug;

use crate::error::{Error, Result};

/// Extract the centered `size x size` sub-array from the trailing two axes.
///
/// Leading axes pass through untouched, so a `(n, rows, cols)` stack crops to
/// `(n, size, size)`. Offsets use floor division: when `rows - size` is odd,
/// the extra row stays on the trailing side. `size` equal to both spatial
/// dimensions returns an unchanged copy.
pub fn crop<A, S, D>(stack: &ArrayBase<S, D>, size: usize) -> Result<Array<A, D>>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    let ndim = stack.ndim();
    if ndim < 2 {
        return Err(Error::InvalidArgument {
            arg: "stack",
            value: format!("{ndim} dimensions, need at least 2"),
        });
    }
    if size == 0 {
        return Err(Error::ZeroSize { size });
    }
    let rows = stack.shape()[ndim - 2];
    let cols = stack.shape()[ndim - 1];
    if size > rows || size > cols {
        return Err(Error::InvalidShape {
            target_rows: size,
            target_cols: size,
            rows,
            cols,
        });
    }

    debug!("Cropping {}x{} -> centered {}x{}", rows, cols, size, size);

    let start_row = (rows - size) / 2;
    let start_col = (cols - size) / 2;
    let view = stack.slice_each_axis(|ax| {
        if ax.axis.index() == ndim - 2 {
            Slice::from(start_row..start_row + size)
        } else if ax.axis.index() == ndim - 1 {
            Slice::from(start_col..start_col + size)
        } else {
            Slice::from(..)
        }
    });
    Ok(view.to_owned())
}
