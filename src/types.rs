//! Shared types used across stackprep.
//! Currently just `DownsampleTarget`, the typed way to request an output
//! resolution for frequency-domain downsampling.

use crate::error::{Error, Result};

/// Target resolution for [`crate::downsample`].
///
/// `Factor` divides both spatial dimensions by the given value (truncating
/// toward zero, like integer division). `Shape` requests exact output
/// dimensions and takes precedence over any factor-derived size.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum DownsampleTarget {
    Factor(f64),
    Shape { rows: usize, cols: usize },
}

impl DownsampleTarget {
    /// Resolve to concrete `(rows, cols)` for an input of the given size.
    pub(crate) fn resolve(self, rows: usize, cols: usize) -> Result<(usize, usize)> {
        match self {
            DownsampleTarget::Factor(f) if f > 0.0 && f.is_finite() => {
                Ok(((rows as f64 / f) as usize, (cols as f64 / f) as usize))
            }
            DownsampleTarget::Factor(f) => Err(Error::InvalidArgument {
                arg: "factor",
                value: f.to_string(),
            }),
            DownsampleTarget::Shape { rows, cols } => Ok((rows, cols)),
        }
    }
}
