//! Real-input 2D Fourier transforms with numpy `rfft2`/`irfft2` conventions.
//!
//! The forward transform stores only the non-redundant half-spectrum along the
//! column (width) axis: `cols/2 + 1` complex coefficients per row, full length
//! along the row (height) axis. The inverse takes an explicit output shape and
//! truncates or zero-pads the spectrum to fit it, reconstructing the redundant
//! half of each row from Hermitian symmetry.
//!
//! Neither direction normalizes on its own; the inverse applies the combined
//! `1 / (rows * cols)` factor so that a forward/inverse round trip at the same
//! shape is the identity.

use ndarray::{Array2, ArrayView2, s};
use num_complex::Complex;
use rustfft::FftPlanner;

/// Forward real-input 2D DFT over a `(rows, cols)` plane.
///
/// Returns the `(rows, cols/2 + 1)` complex half-spectrum.
pub fn rfft2(x: &ArrayView2<'_, f64>) -> Array2<Complex<f64>> {
    let (rows, cols) = x.dim();
    let half = cols / 2 + 1;
    let mut planner = FftPlanner::new();

    // FFT each row of the real input, keeping only the non-redundant half.
    let fft_cols = planner.plan_fft_forward(cols);
    let mut scratch = vec![Complex::default(); fft_cols.get_inplace_scratch_len()];
    let mut row_buf = vec![Complex::default(); cols];
    let mut spectrum = Array2::<Complex<f64>>::zeros((rows, half));
    for (i, row) in x.rows().into_iter().enumerate() {
        for (b, &v) in row_buf.iter_mut().zip(row.iter()) {
            *b = Complex::new(v, 0.0);
        }
        fft_cols.process_with_scratch(&mut row_buf, &mut scratch);
        for (out, &b) in spectrum.row_mut(i).iter_mut().zip(row_buf[..half].iter()) {
            *out = b;
        }
    }

    // Full-length FFT down each retained column.
    let fft_rows = planner.plan_fft_forward(rows);
    scratch.resize(fft_rows.get_inplace_scratch_len(), Complex::default());
    let mut col_buf = vec![Complex::default(); rows];
    for mut col in spectrum.columns_mut() {
        for (b, &v) in col_buf.iter_mut().zip(col.iter()) {
            *b = v;
        }
        fft_rows.process_with_scratch(&mut col_buf, &mut scratch);
        for (out, &b) in col.iter_mut().zip(col_buf.iter()) {
            *out = b;
        }
    }

    spectrum
}

/// Inverse real-output 2D DFT producing a plane of exactly `shape`.
///
/// The spectrum is truncated or zero-padded to `(rows, cols/2 + 1)` before the
/// inverse transforms run, matching `numpy.fft.irfft2(spectrum, s=shape)`.
pub fn irfft2(spectrum: &ArrayView2<'_, Complex<f64>>, shape: (usize, usize)) -> Array2<f64> {
    let (rows, cols) = shape;
    let half = cols / 2 + 1;
    let (in_rows, in_cols) = spectrum.dim();

    // Fit the spectrum to the requested output shape.
    let mut work = Array2::<Complex<f64>>::zeros((rows, half));
    let copy_rows = in_rows.min(rows);
    let copy_cols = in_cols.min(half);
    work.slice_mut(s![..copy_rows, ..copy_cols])
        .assign(&spectrum.slice(s![..copy_rows, ..copy_cols]));

    // Inverse FFT down each column.
    let mut planner = FftPlanner::new();
    let ifft_rows = planner.plan_fft_inverse(rows);
    let mut scratch = vec![Complex::default(); ifft_rows.get_inplace_scratch_len()];
    let mut col_buf = vec![Complex::default(); rows];
    for mut col in work.columns_mut() {
        for (b, &v) in col_buf.iter_mut().zip(col.iter()) {
            *b = v;
        }
        ifft_rows.process_with_scratch(&mut col_buf, &mut scratch);
        for (out, &b) in col.iter_mut().zip(col_buf.iter()) {
            *out = b;
        }
    }

    // Rebuild each full row from Hermitian symmetry, inverse FFT, keep the
    // real part. Imaginary residue in the DC/Nyquist bins only ever reaches
    // the imaginary part of the output, so dropping it matches numpy.
    let ifft_cols = planner.plan_fft_inverse(cols);
    scratch.resize(ifft_cols.get_inplace_scratch_len(), Complex::default());
    let mut row_buf = vec![Complex::default(); cols];
    let norm = 1.0 / (rows as f64 * cols as f64);
    let mut out = Array2::<f64>::zeros((rows, cols));
    for (i, row) in work.rows().into_iter().enumerate() {
        for (b, &v) in row_buf[..half].iter_mut().zip(row.iter()) {
            *b = v;
        }
        for k in half..cols {
            row_buf[k] = row_buf[cols - k].conj();
        }
        ifft_cols.process_with_scratch(&mut row_buf, &mut scratch);
        for (o, &b) in out.row_mut(i).iter_mut().zip(row_buf.iter()) {
            *o = b.re * norm;
        }
    }

    out
}
