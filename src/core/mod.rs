//! Core processing building blocks: the frequency-domain resampler, centered
//! crop, and background normalization, plus the real-FFT helpers they share.
pub mod processing;
