use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

use crate::data::model::{AxisKind, Channel, SignalTable};

use super::DspError;

/// Frequency-domain resampling to `target_fs` Hz.
///
/// Forward FFT, spectrum truncation (or zero-padding) with the usual
/// Nyquist-bin fold/split, inverse FFT scaled to preserve amplitude.
/// The new length is `floor(len * target_fs / source_fs)` and the index
/// is rebuilt uniformly at the target rate from zero. Equal rates (or
/// an unchanged rounded length) are a no-op.
pub fn resample(
    table: &SignalTable,
    source_fs: f64,
    target_fs: f64,
) -> Result<SignalTable, DspError> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    if source_fs <= 0.0 {
        return Err(DspError::InvalidSampleRate(source_fs));
    }
    if target_fs <= 0.0 {
        return Err(DspError::InvalidTargetRate(target_fs));
    }
    if source_fs == target_fs {
        return Ok(table.clone());
    }

    let n = table.len();
    let m = (n as f64 * target_fs / source_fs) as usize;
    if m == n {
        return Ok(table.clone());
    }
    if m == 0 {
        return Ok(SignalTable::new(
            Vec::new(),
            table
                .channels
                .iter()
                .map(|c| Channel::new(c.name.clone(), Vec::new()))
                .collect(),
            AxisKind::TimeSeconds,
        ));
    }

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(m);

    let dt = 1.0 / target_fs;
    let index = (0..m).map(|i| i as f64 * dt).collect();
    let channels = table
        .channels
        .iter()
        .map(|c| {
            let mut buf: Vec<Complex<f64>> =
                c.values.iter().map(|&v| Complex::new(v, 0.0)).collect();
            forward.process(&mut buf);

            let mut resized = resize_spectrum(&buf, m);
            inverse.process(&mut resized);

            // Unnormalised transforms: 1/m from the inverse and the m/n
            // amplitude correction collapse into 1/n.
            let scale = 1.0 / n as f64;
            Channel::new(
                c.name.clone(),
                resized.iter().map(|v| v.re * scale).collect(),
            )
        })
        .collect();

    Ok(SignalTable::new(index, channels, AxisKind::TimeSeconds))
}

/// Map an `n`-point spectrum onto `m` bins, keeping the lowest
/// frequencies and their mirrored negative counterparts.
fn resize_spectrum(x: &[Complex<f64>], m: usize) -> Vec<Complex<f64>> {
    let n = x.len();
    let k = n.min(m);
    let half = k / 2;

    let mut y = vec![Complex::new(0.0, 0.0); m];
    y[..=half.min(m - 1)].copy_from_slice(&x[..=half.min(m - 1)]);
    for i in 1..=(k - 1) / 2 {
        y[m - i] = x[n - i];
    }

    if k % 2 == 0 && half > 0 {
        if m < n {
            // Downsampling: the shared Nyquist bin collects both of the
            // source bins that alias onto it.
            y[half] = x[half] + x[n - half];
        } else {
            // Upsampling: split the source Nyquist energy across the
            // two bins it unfolds into.
            y[half] = x[half] * 0.5;
            y[m - half] = (x[half] * 0.5).conj();
        }
    }
    y
}
