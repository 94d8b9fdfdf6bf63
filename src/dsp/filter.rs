use std::f64::consts::PI;

use crate::data::model::SignalTable;

use super::{DspError, check_band_frequency, check_sample_rate};

// ---------------------------------------------------------------------------
// Second-order sections
// ---------------------------------------------------------------------------

/// One biquad section with the denominator normalised (a0 = 1).
/// First-order sections are encoded with trailing zero coefficients.
#[derive(Debug, Clone, Copy)]
struct Sos {
    b: [f64; 3],
    a: [f64; 2],
}

impl Sos {
    /// Run the section over `x` in place (direct form II transposed).
    fn run(&self, x: &mut [f64]) {
        let (mut z1, mut z2) = (0.0, 0.0);
        for v in x.iter_mut() {
            let input = *v;
            let out = self.b[0] * input + z1;
            z1 = self.b[1] * input - self.a[0] * out + z2;
            z2 = self.b[2] * input - self.a[1] * out;
            *v = out;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Lowpass,
    Highpass,
}

/// Butterworth design as a cascade of second-order sections.
///
/// Bilinear transform of the analog prototype: the pole pair `k` of an
/// order-`n` Butterworth has damping `sin(pi*(2k+1)/(2n))`; odd orders
/// add one real pole, i.e. one first-order section.
fn butterworth_sections(order: usize, cutoff: f64, fs: f64, band: Band) -> Vec<Sos> {
    // Pre-warped cutoff for the bilinear transform.
    let k = (PI * cutoff / fs).tan();
    let k2 = k * k;

    let mut sections = Vec::with_capacity(order / 2 + 1);
    for pair in 0..order / 2 {
        let zeta = (PI * (2 * pair + 1) as f64 / (2 * order) as f64).sin();
        let d = 1.0 + 2.0 * zeta * k + k2;
        let a = [2.0 * (k2 - 1.0) / d, (1.0 - 2.0 * zeta * k + k2) / d];
        let b = match band {
            Band::Lowpass => [k2 / d, 2.0 * k2 / d, k2 / d],
            Band::Highpass => [1.0 / d, -2.0 / d, 1.0 / d],
        };
        sections.push(Sos { b, a });
    }
    if order % 2 == 1 {
        let d = 1.0 + k;
        let a = [(k - 1.0) / d, 0.0];
        let b = match band {
            Band::Lowpass => [k / d, k / d, 0.0],
            Band::Highpass => [1.0 / d, -1.0 / d, 0.0],
        };
        sections.push(Sos { b, a });
    }
    sections
}

/// Band-reject biquad at `center` Hz with sharpness `quality`
/// (alpha = sin(w0) / 2Q).
fn notch_section(center: f64, fs: f64, quality: f64) -> Sos {
    let w0 = 2.0 * PI * center / fs;
    let alpha = w0.sin() / (2.0 * quality);
    let cos_w0 = w0.cos();
    let d = 1.0 + alpha;
    Sos {
        b: [1.0 / d, -2.0 * cos_w0 / d, 1.0 / d],
        a: [-2.0 * cos_w0 / d, (1.0 - alpha) / d],
    }
}

// ---------------------------------------------------------------------------
// Zero-phase application
// ---------------------------------------------------------------------------

/// Forward-backward filtering through the section cascade.
///
/// The signal is extended at both ends with an odd reflection before
/// the forward pass so the filter state has settled by the time it
/// reaches the real samples; the backward pass cancels the phase shift.
fn filtfilt(sections: &[Sos], x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n < 2 {
        return x.to_vec();
    }
    let pad = (3 * (2 * sections.len() + 1)).min(n - 1);

    let first = x[0];
    let last = x[n - 1];
    let mut ext = Vec::with_capacity(n + 2 * pad);
    for i in (1..=pad).rev() {
        ext.push(2.0 * first - x[i]);
    }
    ext.extend_from_slice(x);
    for i in 1..=pad {
        ext.push(2.0 * last - x[n - 1 - i]);
    }

    for pass in 0..2 {
        for section in sections {
            section.run(&mut ext);
        }
        if pass == 0 {
            ext.reverse();
        }
    }
    ext.reverse();

    ext[pad..pad + n].to_vec()
}

fn apply_zero_phase(table: &SignalTable, sections: &[Sos]) -> SignalTable {
    table.map_channels(|values| filtfilt(sections, values))
}

// ---------------------------------------------------------------------------
// Public filters
// ---------------------------------------------------------------------------

/// Zero-phase Butterworth lowpass over every channel.
pub fn lowpass(
    table: &SignalTable,
    cutoff: f64,
    fs: f64,
    order: usize,
) -> Result<SignalTable, DspError> {
    butterworth(table, cutoff, fs, order, Band::Lowpass)
}

/// Zero-phase Butterworth highpass over every channel.
pub fn highpass(
    table: &SignalTable,
    cutoff: f64,
    fs: f64,
    order: usize,
) -> Result<SignalTable, DspError> {
    butterworth(table, cutoff, fs, order, Band::Highpass)
}

fn butterworth(
    table: &SignalTable,
    cutoff: f64,
    fs: f64,
    order: usize,
    band: Band,
) -> Result<SignalTable, DspError> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    check_sample_rate(fs)?;
    check_band_frequency(cutoff, fs)?;
    if order == 0 {
        return Err(DspError::InvalidOrder);
    }
    let sections = butterworth_sections(order, cutoff, fs, band);
    Ok(apply_zero_phase(table, &sections))
}

/// Zero-phase notch (band-reject) at `center` Hz, typically used to
/// remove 50/60 Hz power-line interference.
pub fn notch(
    table: &SignalTable,
    center: f64,
    fs: f64,
    quality: f64,
) -> Result<SignalTable, DspError> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    check_sample_rate(fs)?;
    check_band_frequency(center, fs)?;
    if quality <= 0.0 {
        return Err(DspError::InvalidQuality(quality));
    }
    let sections = [notch_section(center, fs, quality)];
    Ok(apply_zero_phase(table, &sections))
}
