use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

use crate::data::model::{AxisKind, Channel, SignalTable};

use super::{DspError, check_sample_rate};

/// What the spectrum transform should return per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumOutput {
    /// One-sided amplitude spectrum: the DC bin is the raw magnitude,
    /// every other bin is scaled by 2/N so a unit sine peaks near 1.
    Magnitude,
    /// Raw one-sided complex values as `name_re` / `name_im` pairs.
    Complex,
}

/// One-sided discrete Fourier transform of every channel.
///
/// Output length is `floor(N/2)`; the index becomes the frequency axis
/// `k * fs / N` in hertz.
pub fn spectrum(
    table: &SignalTable,
    fs: f64,
    output: SpectrumOutput,
) -> Result<SignalTable, DspError> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    check_sample_rate(fs)?;

    let n = table.len();
    let half = n / 2;
    let freqs: Vec<f64> = (0..half).map(|k| k as f64 * fs / n as f64).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);

    let mut channels = Vec::with_capacity(table.channels.len());
    for channel in &table.channels {
        let mut buf: Vec<Complex<f64>> = channel
            .values
            .iter()
            .map(|&v| Complex::new(v, 0.0))
            .collect();
        fft.process(&mut buf);
        let one_sided = &buf[..half];

        match output {
            SpectrumOutput::Magnitude => {
                let scale = 2.0 / n as f64;
                let magnitude = one_sided
                    .iter()
                    .enumerate()
                    .map(|(k, v)| if k == 0 { v.norm() } else { v.norm() * scale })
                    .collect();
                channels.push(Channel::new(channel.name.clone(), magnitude));
            }
            SpectrumOutput::Complex => {
                channels.push(Channel::new(
                    format!("{}_re", channel.name),
                    one_sided.iter().map(|v| v.re).collect(),
                ));
                channels.push(Channel::new(
                    format!("{}_im", channel.name),
                    one_sided.iter().map(|v| v.im).collect(),
                ));
            }
        }
    }

    Ok(SignalTable::new(freqs, channels, AxisKind::FrequencyHz))
}
