/// Signal processors: pure functions from `SignalTable` to `SignalTable`.
///
/// Every processor validates its scalar parameters up front and returns
/// a [`DspError`] on bad input; an empty table (or one without
/// channels) is passed through unchanged rather than treated as an
/// error.

pub mod envelope;
pub mod filter;
pub mod resample;
pub mod spectrum;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::data::model::SignalTable;

pub use envelope::{Rectification, moving_average, rectify, rms_envelope};
pub use filter::{highpass, lowpass, notch};
pub use resample::resample;
pub use spectrum::{SpectrumOutput, spectrum};

// ---------------------------------------------------------------------------
// DspError – invalid processing parameters
// ---------------------------------------------------------------------------

/// Parameter validation failure raised by a processor at call time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    #[error("sampling rate must be positive (got {0} Hz)")]
    InvalidSampleRate(f64),

    #[error("frequency {freq} Hz must lie strictly between 0 and the Nyquist limit ({nyquist} Hz)")]
    FrequencyOutOfRange { freq: f64, nyquist: f64 },

    #[error("filter order must be at least 1")]
    InvalidOrder,

    #[error("quality factor must be positive (got {0})")]
    InvalidQuality(f64),

    #[error("window length must be at least 1 sample")]
    InvalidWindow,

    #[error("target sampling rate must be positive (got {0} Hz)")]
    InvalidTargetRate(f64),
}

pub(crate) fn check_sample_rate(fs: f64) -> Result<(), DspError> {
    if fs > 0.0 {
        Ok(())
    } else {
        Err(DspError::InvalidSampleRate(fs))
    }
}

/// Corner/center frequencies must sit strictly inside (0, fs/2).
pub(crate) fn check_band_frequency(freq: f64, fs: f64) -> Result<(), DspError> {
    let nyquist = fs / 2.0;
    if freq > 0.0 && freq < nyquist {
        Ok(())
    } else {
        Err(DspError::FrequencyOutOfRange { freq, nyquist })
    }
}

// ---------------------------------------------------------------------------
// ProcessOp – the selectable operations, in application order
// ---------------------------------------------------------------------------

/// One operation of the interactive processing chain.
///
/// Declaration order is the fixed priority order the chain applies,
/// whatever order the user selected them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessOp {
    Lowpass,
    Highpass,
    Notch,
    MovingAverage,
    FullRectify,
    HalfRectify,
    RmsEnvelope,
}

impl ProcessOp {
    /// All operations in application order.
    pub const ALL: [ProcessOp; 7] = [
        ProcessOp::Lowpass,
        ProcessOp::Highpass,
        ProcessOp::Notch,
        ProcessOp::MovingAverage,
        ProcessOp::FullRectify,
        ProcessOp::HalfRectify,
        ProcessOp::RmsEnvelope,
    ];

    /// Widget label.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessOp::Lowpass => "Lowpass filter",
            ProcessOp::Highpass => "Highpass filter",
            ProcessOp::Notch => "Notch filter",
            ProcessOp::MovingAverage => "Moving average",
            ProcessOp::FullRectify => "Full-wave rectification",
            ProcessOp::HalfRectify => "Half-wave rectification",
            ProcessOp::RmsEnvelope => "RMS envelope",
        }
    }
}

// ---------------------------------------------------------------------------
// ChainParams – scalar configuration for the whole chain
// ---------------------------------------------------------------------------

/// Parameters for every operation of the chain, in one place so the
/// widget panel can edit them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainParams {
    pub sample_rate: f64,
    pub lowpass_cutoff: f64,
    pub highpass_cutoff: f64,
    pub filter_order: usize,
    pub notch_freq: f64,
    pub notch_quality: f64,
    pub ma_window: usize,
    pub rms_window: usize,
}

impl Default for ChainParams {
    fn default() -> Self {
        ChainParams {
            sample_rate: 200.0,
            lowpass_cutoff: 5.0,
            highpass_cutoff: 5.0,
            filter_order: 4,
            notch_freq: 50.0,
            notch_quality: 30.0,
            ma_window: 21,
            rms_window: 40,
        }
    }
}

/// Apply the selected operations in the fixed priority order, threading
/// each output into the next input.
pub fn apply_chain(
    table: &SignalTable,
    selected: &BTreeSet<ProcessOp>,
    params: &ChainParams,
) -> Result<SignalTable, DspError> {
    let mut current = table.clone();
    for op in ProcessOp::ALL {
        if !selected.contains(&op) {
            continue;
        }
        current = match op {
            ProcessOp::Lowpass => lowpass(
                &current,
                params.lowpass_cutoff,
                params.sample_rate,
                params.filter_order,
            )?,
            ProcessOp::Highpass => highpass(
                &current,
                params.highpass_cutoff,
                params.sample_rate,
                params.filter_order,
            )?,
            ProcessOp::Notch => notch(
                &current,
                params.notch_freq,
                params.sample_rate,
                params.notch_quality,
            )?,
            ProcessOp::MovingAverage => moving_average(&current, params.ma_window)?,
            ProcessOp::FullRectify => rectify(&current, Rectification::Full),
            ProcessOp::HalfRectify => rectify(&current, Rectification::Half),
            ProcessOp::RmsEnvelope => rms_envelope(&current, params.rms_window)?,
        };
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AxisKind, Channel, SignalTable};

    fn ramp_table() -> SignalTable {
        let n = 400;
        SignalTable::new(
            (0..n).map(|i| i as f64 / 200.0).collect(),
            vec![Channel::new(
                "emg0",
                (0..n).map(|i| (i as f64 / 50.0).sin() - 0.5).collect(),
            )],
            AxisKind::TimeSeconds,
        )
    }

    #[test]
    fn chain_on_empty_table_is_identity() {
        let selected: BTreeSet<ProcessOp> = ProcessOp::ALL.into_iter().collect();
        let out = apply_chain(&SignalTable::empty(), &selected, &ChainParams::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn chain_order_is_priority_order_not_selection_order() {
        // Half rectification after a highpass differs from highpass after
        // half rectification; the chain must always run highpass first.
        let table = ramp_table();
        let params = ChainParams::default();

        let selected: BTreeSet<ProcessOp> =
            [ProcessOp::HalfRectify, ProcessOp::Highpass].into_iter().collect();
        let chained = apply_chain(&table, &selected, &params).unwrap();

        let by_hand = rectify(
            &highpass(&table, params.highpass_cutoff, params.sample_rate, params.filter_order)
                .unwrap(),
            Rectification::Half,
        );
        assert_eq!(chained.channels[0].values, by_hand.channels[0].values);
    }

    #[test]
    fn unselected_ops_leave_table_untouched() {
        let table = ramp_table();
        let out = apply_chain(&table, &BTreeSet::new(), &ChainParams::default()).unwrap();
        assert_eq!(out.channels[0].values, table.channels[0].values);
    }
}
