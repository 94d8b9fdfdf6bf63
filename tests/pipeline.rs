//! End-to-end checks of the processing chain on a realistic synthetic
//! EMG signal: a low-frequency tone buried under 50 Hz mains noise.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use emg_scope::data::model::{AxisKind, Channel, SignalTable};
use emg_scope::dsp::{
    ChainParams, ProcessOp, SpectrumOutput, apply_chain, resample, spectrum,
};

const FS: f64 = 200.0;
const N: usize = 2000;

/// 10 Hz tone of amplitude 1 plus 50 Hz mains at amplitude 0.5.
fn noisy_signal() -> SignalTable {
    let index: Vec<f64> = (0..N).map(|i| i as f64 / FS).collect();
    let values = index
        .iter()
        .map(|&t| (2.0 * PI * 10.0 * t).sin() + 0.5 * (2.0 * PI * 50.0 * t).sin())
        .collect();
    SignalTable::new(
        index,
        vec![Channel::new("emg0", values)],
        AxisKind::TimeSeconds,
    )
}

fn magnitude_at(table: &SignalTable, freq: f64) -> f64 {
    let bin = table
        .index
        .iter()
        .position(|&f| (f - freq).abs() < 1e-9)
        .expect("frequency bin not on the axis");
    table.channels[0].values[bin]
}

#[test]
fn notch_then_spectrum_removes_the_mains_peak() {
    let params = ChainParams {
        sample_rate: FS,
        ..ChainParams::default()
    };
    let selected = BTreeSet::from([ProcessOp::Notch]);

    let raw_spectrum = spectrum(&noisy_signal(), FS, SpectrumOutput::Magnitude).unwrap();
    assert!((magnitude_at(&raw_spectrum, 50.0) - 0.5).abs() < 0.05);

    let cleaned = apply_chain(&noisy_signal(), &selected, &params).unwrap();
    let cleaned_spectrum = spectrum(&cleaned, FS, SpectrumOutput::Magnitude).unwrap();
    // Edge transients of the high-Q notch leave a small residual.
    assert!(magnitude_at(&cleaned_spectrum, 50.0) < 0.1);
    // The 10 Hz tone is untouched.
    assert!((magnitude_at(&cleaned_spectrum, 10.0) - 1.0).abs() < 0.05);
}

#[test]
fn rectify_and_envelope_track_signal_energy() {
    let params = ChainParams {
        sample_rate: FS,
        rms_window: 40,
        ..ChainParams::default()
    };
    let selected = BTreeSet::from([ProcessOp::FullRectify, ProcessOp::RmsEnvelope]);

    let out = apply_chain(&noisy_signal(), &selected, &params).unwrap();
    let values = &out.channels[0].values;
    assert!(values.iter().all(|&v| v >= 0.0));

    // RMS of sin(10Hz) + 0.5*sin(50Hz) is sqrt(0.5 + 0.125) ≈ 0.79;
    // a 40-sample (two-period) window should hover around that.
    let mid = &values[N / 4..3 * N / 4];
    let avg: f64 = mid.iter().sum::<f64>() / mid.len() as f64;
    assert!((avg - 0.79).abs() < 0.05, "envelope level {avg}");
}

#[test]
fn full_chain_with_every_operation_selected_runs_clean() {
    let params = ChainParams {
        sample_rate: FS,
        lowpass_cutoff: 60.0,
        highpass_cutoff: 2.0,
        ..ChainParams::default()
    };
    let selected: BTreeSet<ProcessOp> = ProcessOp::ALL.into_iter().collect();

    let out = apply_chain(&noisy_signal(), &selected, &params).unwrap();
    assert_eq!(out.len(), N);
    // RMS envelope output is non-negative by construction.
    assert!(out.channels[0].values.iter().all(|&v| v >= 0.0));
}

#[test]
fn resampled_signal_keeps_its_spectrum_shape() {
    let table = noisy_signal();
    let down = resample(&table, FS, 100.0).unwrap();
    assert_eq!(down.len(), N / 2);

    // The mains tone sits exactly at the new Nyquist limit and folds
    // away, so only the 10 Hz peak is checked after downsampling.
    let spec = spectrum(&down, 100.0, SpectrumOutput::Magnitude).unwrap();
    assert!((magnitude_at(&spec, 10.0) - 1.0).abs() < 0.05);
}

#[test]
fn empty_input_flows_through_the_whole_pipeline() {
    let params = ChainParams::default();
    let selected: BTreeSet<ProcessOp> = ProcessOp::ALL.into_iter().collect();

    let processed = apply_chain(&SignalTable::empty(), &selected, &params).unwrap();
    assert!(processed.is_empty());
    let spec = spectrum(&processed, FS, SpectrumOutput::Magnitude).unwrap();
    assert!(spec.is_empty());
}
