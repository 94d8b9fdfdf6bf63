//! Interactive EMG signal viewer: CSV loader, a selectable chain of
//! classic DSP operations, and time/frequency-domain plots, all driven
//! by egui widgets.

pub mod app;
pub mod color;
pub mod data;
pub mod dsp;
pub mod state;
pub mod ui;
