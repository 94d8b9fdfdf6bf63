/// Data layer: the signal table and the CSV loader.
///
/// Architecture:
/// ```text
///       .csv recording
///            │
///            ▼
///       ┌──────────┐
///       │  loader   │  parse file → SignalTable (empty on failure)
///       └──────────┘
///            │
///            ▼
///     ┌──────────────┐
///     │ SignalTable   │  shared index + equal-length channels
///     └──────────────┘
///            │
///            ▼
///       ┌──────────┐
///       │   dsp     │  processing chain → new SignalTable per step
///       └──────────┘
/// ```

pub mod loader;
pub mod model;
