use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Slider, Ui};

use crate::dsp::ProcessOp;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – processing controls
// ---------------------------------------------------------------------------

/// Render the control panel: file picker, operation selection and the
/// parameter sliders. Any change marks the state dirty so the chain is
/// recomputed next frame.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            file_picker(ui, state);
            ui.separator();

            op_selection(ui, state);
            ui.separator();

            parameter_sliders(ui, state);
        });
}

fn file_picker(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Recording");

    if state.available_files.is_empty() {
        ui.label(format!(
            "No .csv files under '{}' – use File → Open…",
            crate::state::DEFAULT_DATA_DIR
        ));
        return;
    }

    let current = state
        .selected_file
        .as_ref()
        .map(|p| display_name(p))
        .unwrap_or_else(|| "select a file".to_string());

    let mut picked = None;
    egui::ComboBox::from_id_salt("file_picker")
        .selected_text(current.clone())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for path in &state.available_files {
                let name = display_name(path);
                if ui.selectable_label(current == name, name).clicked() {
                    picked = Some(path.clone());
                }
            }
        });
    if let Some(path) = picked {
        state.load_file(path);
    }
}

/// `parent_dir/file.csv`, enough to tell subjects apart in a dropdown.
fn display_name(path: &std::path::Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.parent().and_then(|d| d.file_name()) {
        Some(dir) => format!("{}/{file}", dir.to_string_lossy()),
        None => file,
    }
}

fn op_selection(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Operations (applied in this order)");
    for op in ProcessOp::ALL {
        let mut checked = state.selected_ops.contains(&op);
        if ui.checkbox(&mut checked, op.label()).changed() {
            if checked {
                state.selected_ops.insert(op);
            } else {
                state.selected_ops.remove(&op);
            }
            state.dirty = true;
        }
    }
}

fn parameter_sliders(ui: &mut Ui, state: &mut AppState) {
    let params = &mut state.params;
    let mut changed = false;

    ui.strong("Sampling");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Rate [Hz]");
        changed |= ui
            .add(DragValue::new(&mut params.sample_rate).range(1.0..=10_000.0).speed(1.0))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .checkbox(&mut state.resample_enabled, "Resample to [Hz]")
            .changed();
        changed |= ui
            .add(DragValue::new(&mut state.target_rate).range(1.0..=10_000.0).speed(1.0))
            .changed();
    });
    ui.separator();

    ui.strong("Filters");
    changed |= ui
        .add(Slider::new(&mut params.lowpass_cutoff, 1.0..=100.0).text("Lowpass cutoff [Hz]"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut params.highpass_cutoff, 1.0..=100.0).text("Highpass cutoff [Hz]"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut params.filter_order, 1..=8).text("Filter order"))
        .changed();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Notch [Hz]");
        changed |= ui
            .add(DragValue::new(&mut params.notch_freq).range(1.0..=100.0).speed(0.1))
            .changed();
        ui.label("Q");
        changed |= ui
            .add(DragValue::new(&mut params.notch_quality).range(0.5..=100.0).speed(0.5))
            .changed();
    });
    ui.separator();

    ui.strong("Windows");
    changed |= ui
        .add(Slider::new(&mut params.ma_window, 1..=101).text("Moving average [samples]"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut params.rms_window, 1..=200).text("RMS envelope [samples]"))
        .changed();
    ui.separator();

    ui.strong("Display range [s]");
    let total = state.total_duration().max(0.1);
    changed |= ui
        .add(Slider::new(&mut state.time_start, 0.0..=total).text("Start"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut state.time_end, 0.0..=total).text("End"))
        .changed();
    if state.time_end < state.time_start {
        state.time_end = state.time_start;
    }

    if changed {
        state.dirty = true;
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.raw.is_empty() {
            ui.label(state.processing_summary());
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") || msg.starts_with("Could not") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open EMG recording")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.load_file(path);
    }
}
