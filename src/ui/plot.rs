use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::channel_color;
use crate::data::model::SignalTable;

// ---------------------------------------------------------------------------
// Multi-series line plots (central panel)
// ---------------------------------------------------------------------------

/// Render a table as a multi-series line chart, one line per channel.
/// An empty table yields a "No data" placeholder instead of axes.
pub fn table_plot(ui: &mut Ui, id: &str, table: &SignalTable, y_label: &str, height: f32) {
    if table.is_empty() {
        ui.group(|ui: &mut Ui| {
            ui.set_height(height);
            ui.set_width(ui.available_width());
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No data");
            });
        });
        return;
    }

    let n_channels = table.channels.len();

    Plot::new(id.to_owned())
        .legend(Legend::default())
        .x_axis_label(table.axis.to_string())
        .y_axis_label(y_label)
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, channel) in table.channels.iter().enumerate() {
                let points: PlotPoints = table
                    .index
                    .iter()
                    .zip(channel.values.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .name(&channel.name)
                        .color(channel_color(idx, n_channels))
                        .width(1.5),
                );
            }
        });
}

/// The two stacked charts: processed time domain on top, one-sided
/// amplitude spectrum below.
pub fn signal_plots(ui: &mut Ui, time_domain: &SignalTable, freq_domain: &SignalTable) {
    let half = (ui.available_height() / 2.0 - 24.0).max(120.0);

    ui.heading("Time domain");
    table_plot(ui, "time_plot", time_domain, "Amplitude", half);

    ui.separator();

    ui.heading("Frequency domain");
    table_plot(ui, "freq_plot", freq_domain, "Amplitude", half);
}
