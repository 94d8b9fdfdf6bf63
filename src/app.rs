use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EmgScopeApp {
    pub state: AppState,
}

impl Default for EmgScopeApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for EmgScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Widget changes from the previous frame drive one full-chain
        // recomputation before anything is drawn.
        self.state.recompute_if_dirty();

        // ---- Top panel: menu + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: processing controls ----
        egui::SidePanel::left("control_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: time + frequency plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::signal_plots(ui, &self.state.processed, &self.state.freq_domain);
        });
    }
}
