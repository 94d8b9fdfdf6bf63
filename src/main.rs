use eframe::egui;

use emg_scope::app::EmgScopeApp;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EMG Scope – Signal Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(EmgScopeApp::default()))),
    )
}
