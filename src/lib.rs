#![warn(clippy::all, rust_2018_idioms)]
//! Click a body part, describe the injury, pick a gender, submit.
//!
//! Records are kept for the session only and reported to a remote endpoint whose answer never
//! blocks the local list.

mod app;
pub mod config;
pub mod diagram;
pub mod error;
pub mod form;
pub mod ids;
pub mod model;
pub mod store;
pub mod submit;
pub mod tracker;

pub use app::{TrackerApp, decode_diagram};
pub use config::TrackerConfig;

#[cfg(target_os = "android")]
use egui_winit::winit;

#[cfg(not(target_arch = "wasm32"))]
impl TrackerApp {
    /// Run the app natively with the given window options.
    pub fn run(options: eframe::NativeOptions, config: TrackerConfig) -> Result<(), eframe::Error> {
        eframe::run_native(
            "Injury Tracker",
            options,
            Box::new(|cc| Ok(Box::new(TrackerApp::new(cc, config)))),
        )
    }
}

#[cfg(target_os = "android")]
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn android_main(app: winit::platform::android::activity::AndroidApp) {
    use eframe::Renderer;

    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    let options = eframe::NativeOptions {
        android_app: Some(app),
        renderer: Renderer::Wgpu,
        ..Default::default()
    };

    if let Err(e) = TrackerApp::run(options, TrackerConfig::from_env()) {
        log::error!("injury tracker exited with an error: {e}");
    }
}
