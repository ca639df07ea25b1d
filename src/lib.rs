use eframe::egui;

pub mod app;
pub mod controller;
pub mod renderer;
pub mod util;

pub use renderer::{FrameInput, Renderer, Settings};

/// 로거를 초기화하고 뷰어 창을 띄움. 창이 닫힐 때까지 돌아오지 않음
pub fn run() -> eframe::Result<()> {
    // RUST_LOG=debug 처럼 환경 변수로 로그 수준 조절
    env_logger::init();

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 720.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Firefly: Path Tracer",
        options,
        Box::new(|cc| Box::new(app::Application::new(cc))),
    )
}
