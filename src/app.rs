use std::time::Instant;

use eframe::egui::{self, ColorImage, ComboBox, Sense, Slider, TextureHandle, TextureOptions};
use log::{info, warn};
use winit::dpi::PhysicalSize;

use crate::controller::CameraController;
use crate::renderer::camera::Camera;
use crate::renderer::tonemap::ToneMapper;
use crate::renderer::{FrameInput, Renderer};

const SNAPSHOT_FILE: &str = "snapshot.png";

pub struct Application {
    renderer: Renderer,
    controller: CameraController,
    texture: Option<TextureHandle>,
    started_at: Instant,
    reset_requested: bool,
}

impl Application {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            renderer: Renderer::default(),
            controller: CameraController::new(Camera::default()),
            texture: None,
            started_at: Instant::now(),
            reset_requested: false,
        }
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("Side Menu")
            .resizable(true)
            .width_range(0.0..=512.0)
            .default_width(200.0)
            .show(ctx, |ui| {
                let settings = &mut self.renderer.settings;

                ui.heading("Renderer");
                ui.checkbox(&mut settings.path_trace, "Path tracing");
                ui.add(Slider::new(&mut settings.max_bounces, 1..=8).text("Bounces"));
                ui.add(Slider::new(&mut settings.resolution_scale, 0.1..=1.0).text("Resolution"));

                ui.separator();
                ui.heading("Tonemap");
                ComboBox::from_label("Operator")
                    .selected_text(settings.tonemap.label())
                    .show_ui(ui, |ui| {
                        for mapper in [ToneMapper::Exposure, ToneMapper::Aces] {
                            ui.selectable_value(&mut settings.tonemap, mapper, mapper.label());
                        }
                    });
                ui.add(Slider::new(&mut settings.exposure, 0.05..=8.0).text("Exposure"));
                ui.add(Slider::new(&mut settings.gamma, 1.0..=3.0).text("Gamma"));

                ui.separator();
                let size = self.renderer.size();
                ui.label(format!("Target: {}x{}", size.width, size.height));
                ui.label(format!("Samples: {}", self.renderer.frame_index()));
                ui.label(format!(
                    "Mouse grab (C): {}",
                    if self.controller.grab_mouse { "on" } else { "off" }
                ));

                if ui.button("Reset accumulation").clicked() {
                    self.reset_requested = true;
                }
                if ui.button("Save snapshot").clicked() {
                    match self.renderer.save_snapshot(SNAPSHOT_FILE) {
                        Ok(()) => info!("snapshot saved to {SNAPSHOT_FILE}"),
                        Err(error) => warn!("failed to save snapshot: {error}"),
                    }
                }
            });
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let size = self.renderer.size();
        let image = ColorImage::from_rgba_unmultiplied(
            [size.width as usize, size.height as usize],
            bytemuck::cast_slice(self.renderer.display()),
        );

        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("Firefly Output", image, TextureOptions::LINEAR));
        }
    }
}

impl eframe::App for Application {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.side_panel(ctx);

        // 텍스트 입력 중이 아닐 때만 카메라 키 처리
        if !ctx.wants_keyboard_input() {
            ctx.input(|input| self.controller.input(input));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let available = ui.available_size();
                let scale = ctx.pixels_per_point() * self.renderer.settings.resolution_scale;
                let size = PhysicalSize::new(
                    (available.x * scale).max(1.0) as u32,
                    (available.y * scale).max(1.0) as u32,
                );

                let frame_time = ctx.input(|input| input.stable_dt);
                self.controller.update(frame_time);

                let frame = FrameInput {
                    size,
                    time: self.started_at.elapsed().as_secs_f32(),
                    pose: self.controller.camera.pose(),
                    path_trace: self.renderer.settings.path_trace,
                    reset: std::mem::take(&mut self.reset_requested),
                };
                self.renderer.tick(&frame);
                self.refresh_texture(ctx);

                if let Some(texture) = &self.texture {
                    let response = ui.add(egui::Image::new(texture, available).sense(Sense::drag()));
                    if response.dragged() {
                        self.controller.drag(response.drag_delta());
                    }
                }
            });

        ctx.request_repaint();
    }
}
