//! Debug overlay and pause menu rendered via egui on top of the game scene.
//!
//! Integration pattern: egui requires a three-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The stats window only runs when `visible` is true (toggled by F3); the
//! pause menu runs whenever the simulation is paused. egui event handling is
//! always active so both can intercept clicks while shown.

use duel_core::time::FrameClock;
use winit::window::Window;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub player_health: f32,
    pub enemy_health: f32,
    pub player_dash_cooldown: f32,
    pub enemy_attack_cooldown: f32,
    pub player_combo: u32,
    pub sprite_count: u32,
    pub draw_calls: u32,
    pub events_dropped: u64,
    pub paused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayActions {
    /// User clicked Resume in the pause menu
    pub resume: bool,
    /// User clicked Quit in the pause menu
    pub quit: bool,
    /// User toggled the collider outline checkbox
    pub toggle_colliders: bool,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        clock: &FrameClock,
        stats: &OverlayStats,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let visible = self.visible;
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 10.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                        ui.label(format!("Frame: {}", clock.frame_count));
                        ui.separator();
                        ui.label(format!("Player HP: {:.0}", stats.player_health));
                        ui.label(format!("Enemy HP: {:.0}", stats.enemy_health));
                        ui.label(format!("Player combo: {}", stats.player_combo));
                        ui.label(format!(
                            "Dash cooldown: {:.0}",
                            stats.player_dash_cooldown
                        ));
                        ui.label(format!(
                            "Enemy atk cooldown: {:.0}",
                            stats.enemy_attack_cooldown
                        ));
                        ui.separator();
                        ui.label(format!("Sprites: {}", stats.sprite_count));
                        ui.label(format!("Draw calls: {}", stats.draw_calls));
                        if stats.events_dropped > 0 {
                            ui.label(format!("Events dropped: {}", stats.events_dropped));
                        }
                        if ui.button("Toggle colliders").clicked() {
                            actions.toggle_colliders = true;
                        }
                    });
            }

            if stats.paused {
                egui::Window::new("Paused")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label("\u{23f8} Game paused");
                            if ui.button("Resume").clicked() {
                                actions.resume = true;
                            }
                            if ui.button("Quit").clicked() {
                                actions.quit = true;
                            }
                        });
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
