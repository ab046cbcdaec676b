//! Blade Duel -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. Input
//! callbacks enqueue `GameEvent`s into a bounded queue; each `RedrawRequested`
//! drains the queue into `InputState`, advances the simulation with the
//! measured frame delta, rebuilds the CPU-side quad mesh and streams it into
//! GPU buffers, then composites the egui overlay (debug stats + pause menu)
//! on top. The frame clock pads short frames to the 60 FPS target.
//!
//! Per-frame update order is load-bearing:
//!   1. drain events -> input state -> player intents
//!   2. player step (combat timers, movement, physics)
//!   3. enemy policy + enemy step
//!   4. strikes both ways (reads the attack flags set in 2/3)
//!   5. animation refresh (consumes the attack flags)
//!   6. mesh rebuild + draw

mod arena;
mod combat;
mod entity;
mod enemy;
mod hud;
mod physics;
#[cfg(test)]
mod scenario;
mod sprites;
mod tuning;

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use arena::{load_arena_from_path, Arena};
use duel_core::events::{EventQueue, GameEvent};
use duel_core::geom::Rect;
use duel_core::input::{InputState, Key, MouseBtn};
use duel_core::time::FrameClock;
use duel_devtools::{DebugOverlay, OverlayStats};
use duel_platform::window::PlatformConfig;
use duel_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture};
use entity::{Entity, Facing, MoveIntent, SimContext};
use sprites::{load_catalog, SpriteCatalog};
use tuning::Tuning;

const ARENA_PATH: &str = "assets/arenas/duel.json";
const TARGET_FPS: u32 = 60;
const WHITE_ASSET: &str = "__white";

const PLATFORM_COLOR: [f32; 4] = [0.42, 0.44, 0.52, 1.0];
const HIT_FLASH_COLOR: [f32; 4] = [1.0, 0.35, 0.35, 1.0];
const COLLIDER_OUTLINE_COLOR: [f32; 4] = [0.2, 1.0, 0.3, 0.9];
const PAUSE_DIM_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.31,
    g: 0.32,
    b: 0.36,
    a: 1.0,
};

/// A contiguous run of indices that share the same texture binding.
/// Consecutive quads using the same texture merge into one draw call.
#[derive(Debug, Clone)]
struct DrawCall {
    texture_key: Arc<str>,
    index_start: u32,
    index_count: u32,
}

struct GpuSpriteTexture {
    #[allow(dead_code)]
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// All mutable engine state. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    clock: FrameClock,
    input: InputState,
    queue: EventQueue,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,
    debug_overlay: DebugOverlay,

    // --- Simulation --------------------------------------------------------
    arena: Arena,
    tuning: Tuning,
    catalog: SpriteCatalog,
    player: Entity,
    enemy: Entity,
    rng: StdRng,
    paused: bool,
    show_colliders: bool,

    // --- Per-frame GPU mesh state ------------------------------------------
    // The quad mesh is rebuilt on the CPU each frame, then streamed into
    // these GPU buffers. Buffers grow (power-of-two) but never shrink.
    textures: HashMap<Arc<str>, GpuSpriteTexture>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
    sprite_count: usize,
}

impl EngineState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let clock = FrameClock::new(TARGET_FPS);
        let input = InputState::new();
        let queue = EventQueue::new();
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let arena_path = std::path::PathBuf::from(ARENA_PATH);
        let arena = load_arena_from_path(&arena_path).unwrap_or_else(|err| {
            panic!(
                "Failed to load initial arena '{}': {}",
                arena_path.display(),
                err
            );
        });
        let camera = Camera2D::from_bounds(
            arena.bounds.x,
            arena.bounds.right(),
            arena.bounds.y,
            arena.bounds.bottom(),
        );

        let tuning = Tuning::default();
        let catalog = load_catalog();
        let now = clock.now();
        let player = Entity::spawn(
            arena.player_spawn,
            Facing::Right,
            catalog.fighter_clips.clone(),
            &tuning.combat,
            now,
        );
        let enemy = Entity::spawn(
            arena.enemy_spawn,
            Facing::Left,
            catalog.fighter_clips.clone(),
            &tuning.combat,
            now,
        );

        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            gpu,
            clock,
            input,
            queue,
            camera,
            sprite_pipeline,
            debug_overlay,
            arena,
            tuning,
            catalog,
            player,
            enemy,
            rng: StdRng::from_os_rng(),
            paused: false,
            show_colliders: false,
            textures: HashMap::new(),
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
            sprite_count: 0,
        };

        // Startup order matters: textures before the first mesh build.
        state.load_textures();
        state.ensure_mesh_capacity(4, 6);
        state.rebuild_mesh();
        state
    }

    fn load_textures(&mut self) {
        let white = Texture::from_rgba8(
            &self.gpu.device,
            &self.gpu.queue,
            &[255, 255, 255, 255],
            1,
            1,
            "white",
        );
        let white_bind = self
            .sprite_pipeline
            .create_texture_bind_group(&self.gpu.device, &white);
        self.textures.insert(
            Arc::from(WHITE_ASSET),
            GpuSpriteTexture {
                texture: white,
                bind_group: white_bind,
            },
        );

        let sheet_path = self.catalog.fighter_texture_path;
        let sheet = match std::fs::read(sheet_path) {
            Ok(bytes) => Texture::from_bytes(&self.gpu.device, &self.gpu.queue, &bytes, sheet_path),
            Err(err) => {
                log::warn!(
                    "Failed to read sprite sheet '{}': {}. Falling back to a flat placeholder.",
                    sheet_path,
                    err
                );
                Texture::from_rgba8(
                    &self.gpu.device,
                    &self.gpu.queue,
                    &[220, 220, 235, 255],
                    1,
                    1,
                    "fighter_placeholder",
                )
            }
        };
        let sheet_bind = self
            .sprite_pipeline
            .create_texture_bind_group(&self.gpu.device, &sheet);
        self.textures.insert(
            Arc::from(sheet_path),
            GpuSpriteTexture {
                texture: sheet,
                bind_group: sheet_bind,
            },
        );
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.queue.pop() {
            match event {
                GameEvent::KeyDown(key) => self.input.key_down(key),
                GameEvent::KeyUp(key) => self.input.key_up(key),
                GameEvent::MouseDown(btn) => self.input.mouse_down(btn),
                GameEvent::MouseUp(btn) => self.input.mouse_up(btn),
                GameEvent::MouseMove { x, y } => self.input.mouse_position = (x, y),
            }
        }
    }

    /// One simulation frame. See the module docs for why this order matters.
    fn simulate(&mut self, dt: f32, now: f64) {
        self.player.intent = MoveIntent {
            up: self.input.is_held(Key::W)
                || self.input.is_held(Key::Up)
                || self.input.is_held(Key::Space),
            left: self.input.is_held(Key::A) || self.input.is_held(Key::Left),
            right: self.input.is_held(Key::D) || self.input.is_held(Key::Right),
        };
        if self.input.is_just_pressed(Key::J) || self.input.is_mouse_just_pressed(MouseBtn::Left) {
            self.player.want_attack = true;
        }
        if self.input.is_just_pressed(Key::K) {
            self.player.want_dash = true;
        }

        let ctx = SimContext {
            arena: &self.arena,
            tuning: &self.tuning,
        };
        self.player.step(&ctx, dt, now);
        enemy::drive(
            &mut self.enemy,
            &self.player,
            &self.arena,
            &self.tuning,
            &mut self.rng,
        );
        self.enemy.step(&ctx, dt, now);

        combat::strike(&self.player, &mut self.enemy, &self.tuning.combat);
        combat::strike(&self.enemy, &mut self.player, &self.tuning.combat);

        self.player.refresh_animation(&self.tuning.combat, now);
        self.enemy.refresh_animation(&self.tuning.combat, now);
    }

    fn rebuild_mesh(&mut self) {
        let (vertices, indices, draw_calls) = self.build_mesh();
        self.ensure_mesh_capacity(vertices.len(), indices.len());
        self.sprite_count = vertices.len() / 4;
        self.draw_calls = draw_calls;

        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        if !indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }
    }

    fn build_mesh(&self) -> (Vec<SpriteVertex>, Vec<u32>, Vec<DrawCall>) {
        let mut vertices = Vec::with_capacity(64 * 4);
        let mut indices = Vec::with_capacity(64 * 6);
        let mut draw_calls = Vec::with_capacity(8);
        let sheet_key = self.catalog.fighter_texture_path;

        // Back-to-front: platforms, ghosts, fighters, HUD, pause dim.
        for rect in &self.arena.platforms {
            push_quad(
                &mut vertices,
                &mut indices,
                &mut draw_calls,
                WHITE_ASSET,
                *rect,
                FULL_UV,
                false,
                PLATFORM_COLOR,
            );
        }

        for ent in [&self.enemy, &self.player] {
            self.push_ghost_trail(ent, sheet_key, &mut vertices, &mut indices, &mut draw_calls);
        }

        for ent in [&self.enemy, &self.player] {
            let tint = if ent.stunned {
                HIT_FLASH_COLOR
            } else {
                [1.0, 1.0, 1.0, 1.0]
            };
            push_quad(
                &mut vertices,
                &mut indices,
                &mut draw_calls,
                sheet_key,
                Rect::new(ent.pos.x, ent.pos.y, ent.size.x, ent.size.y),
                ent.frame,
                ent.facing == Facing::Left,
                tint,
            );
        }

        if self.show_colliders {
            for ent in [&self.enemy, &self.player] {
                push_outline(
                    &mut vertices,
                    &mut indices,
                    &mut draw_calls,
                    ent.world_collider(),
                );
            }
        }

        for quad in hud::build_hud(&self.player, &self.enemy, &self.tuning, &self.arena.bounds) {
            push_quad(
                &mut vertices,
                &mut indices,
                &mut draw_calls,
                WHITE_ASSET,
                quad.rect,
                FULL_UV,
                false,
                quad.color,
            );
        }

        if self.paused {
            push_quad(
                &mut vertices,
                &mut indices,
                &mut draw_calls,
                WHITE_ASSET,
                self.arena.bounds,
                FULL_UV,
                false,
                PAUSE_DIM_COLOR,
            );
        }

        (vertices, indices, draw_calls)
    }

    /// Faded copies of the dash-start frame, stepped along the dash path.
    fn push_ghost_trail(
        &self,
        ent: &Entity,
        sheet_key: &str,
        vertices: &mut Vec<SpriteVertex>,
        indices: &mut Vec<u32>,
        draw_calls: &mut Vec<DrawCall>,
    ) {
        if !ent.dashing || ent.ghost_alpha <= 0.0 {
            return;
        }
        let steps = self.tuning.combat.ghost_steps.max(1);
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            let pos = ent.dash_from.lerp(ent.dash_to, t);
            let alpha = ent.ghost_alpha * (1.0 - t);
            push_quad(
                vertices,
                indices,
                draw_calls,
                sheet_key,
                Rect::new(pos.x, pos.y, ent.size.x, ent.size.y),
                ent.dash_frame,
                ent.dash_facing == Facing::Left,
                [1.0, 1.0, 1.0, alpha],
            );
        }
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn overlay_stats(&self) -> OverlayStats {
        OverlayStats {
            player_health: self.player.health.max(0.0),
            enemy_health: self.enemy.health.max(0.0),
            player_dash_cooldown: self.player.dash_cooldown,
            enemy_attack_cooldown: self.enemy.attack_cooldown,
            player_combo: self.player.combo_count,
            sprite_count: self.sprite_count as u32,
            draw_calls: self.draw_calls.len() as u32,
            events_dropped: self.queue.dropped_count(),
            paused: self.paused,
        }
    }
}

struct App {
    config: PlatformConfig,
    state: Option<EngineState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = duel_platform::window::create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        self.state = Some(EngineState::new(window));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            // Callbacks only capture; consumption happens at frame start.
            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.queue.push(GameEvent::KeyDown(key)),
                            ElementState::Released => state.queue.push(GameEvent::KeyUp(key)),
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } if !egui_consumed => {
                if let Some(btn) = map_mouse_button(button) {
                    match btn_state {
                        ElementState::Pressed => state.queue.push(GameEvent::MouseDown(btn)),
                        ElementState::Released => state.queue.push(GameEvent::MouseUp(btn)),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.queue.push(GameEvent::MouseMove {
                    x: position.x,
                    y: position.y,
                });
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.clock.begin_frame();
                state.drain_events();

                if state.input.is_just_pressed(Key::Escape) {
                    state.paused = !state.paused;
                    log::info!(
                        "Simulation {}",
                        if state.paused { "PAUSED" } else { "RESUMED" }
                    );
                }
                if state.input.is_just_pressed(Key::F3) {
                    state.debug_overlay.toggle();
                }
                if state.input.is_just_pressed(Key::F4) {
                    state.show_colliders = !state.show_colliders;
                    log::info!(
                        "Collider outlines: {}",
                        if state.show_colliders { "ON" } else { "OFF" }
                    );
                }

                let dt = state.clock.dt as f32;
                let now = state.clock.now();
                if !state.paused {
                    state.simulate(dt, now);
                }
                state.rebuild_mesh();

                // Render phase reads finalized simulation state.
                let camera_uniform = state.camera.build_uniform();
                state.gpu.queue.write_buffer(
                    &state.camera_buffer,
                    0,
                    bytemuck::cast_slice(&[camera_uniform]),
                );

                let Some((output, view)) = state.gpu.begin_frame() else {
                    return;
                };

                let stats = state.overlay_stats();
                let (egui_primitives, egui_textures_delta, overlay_actions) =
                    state
                        .debug_overlay
                        .prepare(&state.window, &state.clock, &stats);

                if overlay_actions.resume {
                    state.paused = false;
                    log::info!("Simulation RESUMED (overlay)");
                }
                if overlay_actions.toggle_colliders {
                    state.show_colliders = !state.show_colliders;
                }
                if overlay_actions.quit {
                    log::info!("Quit requested from pause menu.");
                    event_loop.exit();
                    return;
                }

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.gpu.size.0, state.gpu.size.1],
                    pixels_per_point: state.window.scale_factor() as f32,
                };

                let mut encoder =
                    state
                        .gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Render Encoder"),
                        });

                {
                    let mut last_bound_texture_key: Option<&Arc<str>> = None;
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Arena Render Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    });

                    render_pass.set_pipeline(&state.sprite_pipeline.render_pipeline);
                    render_pass.set_bind_group(0, &state.camera_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(state.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                    for draw in &state.draw_calls {
                        if let Some(texture) = state.textures.get(&draw.texture_key) {
                            let need_rebind = match last_bound_texture_key {
                                Some(last) => **last != *draw.texture_key,
                                None => true,
                            };
                            if need_rebind {
                                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                                last_bound_texture_key = Some(&draw.texture_key);
                            }
                            render_pass.draw_indexed(
                                draw.index_start..(draw.index_start + draw.index_count),
                                0,
                                0..1,
                            );
                        }
                    }
                }

                state.debug_overlay.upload(
                    &state.gpu.device,
                    &state.gpu.queue,
                    &mut encoder,
                    &egui_primitives,
                    &egui_textures_delta,
                    &screen_descriptor,
                );

                {
                    let mut egui_pass = encoder
                        .begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("egui Render Pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Load,
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: None,
                            ..Default::default()
                        })
                        .forget_lifetime();

                    state
                        .debug_overlay
                        .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
                }

                state.debug_overlay.cleanup(&egui_textures_delta);

                state.gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                state.input.end_frame();
                state.clock.end_frame();
            }

            _ => {}
        }
    }
}

const FULL_UV: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 1.0,
    h: 1.0,
};

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Arena Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Arena Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Append one textured quad. World space is y-down; `uv` is the sheet-space
/// sub-rectangle, mirrored horizontally when `flip_x` is set (left-facing
/// sprites reuse the right-facing art).
#[allow(clippy::too_many_arguments)]
fn push_quad(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    texture_key: &str,
    rect: Rect,
    uv: Rect,
    flip_x: bool,
    color: [f32; 4],
) {
    let (u0, u1) = if flip_x {
        (uv.right(), uv.x)
    } else {
        (uv.x, uv.right())
    };
    let v0 = uv.y;
    let v1 = uv.bottom();
    let base_index = vertices.len() as u32;

    vertices.push(SpriteVertex {
        position: [rect.x, rect.y],
        tex_coords: [u0, v0],
        color,
    });
    vertices.push(SpriteVertex {
        position: [rect.right(), rect.y],
        tex_coords: [u1, v0],
        color,
    });
    vertices.push(SpriteVertex {
        position: [rect.right(), rect.bottom()],
        tex_coords: [u1, v1],
        color,
    });
    vertices.push(SpriteVertex {
        position: [rect.x, rect.bottom()],
        tex_coords: [u0, v1],
        color,
    });

    let draw_start = indices.len() as u32;
    indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);

    push_draw_call(draw_calls, Arc::from(texture_key), draw_start, 6);
}

/// Four thin quads tracing a rectangle's edges.
fn push_outline(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    rect: Rect,
) {
    const T: f32 = 1.5;
    let edges = [
        Rect::new(rect.x, rect.y, rect.w, T),
        Rect::new(rect.x, rect.bottom() - T, rect.w, T),
        Rect::new(rect.x, rect.y, T, rect.h),
        Rect::new(rect.right() - T, rect.y, T, rect.h),
    ];
    for edge in edges {
        push_quad(
            vertices,
            indices,
            draw_calls,
            WHITE_ASSET,
            edge,
            FULL_UV,
            false,
            COLLIDER_OUTLINE_COLOR,
        );
    }
}

/// Append a draw call, merging with the previous one when the texture matches
/// and indices are contiguous. Quads are emitted back-to-front, so runs that
/// share a texture collapse into a single `draw_indexed`.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture_key: Arc<str>,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if *last.texture_key == *texture_key && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture_key,
        index_start,
        index_count,
    });
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::F4 => Some(Key::F4),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyJ => Some(Key::J),
        KeyCode::KeyK => Some(Key::K),
        _ => None,
    }
}

fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Blade Duel starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
