use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window, WindowBuilder};

use super::frame::{FrameDecision, FrameScheduler};
use super::metrics::MetricsAccumulator;
use super::scene::SceneMachine;
use super::{
    CursorHint, DrawList, InputEvent, Key, MetricsHandle, Renderer, Scene, SceneCommand,
    SceneKey, Vec2, Viewport,
};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub max_fps: Option<u32>,
    pub metrics_log_interval: Duration,
    pub show_fps: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Cavia Avonturen".to_string(),
            window_width: 800,
            window_height: 600,
            max_fps: Some(60),
            metrics_log_interval: Duration::from_secs(1),
            show_fps: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(
    config: LoopConfig,
    scene_a: Box<dyn Scene>,
    scene_b: Box<dyn Scene>,
) -> Result<(), AppError> {
    let metrics_handle = MetricsHandle::default();
    run_app_with_metrics(config, scene_a, scene_b, metrics_handle)
}

pub fn run_app_with_metrics(
    config: LoopConfig,
    scene_a: Box<dyn Scene>,
    scene_b: Box<dyn Scene>,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let mut scenes = SceneMachine::new(scene_a, scene_b, SceneKey::A);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window: Arc<Window> = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let viewport = Viewport {
        width: config.window_width.max(1),
        height: config.window_height.max(1),
    };
    let mut renderer =
        Renderer::new(Arc::clone(&window), viewport).map_err(AppError::CreateRenderer)?;

    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let mut scheduler = FrameScheduler::new(config.max_fps);
    let mut input_collector = InputCollector::default();
    let mut draw_list = DrawList::default();

    scenes.load_active();
    info!(scene = ?scenes.active_scene(), "scene_loaded");
    info!(
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        max_fps = %format_fps_cap(config.max_fps),
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        show_fps = config.show_fps,
        "loop_config"
    );

    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;
    let mut last_cursor_hint = CursorHint::Default;
    scheduler.start(Instant::now());

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                let mut dispatched = false;
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(error) = renderer.resize_surface(new_size.width, new_size.height)
                        {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window.inner_size();
                        if let Err(error) = renderer.resize_surface(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let pointer =
                            renderer.window_to_viewport(position.x as f32, position.y as f32);
                        let input = input_collector.handle_cursor_moved(pointer);
                        dispatch_input(&mut scenes, input, viewport);
                        dispatched = true;
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input_collector.clear_cursor_position();
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        if let Some(input) = input_collector.handle_mouse_input(button, state) {
                            dispatch_input(&mut scenes, input, viewport);
                            dispatched = true;
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let Some(input) = input_collector.handle_key(
                            event.physical_key,
                            event.state,
                            event.repeat,
                        ) {
                            dispatch_input(&mut scenes, input, viewport);
                            dispatched = true;
                        }
                    }
                    WindowEvent::Touch(touch) => {
                        let position = renderer
                            .window_to_viewport(touch.location.x as f32, touch.location.y as f32);
                        if let Some(input) =
                            input_collector.handle_touch(touch.id, touch.phase, position)
                        {
                            dispatch_input(&mut scenes, input, viewport);
                            dispatched = true;
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let Some(request) = scheduler.pending() else {
                            return;
                        };
                        let now = Instant::now();
                        match scheduler.on_callback(request, now) {
                            FrameDecision::Stale => {}
                            FrameDecision::Skip => metrics_accumulator.record_skip(),
                            FrameDecision::Run { elapsed } => {
                                let command = scenes.update_active(elapsed, viewport);
                                apply_scene_command(&mut scenes, command);

                                draw_list.reset();
                                scenes.render_active(viewport, &mut draw_list);
                                if let Err(error) = renderer.render(&draw_list) {
                                    warn!(error = %error, "renderer_draw_failed");
                                    window_target.exit();
                                }
                                metrics_accumulator.record_frame(elapsed);

                                if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                                    metrics_handle.publish(snapshot);
                                    info!(
                                        fps = snapshot.fps,
                                        skipped_per_second = snapshot.skipped_per_second,
                                        frame_time_ms = snapshot.frame_time_ms,
                                        scene = ?scenes.active_scene(),
                                        "loop_metrics"
                                    );
                                }

                                let fps = config.show_fps.then(|| metrics_handle.snapshot().fps);
                                let next_title =
                                    compose_title(&config.window_title, scenes.title_active(), fps);
                                if last_applied_title.as_deref() != Some(next_title.as_str()) {
                                    window.set_title(&next_title);
                                    last_applied_title = Some(next_title);
                                }
                                dispatched = true;
                            }
                        }
                    }
                    _ => {}
                }

                if dispatched {
                    if let Some(pointer) = input_collector.cursor_position() {
                        let hint = scenes.cursor_hint_active(pointer, viewport);
                        if hint != last_cursor_hint {
                            window.set_cursor_icon(cursor_icon_for(hint));
                            last_cursor_hint = hint;
                        }
                    }
                }
            }
            Event::AboutToWait => {
                if !scheduler.is_running() {
                    return;
                }
                let now = Instant::now();
                let wait = scheduler.time_until_due(now);
                if wait.is_zero() {
                    window.request_redraw();
                    window_target.set_control_flow(ControlFlow::Poll);
                } else {
                    window_target.set_control_flow(ControlFlow::WaitUntil(now + wait));
                }
            }
            Event::LoopExiting => {
                if scheduler.stop() {
                    debug!("frame_request_cancelled");
                }
                scenes.shutdown_all();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn dispatch_input(scenes: &mut SceneMachine, input: InputEvent, viewport: Viewport) {
    let command = scenes.handle_input_active(&input, viewport);
    apply_scene_command(scenes, command);
}

fn apply_scene_command(scenes: &mut SceneMachine, command: SceneCommand) {
    if scenes.apply(command) {
        info!(scene = ?scenes.active_scene(), command = ?command, "scene_switched");
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    cursor_position_px: Option<Vec2>,
    left_mouse_is_down: bool,
    active_touches: BTreeSet<u64>,
    primary_touch: Option<u64>,
}

impl InputCollector {
    fn handle_key(
        &mut self,
        physical_key: PhysicalKey,
        state: ElementState,
        is_repeat: bool,
    ) -> Option<InputEvent> {
        let key = key_from_physical(physical_key);
        match state {
            ElementState::Pressed if is_repeat => None,
            ElementState::Pressed => Some(InputEvent::KeyDown(key)),
            ElementState::Released => Some(InputEvent::KeyUp(key)),
        }
    }

    fn handle_cursor_moved(&mut self, position: Vec2) -> InputEvent {
        self.cursor_position_px = Some(position);
        InputEvent::PointerMove(position)
    }

    fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_position_px
    }

    fn clear_cursor_position(&mut self) {
        self.cursor_position_px = None;
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => {
                let was_down = self.left_mouse_is_down;
                self.left_mouse_is_down = true;
                if was_down {
                    return None;
                }
                self.cursor_position_px.map(InputEvent::PointerDown)
            }
            ElementState::Released => {
                self.left_mouse_is_down = false;
                None
            }
        }
    }

    fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                self.active_touches.insert(id);
                if self.primary_touch.is_none() {
                    self.primary_touch = Some(id);
                }
                Some(InputEvent::TouchStart {
                    position,
                    touch_count: self.touch_count(),
                })
            }
            TouchPhase::Moved => {
                (self.primary_touch == Some(id)).then(|| InputEvent::TouchMove {
                    position,
                    touch_count: self.touch_count(),
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if !self.active_touches.remove(&id) {
                    return None;
                }
                if self.primary_touch == Some(id) {
                    self.primary_touch = None;
                }
                Some(InputEvent::TouchEnd)
            }
        }
    }

    fn touch_count(&self) -> u32 {
        u32::try_from(self.active_touches.len()).unwrap_or(u32::MAX)
    }
}

fn key_from_physical(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        return Key::Other;
    };
    match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit(9),
        _ => Key::Other,
    }
}

fn cursor_icon_for(hint: CursorHint) -> CursorIcon {
    match hint {
        CursorHint::Default => CursorIcon::Default,
        CursorHint::Pointer => CursorIcon::Pointer,
        CursorHint::Crosshair => CursorIcon::Crosshair,
    }
}

fn compose_title(base: &str, scene_title: Option<String>, fps: Option<f32>) -> String {
    let mut title = scene_title.unwrap_or_else(|| base.to_string());
    if let Some(fps) = fps {
        title.push_str(&format!(" | FPS: {fps:.0}"));
    }
    title
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn format_fps_cap(cap: Option<u32>) -> String {
    match cap.filter(|value| *value > 0) {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}
