mod camera;
mod frame;
mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use camera::{clamp_camera_axis, Camera2D, CAMERA_SMOOTH_FACTOR_DEFAULT};
pub use frame::{FrameDecision, FrameLimiter, FrameRequest, FrameScheduler};
pub use geometry::{Rect, Vec2};
pub use input::{Direction, HeldKeys, InputEvent, Key};
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{
    screen_to_world, world_to_screen, DrawCommand, DrawList, Renderer, Rgba, Viewport,
};
pub use scene::{CursorHint, Scene, SceneCommand, SceneKey};
