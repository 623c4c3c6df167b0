use std::collections::HashMap;
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use engine::{
    screen_to_world, world_to_screen, Camera2D, CursorHint, Direction, DrawList, HeldKeys,
    InputEvent, Key, Rect, Rgba, Scene, SceneCommand, SceneKey, Vec2, Viewport,
    CAMERA_SMOOTH_FACTOR_DEFAULT,
};
use thiserror::Error;
use tracing::{debug, info};

use super::colors::{load_colors, CaviaColors, SharedStore};

const PLAYER_SPEED: f32 = 5.0;
const ARRIVAL_THRESHOLD: f32 = 5.0;
const ANIMATION_INCREMENT: f32 = 0.1;
const BOUNDS_MARGIN: f32 = 30.0;
const WORLD_SIZE: Vec2 = Vec2 {
    x: 2000.0,
    y: 1000.0,
};
const WORLD_SPAWN: Vec2 = Vec2 { x: 400.0, y: 500.0 };
const INTERIOR_SIZE: Vec2 = Vec2 { x: 800.0, y: 600.0 };
const INTERIOR_SPAWN: Vec2 = Vec2 { x: 400.0, y: 300.0 };
const EXIT_ZONE: ExitZone = ExitZone {
    min_x: 350.0,
    max_x: 450.0,
    min_y: 500.0,
};
const EXIT_SPAWN_OFFSET: f32 = 50.0;
const SWIPE_THRESHOLD: f32 = 50.0;
const OUTSIDE_LABEL: &str = "Buiten";
const GAME_TITLE: &str = "Cavia Avonturen";
const PLAYER_DRAW_SCALE: f32 = 0.5;
const ANIMATION_BOB_AMPLITUDE: f32 = 2.0;

include!("types.rs");
include!("catalog.rs");
include!("systems.rs");
include!("scene_state.rs");
include!("input_resolver.rs");
include!("render.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_explore_scene(
    config: GameConfig,
    store: SharedStore,
    customization_scene: SceneKey,
) -> Box<dyn Scene> {
    Box::new(ExploreScene::new(
        config,
        Box::new(StaticWorldCatalog::new()),
        store,
        customization_scene,
    ))
}
