use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use engine::{resolve_app_paths, FileStore, LoopConfig, MemoryStore, Scene, SceneKey};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::colors::SharedStore;
use super::customization::CustomizationScene;
use super::gameplay::{self, GameConfig, WorldId};

const START_WORLD_ENV_VAR: &str = "CAVIA_START_WORLD";
const MAX_FPS_ENV_VAR: &str = "CAVIA_MAX_FPS";
const SHOW_FPS_ENV_VAR: &str = "CAVIA_SHOW_FPS";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene_a: Box<dyn Scene>,
    pub(crate) scene_b: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Cavia Avonturen Startup ===");

    let defaults = LoopConfig::default();
    let config = LoopConfig {
        max_fps: resolve_max_fps(env::var(MAX_FPS_ENV_VAR), defaults.max_fps),
        show_fps: resolve_show_fps(env::var(SHOW_FPS_ENV_VAR)),
        ..defaults
    };
    let game_config = GameConfig {
        start_world: resolve_start_world(env::var(START_WORLD_ENV_VAR)),
        ..GameConfig::default()
    };

    let store = open_store();
    let scene_a: Box<dyn Scene> = Box::new(CustomizationScene::new(Rc::clone(&store), SceneKey::B));
    let scene_b = gameplay::build_explore_scene(game_config, store, SceneKey::A);

    AppWiring {
        config,
        scene_a,
        scene_b,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn open_store() -> SharedStore {
    match resolve_app_paths() {
        Ok(paths) => {
            info!(saves_dir = %paths.saves_dir.display(), "color_store_opened");
            Rc::new(RefCell::new(FileStore::new(paths.saves_dir)))
        }
        Err(err) => {
            warn!(error = %err, "saves directory unavailable; colors will not persist");
            Rc::new(RefCell::new(MemoryStore::default()))
        }
    }
}

fn resolve_start_world(lookup: Result<String, env::VarError>) -> WorldId {
    let fallback = GameConfig::default().start_world;
    match lookup {
        Ok(value) => match value.parse::<WorldId>() {
            Ok(world) => world,
            Err(err) => {
                warn!(
                    env_var = START_WORLD_ENV_VAR,
                    error = %err,
                    "invalid start world; falling back to default"
                );
                fallback
            }
        },
        Err(env::VarError::NotPresent) => fallback,
        Err(err) => {
            warn!(
                env_var = START_WORLD_ENV_VAR,
                error = %err,
                "unable to read start world env var; falling back to default"
            );
            fallback
        }
    }
}

fn resolve_max_fps(lookup: Result<String, env::VarError>, fallback: Option<u32>) -> Option<u32> {
    match lookup {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.eq_ignore_ascii_case("off") {
                return None;
            }
            match trimmed.parse::<u32>() {
                Ok(0) => None,
                Ok(fps) => Some(fps),
                Err(_) => {
                    warn!(
                        env_var = MAX_FPS_ENV_VAR,
                        value = value.as_str(),
                        "invalid fps cap; falling back to config"
                    );
                    fallback
                }
            }
        }
        Err(env::VarError::NotPresent) => fallback,
        Err(err) => {
            warn!(
                env_var = MAX_FPS_ENV_VAR,
                error = %err,
                "unable to read fps cap env var; falling back to config"
            );
            fallback
        }
    }
}

fn resolve_show_fps(lookup: Result<String, env::VarError>) -> bool {
    match lookup {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                warn!(
                    env_var = SHOW_FPS_ENV_VAR,
                    value = value.as_str(),
                    "invalid fps display flag; leaving it off"
                );
                false
            }
        },
        Err(env::VarError::NotPresent) => false,
        Err(err) => {
            warn!(
                env_var = SHOW_FPS_ENV_VAR,
                error = %err,
                "unable to read fps display env var; leaving it off"
            );
            false
        }
    }
}
