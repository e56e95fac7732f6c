//! Command implementations

pub mod digest;
pub mod inspect;
pub mod run;

use std::path::Path;

use actor_anim::Scene;
use anyhow::{Context, Result};

/// Load a scene file, naming the path on failure
pub fn load_scene(path: &Path) -> Result<Scene> {
    Scene::from_path(path).with_context(|| format!("Failed to load scene {}", path.display()))
}
