//! Stable digest over a replay's solved transforms

use std::path::Path;

use actor_anim::Actor;
use anyhow::{Context, Result};
use log::info;
use xxhash_rust::xxh3::Xxh3;

use super::load_scene;

/// Feed every joint's world position and rotation, as little-endian bits
fn digest_pose(hasher: &mut Xxh3, actor: &Actor) {
    for state in actor.joint_states() {
        let position = state.world_position.to_array();
        let rotation = state.world_rotation.to_array();
        for value in position.into_iter().chain(rotation) {
            hasher.update(&value.to_bits().to_le_bytes());
        }
    }
}

pub fn execute(scene_path: &Path) -> Result<()> {
    let scene = load_scene(scene_path)?;

    let mut hasher = Xxh3::new();
    let mut updates = 0;
    scene
        .replay(|_, actor| {
            updates += 1;
            digest_pose(&mut hasher, actor);
        })
        .context("Replay failed")?;

    info!("Digested {updates} updates");
    println!("{:016x}", hasher.digest());
    Ok(())
}
