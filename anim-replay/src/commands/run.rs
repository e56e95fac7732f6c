//! Replay a scene and report joint transforms

use std::path::Path;

use actor_anim::Actor;
use anyhow::{Context, Result, bail};
use log::info;
use serde::Serialize;

use super::load_scene;
use crate::cli::OutputFormat;

/// Solved transform of one joint after an update
#[derive(Debug, Serialize)]
struct JointRecord {
    joint: usize,
    position: [f32; 3],
    rotation: [f32; 4],
}

/// Every reported joint after one update
#[derive(Debug, Serialize)]
struct UpdateRecord {
    update: usize,
    joints: Vec<JointRecord>,
}

impl UpdateRecord {
    fn capture(update: usize, actor: &Actor, joints: &[usize]) -> Self {
        let joints = joints
            .iter()
            .filter_map(|&joint| {
                let transform = actor.joint_world_transform(joint)?;
                Some(JointRecord {
                    joint,
                    position: transform.position.to_array(),
                    rotation: transform.rotation.to_array(),
                })
            })
            .collect();
        Self { update, joints }
    }
}

pub fn execute(scene_path: &Path, joints: &[usize], format: OutputFormat) -> Result<()> {
    let scene = load_scene(scene_path)?;
    let num_joints = scene.hierarchy().context("Invalid skeleton")?.len();

    if let Some(&joint) = joints.iter().find(|&&joint| joint >= num_joints) {
        bail!("Joint {joint} out of range: skeleton has {num_joints} joints");
    }
    let selected: Vec<usize> = if joints.is_empty() {
        (0..num_joints).collect()
    } else {
        joints.to_vec()
    };

    let mut records = Vec::new();
    scene
        .replay(|update, actor| records.push(UpdateRecord::capture(update, actor, &selected)))
        .context("Replay failed")?;
    info!("Replayed {} updates over {num_joints} joints", records.len());

    match format {
        OutputFormat::Text => print!("{}", render_text(&records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }

    Ok(())
}

fn render_text(records: &[UpdateRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&format!("update {}\n", record.update));
        for joint in &record.joints {
            let [px, py, pz] = joint.position;
            let [rx, ry, rz, rw] = joint.rotation;
            output.push_str(&format!(
                "  joint {}: position ({px:.4}, {py:.4}, {pz:.4}) rotation ({rx:.4}, {ry:.4}, {rz:.4}, {rw:.4})\n",
                joint.joint
            ));
        }
    }
    output
}
