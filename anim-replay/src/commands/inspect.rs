//! Describe the contents of a scene file

use std::path::Path;

use actor_anim::scene::SceneStep;
use actor_anim::{AnimationClip, ClipLibrary};
use anyhow::{Context, Result};
use console::Style;

use super::load_scene;
use crate::utils::{clip_table, render_hierarchy};

pub fn execute(scene_path: &Path, pattern: Option<&str>, no_color: bool) -> Result<()> {
    let scene = load_scene(scene_path)?;
    let hierarchy = scene.hierarchy().context("Invalid skeleton")?;
    let library = scene.library().context("Invalid clip")?;
    let heading = if no_color {
        Style::new()
    } else {
        Style::new().bold().yellow()
    };

    println!("{}", heading.apply_to(format!("Skeleton ({} joints)", hierarchy.len())));
    print!("{}", render_hierarchy(&hierarchy, no_color));
    println!();

    let clips = select_clips(&library, pattern);
    println!("{}", heading.apply_to(format!("Clips ({} of {})", clips.len(), library.len())));
    clip_table(clips).printstd();
    println!();

    let config = &scene.config;
    println!("{}", heading.apply_to("Config"));
    println!("  Default transition: {} frames", config.default_transition_frames);
    println!("  Not-ready expiry: {} frames", config.not_ready_expiry_frames);
    println!("  Minimum transition: {} frames", config.min_transition_frames);
    match config.non_blending_slot {
        Some(slot) => println!("  Non-blending slot: {slot}"),
        None => println!("  Non-blending slot: none"),
    }
    println!();

    println!("{}", heading.apply_to(format!("Script ({} steps)", scene.steps.len())));
    for (i, step) in scene.steps.iter().enumerate() {
        println!("  {i:>3}: {}", describe_step(step));
    }

    Ok(())
}

fn select_clips<'a>(library: &'a ClipLibrary, pattern: Option<&str>) -> Vec<&'a AnimationClip> {
    match pattern {
        Some(pattern) => library.find(pattern).into_iter().map(|clip| &**clip).collect(),
        None => library.iter().map(|clip| &**clip).collect(),
    }
}

fn describe_step(step: &SceneStep) -> String {
    match step {
        SceneStep::Play { request } => {
            let ids: Vec<_> = request.clips.iter().map(ToString::to_string).collect();
            format!("play {}", ids.join(", "))
        }
        SceneStep::Enqueue {
            routine,
            blocking,
            high_priority,
            ..
        } => {
            let mut flags = Vec::new();
            if *blocking {
                flags.push("blocking");
            }
            if *high_priority {
                flags.push("high priority");
            }
            if flags.is_empty() {
                format!("enqueue '{}'", routine.name)
            } else {
                format!("enqueue '{}' ({})", routine.name, flags.join(", "))
            }
        }
        SceneStep::Update { frames, repeat } => format!("update {frames} x{repeat}"),
    }
}
