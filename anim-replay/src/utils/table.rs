//! Clip table rendering

use actor_anim::AnimationClip;
use prettytable::{Cell, Row, Table, format};

const CLIP_HEADERS: [&str; 4] = ["Id", "Slot", "Length", "Tracks"];

/// Build a table with one row per clip: id, slot, length and driven joints
pub fn clip_table<'a>(clips: impl IntoIterator<Item = &'a AnimationClip>) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        CLIP_HEADERS
            .iter()
            .map(|title| Cell::new(title).style_spec("b"))
            .collect(),
    ));

    for clip in clips {
        table.add_row(Row::new(
            clip_cells(clip).iter().map(|cell| Cell::new(cell)).collect(),
        ));
    }
    table
}

fn clip_cells(clip: &AnimationClip) -> [String; 4] {
    let driven = (0..clip.num_joints())
        .filter(|&joint| clip.has_track(joint))
        .count();
    [
        clip.id().to_string(),
        clip.id().slot_index().to_string(),
        format!("{:.1}", clip.length()),
        format!("{driven}/{}", clip.num_joints()),
    ]
}
