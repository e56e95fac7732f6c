//! Tree rendering for joint hierarchies

use actor_anim::JointHierarchy;
use console::Style;

/// Render every root of a hierarchy and its descendants
pub fn render_hierarchy(hierarchy: &JointHierarchy, no_color: bool) -> String {
    let mut output = String::new();
    let roots: Vec<_> = hierarchy.roots().collect();
    for (i, root) in roots.iter().enumerate() {
        render_joint(hierarchy, *root, &mut output, "", i + 1 == roots.len(), 0, no_color);
    }
    output
}

fn joint_label(hierarchy: &JointHierarchy, index: usize) -> String {
    match hierarchy.joint(index).and_then(|joint| joint.name.as_deref()) {
        Some(name) => format!("[{index}] {name}"),
        None => format!("[{index}]"),
    }
}

fn render_joint(
    hierarchy: &JointHierarchy,
    index: usize,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    no_color: bool,
) {
    let style = if no_color {
        Style::new()
    } else if depth == 0 {
        Style::new().bold().cyan()
    } else {
        Style::new().green()
    };
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    output.push_str(prefix);
    output.push_str(connector);
    output.push_str(&style.apply_to(joint_label(hierarchy, index)).to_string());
    if let Some(joint) = hierarchy.joint(index) {
        let t = joint.bind_translation;
        let detail = format!(" bind ({:.3}, {:.3}, {:.3})", t.x, t.y, t.z);
        if no_color {
            output.push_str(&detail);
        } else {
            output.push_str(&Style::new().dim().apply_to(detail).to_string());
        }
    }
    output.push('\n');

    let child_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    let children: Vec<_> = hierarchy.children(index).collect();
    for (i, child) in children.iter().enumerate() {
        render_joint(
            hierarchy,
            *child,
            output,
            &child_prefix,
            i + 1 == children.len(),
            depth + 1,
            no_color,
        );
    }
}
