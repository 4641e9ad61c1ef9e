use std::fmt::Write;

use marquee_core::{View, ViewKind};

/// Indented tree dump of a view, for demos and debugging.
pub fn dump_view(view: &View) -> String {
    let mut out = String::new();
    walk(view, 0, &mut out);
    out
}

fn walk(view: &View, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let label = match &view.kind {
        ViewKind::Box => "Box".to_string(),
        ViewKind::Row => "Row".to_string(),
        ViewKind::Column => "Column".to_string(),
        ViewKind::Stack => "Stack".to_string(),
        ViewKind::Text { text, .. } => format!("Text({text:?})"),
        ViewKind::Image { source } => format!("Image({source})"),
        ViewKind::Spinner => "Spinner".to_string(),
    };
    let mut geometry = String::new();
    if let Some(offset) = view.modifier.offset {
        let _ = write!(geometry, " @({:.0},{:.0})", offset.x, offset.y);
    }
    if let Some(size) = view.modifier.size {
        let _ = write!(geometry, " {:.0}x{:.0}", size.width, size.height);
    }
    let _ = writeln!(out, "{indent}{label}{geometry}");
    for child in &view.children {
        walk(child, depth + 1, out);
    }
}
