//! Terminal rendering of the status panel

use colored::Colorize;
use launcher_status::{ServiceStatus, StatusColor, StatusSnapshot};
use serde_json::{json, Value};
use std::fmt::Write;

const DOT: &str = "●";
const BULLET: &str = "•";

fn paint(text: &str, color: StatusColor, use_color: bool) -> String {
    if use_color {
        let (r, g, b) = color.rgb();
        text.truecolor(r, g, b).to_string()
    } else {
        text.to_string()
    }
}

fn write_section(out: &mut String, title: &str, services: &[&ServiceStatus], use_color: bool) {
    let _ = writeln!(out, "{}", title);
    if services.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    for service in services {
        let bullet = paint(BULLET, service.color, use_color);
        if use_color {
            let _ = writeln!(out, "  {} {}", bullet, service.display_name);
        } else {
            let _ = writeln!(out, "  {} {} [{}]", bullet, service.display_name, service.color);
        }
    }
}

/// Render the overall indicator plus essential and non-essential lists.
///
/// Without color the per-service color name is appended to each row.
pub fn render_panel(snapshot: &StatusSnapshot, use_color: bool) -> String {
    let overall = snapshot.overall_color();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Service status: {} {}",
        paint(DOT, overall, use_color),
        overall
    );
    let _ = writeln!(out);

    let (essential, non_essential) = snapshot.partition();
    write_section(&mut out, "Essential", &essential, use_color);
    write_section(&mut out, "Non-essential", &non_essential, use_color);

    let _ = writeln!(out);
    match snapshot.fetched_at() {
        Some(at) => {
            let _ = writeln!(out, "Last checked: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => {
            let _ = writeln!(out, "Last checked: never");
        }
    }

    out
}

/// Snapshot as JSON, including the derived overall color.
pub fn snapshot_json(snapshot: &StatusSnapshot) -> Value {
    json!({
        "overall": snapshot.overall_color(),
        "fetched_at": snapshot.fetched_at(),
        "services": snapshot.statuses(),
    })
}
