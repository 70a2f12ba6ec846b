//! Label-colored transcript printer for agent output.
//!
//! Lines beginning with a known label (`Thought:`, `Action:`, ...)
//! print in that label's color; continuation lines inherit the color
//! of the most recent label.

use colored::{Color, Colorize};

fn label_color(label: &str) -> Option<Color> {
    match label {
        "Agent" => Some(Color::BrightBlue),
        "Thought" => Some(Color::Cyan),
        "Action" => Some(Color::Yellow),
        "Pause" => Some(Color::Magenta),
        "Observation" => Some(Color::Green),
        "Answer" => Some(Color::Blue),
        _ => None,
    }
}

/// Leading `Label` of a `Label: ...` line, if present.
fn leading_label(line: &str) -> Option<&str> {
    let (head, _) = line.split_once(':')?;
    if !head.is_empty() && head.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Some(head)
    } else {
        None
    }
}

/// Render a transcript with per-label coloring.
pub fn render_transcript(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut current: Option<Color> = None;

    for line in message.lines() {
        if let Some(label) = leading_label(line) {
            current = label_color(label);
        }
        match current {
            Some(color) => out.push_str(&line.color(color).to_string()),
            None => out.push_str(line),
        }
        out.push('\n');
    }

    out
}

/// Print a transcript to stdout with per-label coloring.
pub fn print_transcript(message: &str) {
    print!("{}", render_transcript(message));
}
