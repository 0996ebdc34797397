use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::models::ThoughtData;

/// How a step presents itself in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThoughtKind {
    Revision,
    Branch,
    Thought,
}

impl ThoughtKind {
    pub fn of(step: &ThoughtData) -> Self {
        if step.is_revision == Some(true) {
            ThoughtKind::Revision
        } else if step.branch_from_thought.is_some() {
            ThoughtKind::Branch
        } else {
            ThoughtKind::Thought
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThoughtKind::Revision => "Revision",
            ThoughtKind::Branch => "Branch",
            ThoughtKind::Thought => "Thought",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ThoughtKind::Revision => "🔄",
            ThoughtKind::Branch => "🌿",
            ThoughtKind::Thought => "💭",
        }
    }
}

/// Header line for a step, e.g. `🌿 Branch 2/3 (from thought 1, ID: alt)`
pub fn thought_header(step: &ThoughtData) -> String {
    let kind = ThoughtKind::of(step);
    let context = match kind {
        ThoughtKind::Revision => format!(" (revising thought {})", display_opt(step.revises_thought)),
        ThoughtKind::Branch => format!(
            " (from thought {}, ID: {})",
            display_opt(step.branch_from_thought),
            display_opt(step.branch_id.as_deref())
        ),
        ThoughtKind::Thought => String::new(),
    };
    format!(
        "{} {} {}/{}{}",
        kind.icon(),
        kind.label(),
        step.thought_number,
        step.total_thoughts,
        context
    )
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Render a step as a bordered box sized to its widest line
pub fn format_thought(step: &ThoughtData) -> String {
    draw(step, false)
}

fn draw(step: &ThoughtData, color: bool) -> String {
    let header = thought_header(step);
    let lines: Vec<&str> = if step.thought.is_empty() {
        vec![""]
    } else {
        step.thought.lines().collect()
    };

    let width = lines
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0);
    let border = "─".repeat(width + 2);

    let header_line = if color {
        let padding = " ".repeat(width - header.width());
        let painted = match ThoughtKind::of(step) {
            ThoughtKind::Revision => header.bright_yellow(),
            ThoughtKind::Branch => header.bright_green(),
            ThoughtKind::Thought => header.bright_blue(),
        };
        format!("│ {}{} │", painted, padding)
    } else {
        format!("│ {} │", pad(&header, width))
    };

    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(format!("┌{}┐", border));
    out.push(header_line);
    out.push(format!("├{}┤", border));
    for line in lines {
        out.push(format!("│ {} │", pad(line, width)));
    }
    out.push(format!("└{}┘", border));
    out.join("\n")
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

/// Console display of recorded thoughts.
///
/// Writes to stderr so stdout stays free for the MCP transport.
#[derive(Debug, Clone, Copy)]
pub struct VisualOutput {
    colored: bool,
}

impl VisualOutput {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn render(&self, step: &ThoughtData) -> String {
        draw(step, self.colored)
    }

    pub fn thought(&self, step: &ThoughtData) {
        eprintln!("\n{}", self.render(step));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_precedence() {
        let mut step = ThoughtData::new("x", 1, 1, true);
        assert_eq!(ThoughtKind::of(&step), ThoughtKind::Thought);

        step.branch_from_thought = Some(1);
        assert_eq!(ThoughtKind::of(&step), ThoughtKind::Branch);

        step.is_revision = Some(true);
        assert_eq!(ThoughtKind::of(&step), ThoughtKind::Revision);

        step.is_revision = Some(false);
        assert_eq!(ThoughtKind::of(&step), ThoughtKind::Branch);
    }

    #[test]
    fn test_headers() {
        let mut step = ThoughtData::new("x", 2, 4, true);
        assert_eq!(thought_header(&step), "💭 Thought 2/4");

        step.branch_from_thought = Some(1);
        step.branch_id = Some("alt".to_string());
        assert_eq!(thought_header(&step), "🌿 Branch 2/4 (from thought 1, ID: alt)");

        step.is_revision = Some(true);
        step.revises_thought = Some(1);
        assert_eq!(thought_header(&step), "🔄 Revision 2/4 (revising thought 1)");
    }

    #[test]
    fn test_box_fits_longer_of_header_and_content() {
        let step = ThoughtData::new("a considerably longer thought body", 1, 3, true);
        let rendered = format_thought(&step);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows.len(), 5);
        let width = rows[0].width();
        assert!(rows.iter().all(|r| r.width() == width));
        assert_eq!(rows[3], "│ a considerably longer thought body │");
        assert!(rows[1].starts_with("│ 💭 Thought 1/3 "));
    }

    #[test]
    fn test_multiline_thought() {
        let step = ThoughtData::new("first\nsecond line", 1, 1, false);
        let rendered = format_thought(&step);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 6);
        assert!(rows[3].starts_with("│ first "));
        assert!(rows[4].starts_with("│ second line "));
    }

    #[test]
    fn test_uncolored_visual_matches_plain_format() {
        let step = ThoughtData::new("plain", 1, 1, false);
        assert_eq!(VisualOutput::new(false).render(&step), format_thought(&step));
    }
}
