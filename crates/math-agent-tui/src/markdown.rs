//! Just enough markdown for model answers: headings, bullets, `**bold**`
//! and `` `code` ``. Everything else passes through as plain text.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

pub fn render(text: &str) -> Vec<Line<'static>> {
    text.lines().map(render_line).collect()
}

/// Everything the solution pane shows for an answer: heading, blank line,
/// then the rendered markdown. Drawing and scroll bounds both measure this.
pub fn solution_text(answer: &str) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Solution:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(render(answer));
    Text::from(lines)
}

fn render_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();

    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
        let heading = trimmed[hashes..].trim().to_string();
        return Line::from(Span::styled(
            heading,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    for marker in ["* ", "- ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            let indent = " ".repeat(line.len() - trimmed.len());
            let mut spans = vec![Span::raw(format!("{}• ", indent))];
            spans.extend(inline_spans(rest));
            return Line::from(spans);
        }
    }

    let spans = inline_spans(line);
    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

/// Convert **bold** and `code` runs to styled spans
fn inline_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        let closing: Option<(&str, Style)> = if c == '*' && chars.peek() == Some(&'*') {
            chars.next();
            Some(("**", Style::default().add_modifier(Modifier::BOLD)))
        } else if c == '`' {
            Some(("`", Style::default().fg(Color::Yellow)))
        } else {
            None
        };

        let Some((delimiter, style)) = closing else {
            current_text.push(c);
            continue;
        };

        // Collect up to the matching delimiter
        let mut inner = String::new();
        let mut found_close = false;
        while let Some(c) = chars.next() {
            if delimiter == "**" && c == '*' && chars.peek() == Some(&'*') {
                chars.next();
                found_close = true;
                break;
            }
            if delimiter == "`" && c == '`' {
                found_close = true;
                break;
            }
            inner.push(c);
        }

        if found_close && !inner.is_empty() {
            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }
            spans.push(Span::styled(inner, style));
        } else {
            // No closing delimiter, treat as literal
            current_text.push_str(delimiter);
            current_text.push_str(&inner);
            if found_close {
                current_text.push_str(delimiter);
            }
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn headings_lose_their_hashes() {
        let lines = render("### Step 1: Factor");
        assert_eq!(plain(&lines[0]), "Step 1: Factor");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn hashtag_without_space_is_text() {
        assert_eq!(plain(&render("#1 answer")[0]), "#1 answer");
    }

    #[test]
    fn bullets_get_a_dot() {
        assert_eq!(plain(&render("* x = -1")[0]), "• x = -1");
        assert_eq!(plain(&render("  - nested")[0]), "  • nested");
    }

    #[test]
    fn bold_runs_are_styled() {
        let line = &render("root is **x = -1** (double)")[0];
        assert_eq!(plain(line), "root is x = -1 (double)");
        assert_eq!(line.spans.len(), 3);
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn unclosed_bold_stays_literal() {
        assert_eq!(plain(&render("2 ** 3")[0]), "2 ** 3");
    }

    #[test]
    fn one_line_per_input_line() {
        assert_eq!(render("a\n\nb").len(), 3);
    }
}
