use math_agent_core::{Phase, Report};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::app::{App, InputMode, StatusKind};
use crate::markdown;

const CAPTION: &str = "Enter a math question or expression to get a step-by-step solution.";
const PLACEHOLDER: &str = "e.g., Solve x^2 + 2x + 1 = 0";
/// Input box height including borders
const INPUT_HEIGHT: u16 = 6;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // header, caption, input, solution, status, footer
    let [header_area, caption_area, input_area, solution_area, status_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

    render_header(app, frame, header_area);
    frame.render_widget(
        Paragraph::new(Span::styled(CAPTION, Style::default().fg(Color::DarkGray))),
        caption_area,
    );
    render_input(app, frame, input_area);
    render_solution(app, frame, solution_area);
    render_status(app, frame, status_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Math Agent ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("[{}]", app.model), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Enter your math question ");

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let (cursor_row, cursor_col) = app.cursor_position();

    // Keep the cursor visible by scrolling in both directions
    let col_offset = if inner_width > 0 && cursor_col >= inner_width {
        cursor_col - inner_width + 1
    } else {
        0
    };
    let row_offset = if inner_height > 0 && cursor_row >= inner_height {
        cursor_row - inner_height + 1
    } else {
        0
    };

    let text = if app.input.is_empty() && !editing {
        Text::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(
            app.input
                .split('\n')
                .skip(row_offset)
                .take(inner_height)
                .map(|line| {
                    let visible: String =
                        line.chars().skip(col_offset).take(inner_width).collect();
                    Line::from(visible)
                })
                .collect::<Vec<_>>(),
        )
    };

    let input = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan))
        .block(block);
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((
            area.x + 1 + (cursor_col - col_offset) as u16,
            area.y + 1 + (cursor_row - row_offset) as u16,
        ));
    }
}

fn render_solution(app: &mut App, frame: &mut Frame, area: Rect) {
    app.solution_area = Some(area);
    app.answer_height = area.height.saturating_sub(2);
    app.answer_width = area.width.saturating_sub(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Solution ");

    let text = match app.session.phase() {
        Phase::Submitted => {
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            Text::from(Span::styled(
                format!("Solving with AI{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        }
        Phase::DisplayingResult | Phase::ReportReady => {
            markdown::solution_text(app.session.answer().unwrap_or_default())
        }
        Phase::Idle | Phase::AwaitingInput => Text::from(Span::styled(
            "Press i to type a question, then Enter to solve.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let solution = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll, 0));
    frame.render_widget(solution, area);

    let total = app.answer_line_count();
    if total > app.answer_height {
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(app.answer_height) as usize)
            .position(app.answer_scroll as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let Some((kind, message)) = app.status() else {
        return;
    };
    let (label, color) = match kind {
        StatusKind::Info => (" SAVED ", Color::Green),
        StatusKind::Warning => (" WARNING ", Color::Yellow),
        StatusKind::Error => (" ERROR ", Color::Red),
    };

    let line = Line::from(vec![
        Span::styled(label, Style::default().bg(color).fg(Color::Black).bold()),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match app.input_mode {
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" solve ", label_style),
            Span::styled(" Alt+Enter ", key_style),
            Span::styled(" newline ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" stop typing ", label_style),
        ],
        InputMode::Normal => {
            let mut hints = vec![
                Span::styled(" i ", key_style),
                Span::styled(" edit ", label_style),
                Span::styled(" s ", key_style),
                Span::styled(" solve ", label_style),
            ];
            if app.can_download() {
                hints.extend(vec![
                    Span::styled(" d ", key_style),
                    Span::styled(format!(" download {} ", Report::FILE_NAME), label_style),
                    Span::styled(" j/k ", key_style),
                    Span::styled(" scroll ", label_style),
                ]);
            }
            hints.extend(vec![
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ]);
            hints
        }
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}
