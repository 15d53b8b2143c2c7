use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::app::{App, InputMode};
use crate::tui::AppEvent;

const SCROLL_STEP: u16 = 3;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent, tx: &UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Key(key) => handle_key(app, key, tx),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => {
            if app.input_mode == InputMode::Editing {
                insert_text(app, &text);
            }
        }
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Solved(result) => app.finish_solve(result),
    }
}

fn handle_key(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key, tx),
        InputMode::Editing => handle_editing_mode(app, key, tx),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Enter | KeyCode::Tab => app.start_editing(),
        KeyCode::Char('s') => submit(app, tx),
        KeyCode::Char('d') => {
            if app.can_download() {
                app.download();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(app.answer_height.max(1)),
        KeyCode::PageUp => app.scroll_up(app.answer_height.max(1)),
        KeyCode::Char('g') | KeyCode::Home => app.answer_scroll = 0,
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        KeyCode::Esc => app.dismiss_status(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    let newline = (key.code == KeyCode::Enter && key.modifiers.contains(KeyModifiers::ALT))
        || (key.code == KeyCode::Char('j') && key.modifiers.contains(KeyModifiers::CONTROL));
    if newline {
        insert_text(app, "\n");
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => submit(app, tx),
        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = app.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.input, app.cursor);
            app.input.insert(byte_pos, c);
            app.cursor += 1;
        }
        _ => {}
    }
}

fn insert_text(app: &mut App, text: &str) {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let byte_pos = char_to_byte_index(&app.input, app.cursor);
    app.input.insert_str(byte_pos, &text);
    app.cursor += text.chars().count();
}

/// The "Solve" action: one background call, reported back as `Solved`.
fn submit(app: &mut App, tx: &UnboundedSender<AppEvent>) {
    let Some(question) = app.begin_solve() else {
        return;
    };

    debug!("spawning solve task");
    let solver = app.solver.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = solver.solve(&question).await;
        // The receiver only goes away on shutdown.
        let _ = tx.send(AppEvent::Solved(result));
    });
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_solution = app
        .solution_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_solution {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(SCROLL_STEP),
        MouseEventKind::ScrollUp => app.scroll_up(SCROLL_STEP),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyEventKind;
    use math_agent_core::{Config, Phase};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> AppEvent {
        key_with(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn new_app() -> App {
        App::new(&Config::default())
    }

    fn type_text(app: &mut App, tx: &UnboundedSender<AppEvent>, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)), tx);
        }
    }

    #[test]
    fn char_index_conversion_handles_multibyte() {
        assert_eq!(char_to_byte_index("a√b", 2), 4);
        assert_eq!(char_to_byte_index("ab", 5), 2);
    }

    #[test]
    fn editing_inserts_at_cursor() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = new_app();

        handle_event(&mut app, key(KeyCode::Char('i')), &tx);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.session.phase(), Phase::AwaitingInput);

        type_text(&mut app, &tx, "x=2");
        handle_event(&mut app, key(KeyCode::Left), &tx);
        handle_event(&mut app, key(KeyCode::Left), &tx);
        handle_event(&mut app, key(KeyCode::Backspace), &tx);
        type_text(&mut app, &tx, "y");
        assert_eq!(app.input, "y=2");

        handle_event(&mut app, key_with(KeyCode::Char('j'), KeyModifiers::CONTROL), &tx);
        assert_eq!(app.input, "y\n=2");
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        app.start_editing();

        handle_event(&mut app, AppEvent::Paste("a\r\nb".to_string()), &tx);
        assert_eq!(app.input, "a\nb");
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn empty_submit_warns_without_spawning() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        app.start_editing();

        handle_event(&mut app, key(KeyCode::Enter), &tx);

        assert_eq!(app.session.phase(), Phase::Idle);
        assert!(app.status().is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn submit_reports_back_through_channel() {
        // No API key: the solve fails fast and the failure comes back as an event.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        app.start_editing();
        type_text(&mut app, &tx, "1+1");

        handle_event(&mut app, key(KeyCode::Enter), &tx);
        assert_eq!(app.session.phase(), Phase::Submitted);
        assert_eq!(app.input_mode, InputMode::Normal);

        // A second solve while one is in flight is ignored.
        handle_event(&mut app, key(KeyCode::Char('s')), &tx);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Solved(Err(_))));
        handle_event(&mut app, event, &tx);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn quit_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        handle_event(&mut app, key(KeyCode::Char('q')), &tx);
        assert!(app.should_quit);

        let mut app = new_app();
        app.start_editing();
        handle_event(&mut app, key_with(KeyCode::Char('c'), KeyModifiers::CONTROL), &tx);
        assert!(app.should_quit);
    }

    #[test]
    fn resize_only_triggers_a_redraw() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        app.start_editing();
        type_text(&mut app, &tx, "x+1");

        handle_event(&mut app, AppEvent::Resize, &tx);
        assert_eq!(app.input, "x+1");
        assert_eq!(app.cursor, 3);
        assert_eq!(app.session.phase(), Phase::AwaitingInput);
        assert!(rx.try_recv().is_err());
    }
}
