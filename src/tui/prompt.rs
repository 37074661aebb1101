use super::input;
use super::layout;
use super::state::{App, StatusKind};
use super::theme::DIM;
use crate::package_manager::{Query, QueryError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    None,
    Quit,
    Search(Query),
}

/// 处理输入框按键
pub fn handle_prompt_key(key: KeyEvent, app: &mut App) -> PromptAction {
    let prompt = &mut app.prompt;
    match key.code {
        KeyCode::Esc => return PromptAction::Quit,
        KeyCode::Enter => {
            return match Query::parse(&prompt.input) {
                Ok(query) => PromptAction::Search(query),
                // 空输入结束会话
                Err(QueryError::Empty) => PromptAction::Quit,
                Err(e) => {
                    log::info!("拒绝查询 {:?}: {}", prompt.input, e);
                    app.set_status(StatusKind::Error, format!("Invalid query: {e}"));
                    PromptAction::None
                }
            };
        }
        KeyCode::Char(c) => {
            // 忽略带 Ctrl/Alt 修饰的字符
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return PromptAction::None;
            }
            input::str_insert_char(&mut prompt.input, &mut prompt.cursor, c);
        }
        KeyCode::Backspace => input::str_delete_back(&mut prompt.input, &mut prompt.cursor),
        KeyCode::Delete => input::str_delete_forward(&mut prompt.input, &mut prompt.cursor),
        KeyCode::Left => prompt.cursor = prompt.cursor.saturating_sub(1),
        KeyCode::Right => {
            if prompt.cursor < prompt.input.chars().count() {
                prompt.cursor += 1;
            }
        }
        KeyCode::Home => prompt.cursor = 0,
        KeyCode::End => prompt.cursor = prompt.input.chars().count(),
        _ => {}
    }
    PromptAction::None
}

// ===== 渲染 =====

pub fn render_prompt(f: &mut Frame, app: &App) {
    let chunks = layout::main_layout(f.area());
    layout::render_header(f, "aurseek · pacman + AUR", chunks[0]);

    let body = layout::centered(chunks[1], 72, 6);

    if let Some(keyword) = &app.searching {
        let waiting = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Searching for '{keyword}'..."),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Please wait.", Style::default().fg(DIM))),
        ])
        .alignment(Alignment::Center);
        f.render_widget(waiting, body);
        layout::render_footer(f, "Searching...", chunks[2]);
        return;
    }

    let [label, input_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .areas(body);

    f.render_widget(
        Paragraph::new("Enter package name to search (Esc to quit):")
            .style(Style::default().fg(Color::White)),
        label,
    );
    input::render_input_box(f, &app.prompt.input, app.prompt.cursor, ">", input_area);

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Yellow,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        f.render_widget(
            Paragraph::new(status.text.as_str()).style(Style::default().fg(color)),
            status_area,
        );
    }

    layout::render_footer(f, "Enter search | empty Enter / Esc quit | Ctrl+C quit", chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_prompt_key(key(KeyCode::Char(c)), app), PromptAction::None);
        }
    }

    #[test]
    fn enter_submits_trimmed_query() {
        let mut app = App::new();
        type_text(&mut app, " vim ");
        match handle_prompt_key(key(KeyCode::Enter), &mut app) {
            PromptAction::Search(q) => assert_eq!(q.as_str(), "vim"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_enter_quits() {
        let mut app = App::new();
        type_text(&mut app, "   ");
        assert_eq!(handle_prompt_key(key(KeyCode::Enter), &mut app), PromptAction::Quit);
    }

    #[test]
    fn esc_quits() {
        let mut app = App::new();
        assert_eq!(handle_prompt_key(key(KeyCode::Esc), &mut app), PromptAction::Quit);
    }

    #[test]
    fn invalid_query_sets_status_and_stays() {
        let mut app = App::new();
        type_text(&mut app, "-Syu");
        assert_eq!(handle_prompt_key(key(KeyCode::Enter), &mut app), PromptAction::None);
        let status = app.status.expect("status");
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("'-'"));
    }

    #[test]
    fn cursor_editing() {
        let mut app = App::new();
        type_text(&mut app, "vm");
        handle_prompt_key(key(KeyCode::Left), &mut app);
        type_text(&mut app, "i");
        assert_eq!(app.prompt.input, "vim");
        handle_prompt_key(key(KeyCode::Home), &mut app);
        handle_prompt_key(key(KeyCode::Delete), &mut app);
        assert_eq!(app.prompt.input, "im");
        handle_prompt_key(key(KeyCode::End), &mut app);
        handle_prompt_key(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.prompt.input, "i");
    }

    #[test]
    fn ctrl_chars_are_not_inserted() {
        let mut app = App::new();
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        handle_prompt_key(ctrl_u, &mut app);
        assert!(app.prompt.input.is_empty());
    }
}
