use super::layout;
use super::theme::{AUR, BRIGHT_WHITE, DESC_DIM, DIM, REPO, SEL_BG};
use super::viewport::{Action, Viewport};
use crate::package_manager::{SearchResult, Source};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// 浏览界面按键映射
pub fn action_for(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc | KeyCode::Char('q') => Action::Cancel,
        _ => return None,
    };
    Some(action)
}

// ===== 渲染 =====

pub fn render_results(f: &mut Frame, viewport: &Viewport) {
    let chunks = layout::main_layout(f.area());

    let Viewport::Browsing { results, state, .. } = viewport else {
        layout::render_header(f, "No results found", chunks[0]);
        layout::render_footer(f, "Esc return", chunks[2]);
        return;
    };

    layout::render_header(
        f,
        &format!(
            "Found {} results · {} pacman / {} AUR",
            results.len(),
            results.count_by(Source::Local),
            results.count_by(Source::Remote)
        ),
        chunks[0],
    );

    let block = Block::default()
        .title(format!(" {}/{} ", state.highlight() + 1, results.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let padded = inner.inner(Margin {
        horizontal: 1,
        vertical: 0,
    });
    let width = padded.width as usize;

    let range = state.visible_range(results.len());
    let lines: Vec<Line> = results
        .iter()
        .enumerate()
        .skip(range.start)
        .take(range.len())
        .map(|(i, result)| result_line(result, i == state.highlight(), width))
        .collect();
    f.render_widget(Paragraph::new(lines), padded);

    if results.len() > state.page_size() {
        render_scrollbar(f, chunks[1], results.len(), state.first_visible());
    }

    layout::render_footer(
        f,
        "↑↓/jk move | PgUp/PgDn page | Enter install | Esc/q back",
        chunks[2],
    );
}

fn result_line(result: &SearchResult, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "► " } else { "  " };
    let tag = format!("{:<8}", format!("[{}]", result.source()));
    let tag_color = match result.source() {
        Source::Local => REPO,
        Source::Remote => AUR,
    };

    let fixed = marker.width() + tag.width() + 1;
    let name = layout::fit_width(result.name(), width.saturating_sub(fixed).max(1));
    let rest = width.saturating_sub(fixed + name.width() + 3);
    let description = if rest > 0 {
        format!(" · {}", layout::fit_width(result.description(), rest))
    } else {
        String::new()
    };

    if selected {
        let bg = Style::default().bg(SEL_BG);
        Line::from(vec![
            Span::styled(marker, bg.fg(BRIGHT_WHITE).add_modifier(Modifier::BOLD)),
            Span::styled(tag, bg.fg(tag_color).add_modifier(Modifier::BOLD)),
            Span::styled(" ", bg),
            Span::styled(name, bg.fg(BRIGHT_WHITE).add_modifier(Modifier::BOLD)),
            Span::styled(description, bg.fg(DESC_DIM)),
        ])
    } else {
        Line::from(vec![
            Span::raw(marker),
            Span::styled(tag, Style::default().fg(tag_color)),
            Span::raw(" "),
            Span::styled(name, Style::default().fg(Color::White)),
            Span::styled(description, Style::default().fg(DIM)),
        ])
    }
}

fn render_scrollbar(f: &mut Frame, area: Rect, total: usize, position: usize) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);
    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            horizontal: 0,
            vertical: 1,
        }),
        &mut scrollbar_state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn navigation_keys_map_to_actions() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(action_for(key(KeyCode::Up)), Some(Action::Up));
        assert_eq!(action_for(key(KeyCode::Char('j'))), Some(Action::Down));
        assert_eq!(action_for(key(KeyCode::Enter)), Some(Action::Select));
        assert_eq!(action_for(key(KeyCode::Esc)), Some(Action::Cancel));
        assert_eq!(action_for(key(KeyCode::Char('q'))), Some(Action::Cancel));
        assert_eq!(action_for(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn result_line_fits_width() {
        let result = SearchResult::new(
            Source::Remote,
            "a-really-long-package-name-that-goes-on",
            Some("and an even longer description that will not fit"),
        );
        let line = result_line(&result, true, 40);
        assert!(line.width() <= 40, "width {}", line.width());
    }
}
