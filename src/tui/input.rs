use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// 渲染单行输入框，光标处反色显示
pub fn render_input_box(f: &mut Frame, content: &str, cursor: usize, label: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let chars: Vec<char> = content.chars().collect();
    let cursor = cursor.min(chars.len());
    let before: String = chars[..cursor].iter().collect();
    let (cursor_char, after) = match chars.get(cursor) {
        Some(c) => (c.to_string(), chars[cursor + 1..].iter().collect()),
        None => (" ".to_string(), String::new()),
    };

    let spans = vec![
        Span::styled(
            format!("{label} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(before, Style::default().fg(Color::White)),
        Span::styled(cursor_char, Style::default().fg(Color::Black).bg(Color::White)),
        Span::styled(after, Style::default().fg(Color::White)),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(paragraph, area);
}

// ===== 文本编辑工具函数 =====

/// UTF-8 安全的字符位置转字节位置
pub fn char_to_byte(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// 在光标处插入字符并右移光标
pub fn str_insert_char(s: &mut String, cursor: &mut usize, c: char) {
    let byte_pos = char_to_byte(s, *cursor);
    s.insert(byte_pos, c);
    *cursor += 1;
}

/// Backspace: 删除光标前的字符
pub fn str_delete_back(s: &mut String, cursor: &mut usize) {
    if *cursor > 0 {
        *cursor -= 1;
        let byte_pos = char_to_byte(s, *cursor);
        let next_byte_pos = char_to_byte(s, *cursor + 1);
        s.drain(byte_pos..next_byte_pos);
    }
}

/// Delete: 删除光标后的字符
pub fn str_delete_forward(s: &mut String, cursor: &mut usize) {
    let char_count = s.chars().count();
    if *cursor < char_count {
        let byte_pos = char_to_byte(s, *cursor);
        let next_byte_pos = char_to_byte(s, *cursor + 1);
        s.drain(byte_pos..next_byte_pos);
    }
}
