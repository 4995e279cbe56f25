//! Stateless rendering of a [`BoardView`].

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::games::noughts::Position;
use crate::presentation::{BoardView, CellView};

/// Renders the board, status lines and key help.
pub fn draw(frame: &mut Frame, view: &BoardView, cursor: Position, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(7), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("noughts and crosses")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], view, cursor);
    draw_status(frame, chunks[2], view, notice);

    let help = Paragraph::new("arrows/1-9 select, enter play, r reset, q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &BoardView, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], view, cursor, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, view: &BoardView, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        let index = row * 3 + col;
        draw_cell(frame, cols[col * 2], &view.cells()[index], cursor.to_index() == index);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: &CellView, selected: bool) {
    let base_style = match cell.glyph() {
        "X" => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        "O" => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::DarkGray),
    };

    let base_style = if *cell.highlighted() {
        base_style.bg(Color::Green)
    } else if *cell.disabled() {
        base_style.add_modifier(Modifier::DIM)
    } else {
        base_style
    };

    let style = if selected {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", cell.glyph()), style)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, view: &BoardView, notice: Option<&str>) {
    let mut lines = Vec::new();

    if let Some(connection) = view.connection() {
        lines.push(Line::styled(connection.clone(), Style::default().fg(Color::Red)));
    }
    if let Some(waiting) = view.waiting() {
        lines.push(Line::styled(waiting.clone(), Style::default().fg(Color::Yellow)));
    }
    if let Some(congratulations) = view.congratulations() {
        lines.push(Line::styled(
            congratulations.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(current) = view.current() {
        lines.push(Line::from(format!("current: {}", current)));
    }
    if let Some(notice) = notice {
        lines.push(Line::styled(notice.to_string(), Style::default().fg(Color::Magenta)));
    }

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
