//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let error_height = if app.list.error().is_some() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(error_height),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);
    if let Some(error) = app.list.error() {
        draw_error(frame, error, chunks[1]);
    }
    draw_input(frame, app, chunks[2]);
    draw_tasks(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "Todo list",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.in_flight > 0 {
        spans.push(Span::styled(" ↻", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Error slot, a single line above the list
fn draw_error(frame: &mut Frame, error: &str, area: Rect) {
    let paragraph = Paragraph::new(Span::styled(
        error.to_string(),
        Style::default().fg(Color::Red),
    ));
    frame.render_widget(paragraph, area);
}

/// New-task form
fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Editing;

    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(" Add ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let prefix = "Task: ";
    let line = Line::from(vec![
        Span::styled(prefix, Style::default().add_modifier(Modifier::DIM)),
        Span::raw(app.list.pending_input()),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);

    if is_active {
        let cursor_x = area.x + 1 + prefix.len() as u16 + app.list.pending_input().chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

/// Task list with checkboxes
fn draw_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Normal;

    let items: Vec<ListItem> = app
        .list
        .tasks()
        .iter()
        .map(|task| {
            let (check, title_style) = if task.done {
                (
                    "[x] ",
                    Style::default()
                        .add_modifier(Modifier::CROSSED_OUT)
                        .add_modifier(Modifier::DIM),
                )
            } else {
                ("[ ] ", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(check),
                Span::styled(task.title.clone(), title_style),
            ]))
        })
        .collect();

    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let title = format!(" Tasks ({}) ", app.list.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    if !app.list.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.input_mode {
            InputMode::Normal => {
                "a:add  space:done  d:del  j/k:move  ?:help  q:quit".to_string()
            }
            InputMode::Editing => "enter:add  esc:back".to_string(),
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Calculate centered popup area
    let popup_width = 40.min(area.width.saturating_sub(4));
    let popup_height = 16.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the popup area
    frame.render_widget(ratatui::widgets::Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  gg / G      First / last task"),
        Line::from("  space, x    Toggle done"),
        Line::from("  d           Delete task"),
        Line::from("  a, i        Write a new task"),
        Line::from("  enter       Add task (while writing)"),
        Line::from("  esc         Stop writing"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}
