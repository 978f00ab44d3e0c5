use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table},
    Frame,
};
use shiftly_core::time::month_label;
use shiftly_core::EntryDto;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header and Main Content Split
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_month_table(f, app, content_chunks[0]);
    draw_day_panel(f, app, content_chunks[1]);

    let status = Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(status, main_chunks[2]);

    let footer = Paragraph::new("h/l: Day | j/k: Week | s/S e/E: Start/End ∓15m | Enter: Save | r: Rate | x: Settle | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);

    match app.input_mode {
        InputMode::EditingRate => draw_rate_popup(f, app, size),
        InputMode::ConfirmingSettle => draw_settle_popup(f, app, size),
        InputMode::Normal => {}
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled("SHIFTLY", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(format!("{}{}", app.currency_symbol, app.view.rate.0), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("/hr", Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_month_table(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .view
        .month_entries
        .iter()
        .map(|entry| {
            let dto = EntryDto::from_entity(entry);
            Row::new(vec![
                Span::raw(dto.date),
                Span::styled(dto.day_of_week, Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} {}", dto.start, dto.start_period)),
                Span::raw(format!("{} {}", dto.end, dto.end_period)),
                Span::styled(dto.hours_worked.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let title = format!(" {} ", month_label(app.view.selected_date));
    let table = Table::new(
        rows,
        [
            Constraint::Length(10), // Date
            Constraint::Length(4),  // Day
            Constraint::Length(9),  // Start
            Constraint::Length(9),  // End
            Constraint::Min(3),     // Hours
        ],
    )
    .header(Row::new(vec!["Date", "Day", "Start", "End", "Hrs"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_day_panel(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Blue));
    let recorded = match &view.active_entry {
        Some(entry) => format!("{} h recorded", entry.hours_worked),
        None => "No shift recorded yet".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            label("Date:   "),
            Span::styled(
                view.selected_date.format("%a %Y-%m-%d").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(recorded, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![label("Start:  "), Span::raw(view.start.to_string())]),
        Line::from(vec![label("End:    "), Span::raw(view.end.to_string())]),
        Line::from(vec![label("Hours:  "), Span::raw(view.preview_hours.to_string())]),
        Line::from(""),
        Line::from(vec![
            label("Current Month Hours: "),
            Span::styled(format!("{} hrs", view.aggregate.total_hours), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            label("Total Amount:        "),
            Span::styled(app.pay_display(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ]),
    ];

    let panel = Paragraph::new(lines)
        .block(Block::default().title(" Day ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(panel, area);
}

fn draw_rate_popup(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered(area, 36, 3);
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(" Hourly rate ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(input, popup);

    let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
    f.set_cursor_position((popup.x + 1 + before_cursor.width() as u16, popup.y + 1));
}

fn draw_settle_popup(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered(area, 44, 5);
    let text = vec![
        Line::from(Span::styled(
            format!("Settle {} pay", month_label(app.view.selected_date)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Deletes {} shift(s). Proceed? (y/n)", app.view.month_entries.len())),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
