use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use ctfclub_core::utils::truncate_string;
use ctfclub_core::{empty_message, Event, LoadState};

use crate::app::App;
use crate::ui::styles;

/// Longest title shown in the list before it is cut with "..."
const MAX_LIST_TITLE: usize = 40;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.directory.state() {
        LoadState::NotStarted | LoadState::Loading => {
            render_message(frame, area, "Querying Event Matrix...", styles::heading());
            return;
        }
        LoadState::Failed(reason) => {
            render_message(
                frame,
                area,
                &format!("Could not load events: {}", reason),
                styles::alert(),
            );
            return;
        }
        LoadState::Ready => {}
    }

    let visible = app.visible_events();
    if visible.is_empty() {
        render_message(frame, area, &empty_message(app.filter), styles::dim());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_event_list(frame, app, &visible, chunks[0]);
    render_event_detail(frame, app, visible.get(app.event_selection).copied(), chunks[1]);
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, style: ratatui::style::Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(false));
    let inner_top = area.height / 2;
    let mut lines = vec![Line::from(""); inner_top.saturating_sub(1) as usize];
    lines.push(Line::from(Span::styled(text.to_string(), style)));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_event_list(frame: &mut Frame, app: &App, visible: &[&Event], area: Rect) {
    let now = app.now();

    let header = Row::new([
        Cell::from("Title"),
        Cell::from("Date"),
        Cell::from("Time"),
        Cell::from("Status"),
    ])
    .style(styles::heading())
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let status = event.status_at(now, app.active_window);
            let style = if i == app.event_selection {
                styles::cursor_row()
            } else {
                styles::plain()
            };
            Row::new(vec![
                Cell::from(truncate_string(&event.title, MAX_LIST_TITLE)),
                Cell::from(event.formatted_date()),
                Cell::from(event.formatted_time()),
                Cell::from(Span::styled(status.as_str(), styles::status_badge(status))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(14), // "Mar 01, 2026"
        Constraint::Length(7),
        Constraint::Length(10),
    ];

    let title = format!(
        " Events ({}) - [d]ate [t]itle: {} ",
        visible.len(),
        app.order.label()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::dim())
                .borders(Borders::ALL)
                .border_style(styles::frame_border(true)),
        )
        .row_highlight_style(styles::cursor_row());

    let mut state = TableState::default();
    state.select(Some(app.event_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_event_detail(frame: &mut Frame, app: &App, selected: Option<&Event>, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .title_style(styles::dim())
        .borders(Borders::ALL)
        .border_style(styles::frame_border(false));

    let Some(event) = selected else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let status = event.status_at(app.now(), app.active_window);

    let mut lines = vec![
        Line::from(Span::styled(event.title.clone(), styles::heading())),
        Line::from(Span::styled(
            format!("[{}]", status.as_str().to_uppercase()),
            styles::status_badge(status),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date:  ", styles::dim()),
            Span::raw(event.formatted_date()),
        ]),
        Line::from(vec![
            Span::styled("Time:  ", styles::dim()),
            Span::raw(event.formatted_time()),
        ]),
        Line::from(vec![
            Span::styled("Ends:  ", styles::dim()),
            Span::raw(event.formatted_end()),
        ]),
    ];

    if let Some(link) = event.registration_link.as_deref().filter(|l| !l.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("Link:  ", styles::dim()),
            Span::raw(link.to_string()),
        ]));
    }

    if !event.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(event.description.clone()));
    }

    lines.push(Line::from(""));
    let action = status.call_to_action();
    if status.accepts_registration() {
        lines.push(Line::from(vec![
            Span::styled("[Enter] ", styles::key_hint()),
            Span::styled(action, styles::ok()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(action, styles::dim())));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
