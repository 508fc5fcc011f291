use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use ctfclub_core::winners::{hall_of_fame, EventWinners, Placement};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_event_list(frame, app, chunks[0]);
    render_podium(frame, app.selected_winners(), chunks[1]);
}

fn render_event_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = hall_of_fame()
        .iter()
        .map(|event| {
            ListItem::new(vec![
                Line::from(Span::styled(event.title, styles::plain())),
                Line::from(Span::styled(format!("  {}", event.formatted_date()), styles::dim())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Hall of Fame ")
                .title_style(styles::heading())
                .borders(Borders::ALL)
                .border_style(styles::frame_border(true)),
        )
        .highlight_style(styles::cursor_row());

    let mut state = ListState::default();
    state.select(Some(app.winner_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_podium(frame: &mut Frame, selected: Option<&EventWinners>, area: Rect) {
    let block = Block::default()
        .title(" Podium ")
        .title_style(styles::dim())
        .borders(Borders::ALL)
        .border_style(styles::frame_border(false));

    let Some(event) = selected else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    frame.render_widget(Paragraph::new(podium_lines(event)).block(block), area);
}

fn podium_lines(event: &EventWinners) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(event.title, styles::heading())),
        Line::from(Span::styled(event.formatted_date(), styles::dim())),
        Line::from(""),
    ];
    lines.extend(event.podium().into_iter().map(placement_line));

    let others = event.honourable_mentions();
    if !others.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Also placed", styles::section())));
        lines.extend(others.into_iter().map(placement_line));
    }
    lines
}

fn placement_line(placement: &Placement) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!(" #{:<3}", placement.rank), styles::medal(placement.medal())),
        Span::styled(placement.player_name, styles::plain()),
    ];
    if let Some(team) = placement.team_name {
        spans.push(Span::styled(format!(" ({})", team), styles::dim()));
    }
    spans.push(Span::styled(
        format!("  {} pts", placement.formatted_score()),
        styles::ok(),
    ));
    Line::from(spans)
}
