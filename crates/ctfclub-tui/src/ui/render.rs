use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use ctfclub_core::{AttemptState, StatusFilter, SubmitOutcome};

use crate::app::{App, AppState, RegistrationFocus, Tab};

use super::styles;
use super::tabs::{contact, events, winners};

const LOGO: [&str; 3] = [
    "     ╔═╗╔╦╗╔═╗  ╔═╗╦  ╦ ╦╔╗ ",
    "     ║   ║ ╠╣   ║  ║  ║ ║╠╩╗",
    "     ╚═╝ ╩ ╚    ╚═╝╩═╝╚═╝╚═╝",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::Registering => render_registration_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  CTF Club // Event Matrix";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::heading()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::dim());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::dim()));
        }
        let style = if app.current_tab == *tab {
            styles::tab(true)
        } else {
            styles::dim()
        };
        spans.push(Span::styled(tab.title(), style));
    }

    // Status selector on the right, with per-status counts
    if app.current_tab == Tab::Events {
        let counts = app.directory.counts(app.now(), app.active_window);
        let labels: Vec<(String, bool)> = StatusFilter::ALL
            .iter()
            .enumerate()
            .map(|(i, filter)| {
                (
                    format!("[{}] {} ({})", i + 1, filter.label(), counts.for_filter(*filter)),
                    *filter == app.filter,
                )
            })
            .collect();

        let main_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let selector_width: usize = labels.iter().map(|(l, _)| l.len()).sum::<usize>()
            + (labels.len() - 1) * 3;
        let padding = (area.width as usize).saturating_sub(main_width + selector_width + 2);
        spans.push(Span::raw(" ".repeat(padding)));

        for (i, (label, selected)) in labels.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", styles::dim()));
            }
            let style = if selected {
                styles::tab(true)
            } else {
                styles::dim()
            };
            spans.push(Span::styled(label, style));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::dim());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Events => events::render(frame, app, area),
        Tab::Winners => winners::render(frame, app, area),
        Tab::Contact => contact::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.current_tab {
        Tab::Events => "[←/→] tabs | [q]uit",
        Tab::Winners => "[j/k] event | [Esc] back",
        Tab::Contact => "[Esc] back | [Tab] next field",
    };

    let (left_text, left_style) = match &app.notice {
        Some(notice) => {
            let style = if notice.is_error {
                styles::alert()
            } else {
                styles::ok()
            };
            (format!(" {} {} ", notice.title, notice.detail), style)
        }
        None => (format!(" Sorted: {} ", app.order.label()), styles::dim()),
    };

    let right_text = format!(" {} ", shortcuts);
    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::dim()),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar()),
        area,
    );
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::key_hint()),
        Span::styled(desc, styles::key_desc()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut help_text: Vec<Line> = LOGO
        .iter()
        .map(|l| Line::from(Span::styled(*l, styles::heading())))
        .collect();
    help_text.extend([
        Line::from(Span::styled(
            format!("              version {}", version),
            styles::dim(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::section())),
        help_line("←/→", "Events / Hall of Fame / Contact"),
        help_line("j/k ↑/↓", "Move selection"),
        help_line("Esc", "Close dialog / go back"),
        Line::from(""),
        Line::from(Span::styled(" Events Tab", styles::section())),
        help_line("1-4", "All / upcoming / active / past"),
        help_line("Tab", "Next status filter"),
        help_line("d/t", "Sort by date/title (again to flip)"),
        help_line("Enter/r", "Register for an upcoming event"),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::section())),
        help_line("Tab", "Next field"),
        help_line("Enter", "Submit when the button is focused"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::dim()),
            Span::styled("?", styles::key_hint()),
            Span::styled(" or ", styles::dim()),
            Span::styled("Esc", styles::key_hint()),
            Span::styled(" to close", styles::dim()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// One labelled text field. `width` is the visible field width.
pub fn field_line<'a>(label: &'a str, value: &str, width: usize, focused: bool) -> Line<'a> {
    // Keep the tail visible while typing past the field width
    let visible: String = {
        let chars: Vec<char> = value.chars().collect();
        let start = chars.len().saturating_sub(width.saturating_sub(1));
        chars[start..].iter().collect()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<7}[", label), styles::dim()),
        Span::styled(
            format!("{:<width$}", format!("{}{}", visible, cursor), width = width),
            styles::field(focused),
        ),
        Span::styled("]", styles::dim()),
    ])
}

/// Centered submit button, pointer arrows when focused
pub fn button_line(label: &str, focused: bool, indent: usize) -> Line<'static> {
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    Line::from(vec![
        Span::raw(format!("{}[", " ".repeat(indent))),
        Span::styled(text, styles::field(focused)),
        Span::raw("]"),
    ])
}

fn render_registration_overlay(frame: &mut Frame, app: &App) {
    let Some(dialog) = app.registration.as_ref() else {
        return;
    };
    let snapshot = dialog.coordinator.snapshot();
    let registration = dialog.coordinator.submission();

    let message = match (&snapshot.validation, &snapshot.outcome) {
        (Some(e), _) => Some(e.to_string()),
        (None, Some(SubmitOutcome::Failure(reason))) => {
            Some(format!("Registration failed ({}). Try again.", reason))
        }
        _ => None,
    };

    let height = if message.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(56, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" Register for: {}", registration.event_title()),
            styles::heading(),
        )),
        Line::from(""),
        field_line("Name", &snapshot.form.name, 36, dialog.focus == RegistrationFocus::Name),
        field_line("Email", &snapshot.form.email, 36, dialog.focus == RegistrationFocus::Email),
        field_line("Team", &snapshot.form.team_name, 36, dialog.focus == RegistrationFocus::Team),
        Line::from(Span::styled("         team name is optional", styles::dim())),
        Line::from(""),
    ];

    let label = if snapshot.state == AttemptState::Submitting {
        "Submitting..."
    } else {
        "Confirm Registration"
    };
    lines.push(button_line(label, dialog.focus == RegistrationFocus::Button, 14));

    if let Some(message) = message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {}", message), styles::alert())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true))
        .title(" [Esc] close ")
        .title_style(styles::dim())
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|l| Line::from(Span::styled(*l, styles::heading())))
        .collect();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::section(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::dim()),
            Span::styled("[Y]", styles::key_hint()),
            Span::styled(" to quit, ", styles::dim()),
            Span::styled("[N]", styles::key_hint()),
            Span::styled(" to cancel", styles::dim()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
