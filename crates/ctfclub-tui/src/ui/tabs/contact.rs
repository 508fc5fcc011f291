use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use ctfclub_core::{AttemptState, SubmitOutcome};

use crate::app::{App, ContactFocus};
use crate::ui::render::{button_line, field_line};
use crate::ui::styles;

/// Visible characters per message line in the form
const MESSAGE_WRAP: usize = 48;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_form(frame, app, chunks[0]);
    render_info(frame, chunks[1]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.contact.coordinator.snapshot();
    let focus = app.contact.focus;

    let block = Block::default()
        .title(" Send a Direct Message ")
        .title_style(styles::heading())
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true));

    if snapshot.state == AttemptState::Succeeded {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  Message Sent!", styles::ok())),
            Line::from(Span::styled(
                "  Thanks for reaching out. We'll be in touch soon.",
                styles::dim(),
            )),
            Line::from(""),
            button_line("Send Another Message", true, 4),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let mut lines = vec![
        Line::from(""),
        field_line("Name", &snapshot.form.name, 32, focus == ContactFocus::Name),
        field_line("Email", &snapshot.form.email, 32, focus == ContactFocus::Email),
        Line::from(""),
        Line::from(Span::styled(
            "  Message",
            if focus == ContactFocus::Message {
                styles::heading()
            } else {
                styles::dim()
            },
        )),
    ];
    lines.extend(message_lines(&snapshot.form.message, focus == ContactFocus::Message));
    lines.push(Line::from(""));

    let label = if snapshot.state == AttemptState::Submitting {
        "Sending..."
    } else {
        "Send Message"
    };
    lines.push(button_line(label, focus == ContactFocus::Button, 10));

    let error = match (&snapshot.validation, &snapshot.outcome) {
        (Some(e), _) => Some(e.to_string()),
        (None, Some(SubmitOutcome::Failure(_))) => {
            Some("Something went wrong. Please try again.".to_string())
        }
        _ => None,
    };
    if let Some(error) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", error), styles::alert())));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Message body split into fixed-width rows, cursor on the last one
fn message_lines(message: &str, focused: bool) -> Vec<Line<'static>> {
    let chars: Vec<char> = message.chars().collect();
    let mut rows: Vec<String> = chars
        .chunks(MESSAGE_WRAP)
        .map(|chunk| chunk.iter().collect())
        .collect();
    if rows.is_empty() {
        rows.push(String::new());
    }
    if focused {
        if let Some(last) = rows.last_mut() {
            last.push('▌');
        }
    }
    rows.into_iter()
        .map(|row| {
            Line::from(vec![
                Span::raw("  "),
                Span::styled(row, styles::field(focused)),
            ])
        })
        .collect()
}

fn render_info(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Get in Touch", styles::heading())),
        Line::from(""),
        Line::from(Span::styled(
            "Questions about an event, sponsorship, or a workshop idea? Drop us a line.",
            styles::plain(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Messages are read by the organisers; expect a reply by email.",
            styles::dim(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(false));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lines_wrap_and_cursor() {
        let message = "x".repeat(MESSAGE_WRAP + 3);
        let lines = message_lines(&message, true);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[1].content, "xxx▌");

        let empty = message_lines("", false);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].spans[1].content, "");
    }
}
