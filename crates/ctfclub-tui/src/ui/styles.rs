//! Terminal palette: green-on-black console with amber for keys and live events.

use ratatui::style::{Color, Modifier, Style};

use ctfclub_core::winners::Medal;
use ctfclub_core::EventStatus;

pub const NEON: Color = Color::Rgb(0, 255, 153);
pub const MINT: Color = Color::Rgb(110, 200, 150);
pub const AMBER: Color = Color::Rgb(230, 170, 40);
pub const ALERT_RED: Color = Color::Rgb(220, 70, 70);
pub const DIM_GREY: Color = Color::Rgb(120, 130, 125);
pub const CURSOR_BG: Color = Color::Rgb(18, 40, 32);
pub const CONSOLE_BG: Color = Color::Rgb(12, 18, 24);
pub const GOLD: Color = Color::Rgb(250, 204, 21);
pub const SILVER: Color = Color::Rgb(190, 196, 204);
pub const BRONZE: Color = Color::Rgb(205, 127, 50);

fn fg(color: Color) -> Style {
    Style::new().fg(color)
}

fn bold(color: Color) -> Style {
    fg(color).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    bold(NEON)
}

pub fn plain() -> Style {
    fg(Color::Gray)
}

pub fn dim() -> Style {
    fg(DIM_GREY)
}

/// Section captions inside overlays
pub fn section() -> Style {
    fg(AMBER)
}

pub fn ok() -> Style {
    fg(MINT)
}

pub fn alert() -> Style {
    bold(ALERT_RED)
}

/// Row or control under the cursor
pub fn cursor_row() -> Style {
    Style::new().bg(CURSOR_BG).fg(NEON).add_modifier(Modifier::BOLD)
}

pub fn field(focused: bool) -> Style {
    if focused { cursor_row() } else { plain() }
}

pub fn tab(selected: bool) -> Style {
    if selected {
        bold(NEON).add_modifier(Modifier::UNDERLINED)
    } else {
        dim()
    }
}

pub fn frame_border(focused: bool) -> Style {
    fg(if focused { NEON } else { DIM_GREY })
}

pub fn status_bar() -> Style {
    Style::new().bg(CONSOLE_BG).fg(Color::Gray)
}

pub fn key_hint() -> Style {
    bold(AMBER)
}

pub fn key_desc() -> Style {
    plain()
}

/// Badge color per event status
pub fn status_badge(status: EventStatus) -> Style {
    match status {
        EventStatus::Upcoming => fg(NEON),
        EventStatus::Active => bold(AMBER).add_modifier(Modifier::SLOW_BLINK),
        EventStatus::Past => dim(),
    }
}

/// Podium rank colors; unplaced finishers stay plain
pub fn medal(medal: Option<Medal>) -> Style {
    match medal {
        Some(Medal::Gold) => bold(GOLD),
        Some(Medal::Silver) => bold(SILVER),
        Some(Medal::Bronze) => bold(BRONZE),
        None => plain(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badges_are_distinct() {
        let badges: Vec<Style> = EventStatus::ALL.iter().map(|s| status_badge(*s)).collect();
        assert_ne!(badges[0], badges[1]);
        assert_ne!(badges[1], badges[2]);
        assert_ne!(badges[0], badges[2]);
    }
}
