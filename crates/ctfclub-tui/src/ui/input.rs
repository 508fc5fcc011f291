use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use ctfclub_core::{AttemptState, StatusFilter};

use crate::app::{can_add_field_char, can_add_message_char, App, AppState, ContactFocus, RegistrationFocus, Tab};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::Registering => {
            handle_registration_input(app, key);
            return Ok(false);
        }
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    // Contact fields swallow printable keys, so global keys only apply
    // when no text field has focus
    let typing = app.current_tab == Tab::Contact && app.contact.focus != ContactFocus::Button;

    if !typing {
        match key.code {
            KeyCode::Char('q') => {
                app.state = AppState::ConfirmingQuit;
                return Ok(false);
            }
            KeyCode::Char('?') => {
                app.state = AppState::ShowingHelp;
                return Ok(false);
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Right => {
            app.current_tab = app.current_tab.next();
            return Ok(false);
        }
        KeyCode::Left => {
            app.current_tab = app.current_tab.prev();
            return Ok(false);
        }
        _ => {}
    }

    match app.current_tab {
        Tab::Events => handle_events_input(app, key),
        Tab::Winners => handle_winners_input(app, key),
        Tab::Contact => handle_contact_input(app, key),
    }

    Ok(false)
}

fn handle_events_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as usize) - ('1' as usize);
            app.set_filter(StatusFilter::ALL[index]);
        }
        KeyCode::Tab => {
            app.set_filter(app.filter.next());
        }
        KeyCode::BackTab => {
            app.set_filter(app.filter.prev());
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(true),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(false),
        KeyCode::Char('d') => {
            app.order = app.order.toggle_date();
            app.event_selection = 0;
        }
        KeyCode::Char('t') => {
            app.order = app.order.toggle_title();
            app.event_selection = 0;
        }
        KeyCode::Enter | KeyCode::Char('r') => {
            app.open_registration();
        }
        KeyCode::Esc => {
            app.notice = None;
        }
        _ => {}
    }
}

fn handle_winners_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_winner_selection(true),
        KeyCode::Char('k') | KeyCode::Up => app.move_winner_selection(false),
        KeyCode::Esc => app.current_tab = Tab::Events,
        _ => {}
    }
}

fn handle_registration_input(app: &mut App, key: KeyEvent) {
    let Some(dialog) = app.registration.as_mut() else {
        app.state = AppState::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc => app.close_registration(),
        KeyCode::Down | KeyCode::Tab => dialog.focus = dialog.focus.next(),
        KeyCode::Up | KeyCode::BackTab => dialog.focus = dialog.focus.prev(),
        KeyCode::Enter => match dialog.focus {
            RegistrationFocus::Button => app.submit_registration(),
            other => dialog.focus = other.next(),
        },
        KeyCode::Backspace => app.edit_registration(|field| {
            field.pop();
        }),
        KeyCode::Char(c) => {
            if dialog.coordinator.state() == AttemptState::Submitting {
                return;
            }
            app.edit_registration(|field| {
                if can_add_field_char(field.chars().count(), c) {
                    field.push(c);
                }
            });
        }
        _ => {}
    }
}

fn handle_contact_input(app: &mut App, key: KeyEvent) {
    // After a successful send only "Send Another Message" is live
    if app.contact.coordinator.state() == AttemptState::Succeeded {
        if key.code == KeyCode::Enter {
            app.reset_contact();
        }
        return;
    }

    let focus = app.contact.focus;
    match key.code {
        KeyCode::Esc => {
            app.current_tab = Tab::Events;
        }
        KeyCode::Down | KeyCode::Tab => app.contact.focus = focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.contact.focus = focus.prev(),
        KeyCode::Enter => match focus {
            ContactFocus::Button => app.submit_contact(),
            // Newlines are not accepted; Enter in the message moves on
            other => app.contact.focus = other.next(),
        },
        KeyCode::Backspace => app.edit_contact(|field| {
            field.pop();
        }),
        KeyCode::Char(c) => {
            let is_message = focus == ContactFocus::Message;
            app.edit_contact(|field| {
                let len = field.chars().count();
                let fits = if is_message {
                    can_add_message_char(len, c)
                } else {
                    can_add_field_char(len, c)
                };
                if fits {
                    field.push(c);
                }
            });
        }
        _ => {}
    }
}
