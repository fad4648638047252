use std::io;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.snapshot`(...) for the newly selected deployment
    LoadSnapshot,
    /// Wait the configured delay, then take a fresh snapshot
    SimulateUpdate,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::DeploymentSelect => match key.code {
            Up | Char('k') => {
                if app.deployment_list_index > 0 {
                    app.deployment_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.deployment_list_index + 1 < app.deployments.len() {
                    app.deployment_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                if app.select_current_deployment().is_some() {
                    action = Action::LoadSnapshot;
                }
            }
            _ => {}
        },

        Screen::Dashboard => match key.code {
            Char('u' | 'r') | Enter => {
                action = Action::SimulateUpdate;
            }
            Left | Esc | Char('b') => {
                app.back_to_deployments();
            }
            _ => {}
        },
    }
    action
}

/// Drop every event that is already queued, returning how many were dropped.
///
/// Keys pressed while a refresh was awaited would otherwise replay as soon
/// as the loop polls again.
pub(crate) fn discard_queued<P, R>(mut poll: P, mut read: R) -> io::Result<usize>
where
    P: FnMut() -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    let mut discarded = 0;
    while poll()? {
        read()?;
        discarded += 1;
    }
    Ok(discarded)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::app::test_app;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_shortcuts() {
        let mut app = test_app();

        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &mut app), Action::Quit);
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &mut app
            ),
            Action::Quit
        );
    }

    #[test]
    fn list_navigation_is_bounded() {
        let mut app = test_app();

        handle_key_event(press(KeyCode::Up), &mut app);
        assert_eq!(app.deployment_list_index, 0);

        for _ in 0..5 {
            handle_key_event(press(KeyCode::Down), &mut app);
        }
        assert_eq!(app.deployment_list_index, app.deployments.len() - 1);
    }

    #[test]
    fn enter_selects_and_requests_snapshot() {
        let mut app = test_app();

        assert_eq!(
            handle_key_event(press(KeyCode::Enter), &mut app),
            Action::LoadSnapshot
        );
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn update_key_on_dashboard() {
        let mut app = test_app();
        app.preselect("wizard");

        assert_eq!(
            handle_key_event(press(KeyCode::Char('u')), &mut app),
            Action::SimulateUpdate
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Esc), &mut app),
            Action::None
        );
        assert_eq!(app.screen, Screen::DeploymentSelect);
    }

    #[test]
    fn keys_typed_during_refresh_are_dropped() {
        let queue = RefCell::new(VecDeque::from([
            Event::Key(press(KeyCode::Char('u'))),
            Event::Key(press(KeyCode::Char('u'))),
            Event::Key(press(KeyCode::Enter)),
        ]));

        let discarded = discard_queued(
            || Ok(!queue.borrow().is_empty()),
            || {
                queue
                    .borrow_mut()
                    .pop_front()
                    .ok_or_else(|| io::Error::other("queue drained"))
            },
        )
        .expect("in-memory queue");

        assert_eq!(discarded, 3);
        assert!(queue.borrow().is_empty());
    }

    #[test]
    fn nothing_queued_reads_nothing() {
        let discarded = discard_queued(
            || Ok(false),
            || Err(io::Error::other("read without pending event")),
        )
        .expect("empty queue");

        assert_eq!(discarded, 0);
    }

    #[test]
    fn poll_failure_is_reported() {
        let result = discard_queued(
            || Err(io::Error::other("terminal gone")),
            || Err(io::Error::other("unreachable")),
        );

        assert!(result.is_err());
    }
}
