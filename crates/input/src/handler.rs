//! Turns terminal key events into timestamped engine input events.
//!
//! Terminals that implement the kitty keyboard protocol report presses, repeats
//! and releases separately; the engine runs its own auto-repeat, so repeats are
//! dropped and the edges are forwarded as they come. Other terminals only report
//! presses (and re-send them while a key is held). Each of those becomes a
//! press immediately followed by a release on the same frame, i.e. a tap.

use std::collections::VecDeque;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, KeyAction};
use crate::types::InputEvent;

#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    release_events: bool,
    redraw: bool,
}

impl InputCollector {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            redraw: false,
        }
    }

    /// Translate one key event, appending engine events stamped with `frame`.
    pub fn collect(&mut self, key: KeyEvent, frame: i64, queue: &mut VecDeque<InputEvent>) {
        let Some(action) = handle_key_event(key) else {
            return;
        };

        let command = match action {
            KeyAction::Redraw => {
                if key.kind == KeyEventKind::Press {
                    self.redraw = true;
                }
                return;
            }
            KeyAction::Game(command) => command,
        };

        match (self.release_events, key.kind) {
            (true, KeyEventKind::Press) => queue.push_back(InputEvent::pressed(command, frame)),
            (true, KeyEventKind::Release) => queue.push_back(InputEvent::released(command, frame)),
            (true, KeyEventKind::Repeat) | (false, KeyEventKind::Release) => {}
            (false, KeyEventKind::Press | KeyEventKind::Repeat) => {
                queue.push_back(InputEvent::pressed(command, frame));
                queue.push_back(InputEvent::released(command, frame));
            }
        }
    }

    /// Whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}
