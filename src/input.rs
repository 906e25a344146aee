use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::GamePhase;

/// Semantic game actions decoded from raw terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Continue,
    Decline,
    Restart,
    Quit,
}

/// Keys that can be held down for continuous movement.
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Polls for all pending input events and stores one-shot actions.
    /// Should be called once per frame before getting actions.
    pub fn poll_events(&mut self, phase: &GamePhase) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, phase),
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, phase: &GamePhase) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, phase),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: &GamePhase) {
        // Ctrl-C bails out of any screen.
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match phase {
            GamePhase::Playing => {
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.oneshot_actions.push(InputAction::Quit);
                    }
                    // Movement keys - AD or arrows
                    KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                        self.key_state.left = true;
                        self.key_state.right = false;
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                        self.key_state.right = true;
                        self.key_state.left = false;
                    }
                    // Fire key
                    KeyCode::Char(' ') => {
                        self.key_state.fire = true;
                    }
                    _ => {}
                }
            }
            GamePhase::AwaitingContinue => match key_event.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.oneshot_actions.push(InputAction::Continue);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.oneshot_actions.push(InputAction::Decline);
                }
                _ => {}
            },
            GamePhase::GameOver => match key_event.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.oneshot_actions.push(InputAction::Restart);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.oneshot_actions.push(InputAction::Quit);
                }
                _ => {}
            },
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot).
    /// Must be called after poll_events().
    pub fn get_actions(&self, phase: &GamePhase) -> Vec<InputAction> {
        let mut actions = Vec::new();

        actions.extend_from_slice(&self.oneshot_actions);

        // Held keys only drive the ship while actually playing.
        if *phase == GamePhase::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        actions
    }
}
