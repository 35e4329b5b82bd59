use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Keyboard state for a single window.
///
/// `keys_down` holds what is currently held; `keys_pressed` collects the
/// press transitions since the last [`end_frame`](Self::end_frame).
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
    pub keys_pressed: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        self.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether `key` went down since the last `end_frame`.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    #[test]
    fn press_is_reported_until_frame_ends() {
        let mut input = InputState::default();
        input.apply_event(&key(Key::Escape, KeyState::Pressed, false));
        assert!(input.key_pressed(Key::Escape));
        assert!(input.key_down(Key::Escape));

        input.end_frame();
        assert!(!input.key_pressed(Key::Escape));
        assert!(input.key_down(Key::Escape));
    }

    #[test]
    fn repeat_does_not_count_as_new_press() {
        let mut input = InputState::default();
        input.apply_event(&key(Key::Space, KeyState::Pressed, false));
        input.end_frame();
        input.apply_event(&key(Key::Space, KeyState::Pressed, true));
        assert!(!input.key_pressed(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut input = InputState::default();
        input.apply_event(&key(Key::R, KeyState::Pressed, false));
        input.apply_event(&InputEvent::Focused(false));
        assert!(!input.key_down(Key::R));
    }
}
