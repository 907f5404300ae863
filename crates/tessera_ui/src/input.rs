//! Input handling.
//!
//! The platform layer feeds raw events into an [`InputState`]; gameplay
//! reads held keys and once-per-press edges through [`InputBindings`].
//!
//! Auto-repeat never fires a second edge: a key already held ignores
//! further key-down events until it is released.

use std::collections::{HashMap, VecDeque};

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl MouseButton {
    const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];
}

/// Keyboard key.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Minus,
    Equals,
}

/// One raw platform event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key went down. `repeat` is set for OS auto-repeat.
    KeyDown {
        /// The key.
        key: Key,
        /// Auto-repeat flag from the platform.
        repeat: bool,
    },
    /// Key went up.
    KeyUp(Key),
    /// Cursor moved, in screen pixels.
    MouseMove {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Mouse button went down.
    ButtonDown(MouseButton),
    /// Mouse button went up.
    ButtonUp(MouseButton),
    /// Wheel moved; positive scrolls down.
    Wheel(f32),
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current mouse X position.
    pub mouse_x: f32,
    /// Current mouse Y position.
    pub mouse_y: f32,
    /// Mouse buttons pressed this frame.
    buttons_pressed: u8,
    /// Mouse buttons released this frame.
    buttons_released: u8,
    /// Mouse buttons currently held.
    buttons_down: u8,
    /// Vertical wheel delta this frame.
    scroll_delta: f32,
    /// Keys pressed this frame, in press order.
    keys_pressed: Vec<Key>,
    /// Keys released this frame.
    keys_released: Vec<Key>,
    /// Keys currently held.
    keys_down: Vec<Key>,
    /// Cursor moved this frame.
    mouse_moved: bool,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.buttons_pressed = 0;
        self.buttons_released = 0;
        self.scroll_delta = 0.0;
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_moved = false;
    }

    /// Applies one platform event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key, repeat } => {
                if !repeat {
                    self.key_down(key);
                }
            }
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::MouseMove { x, y } => self.set_mouse_pos(x, y),
            InputEvent::ButtonDown(button) => self.mouse_button_down(button),
            InputEvent::ButtonUp(button) => self.mouse_button_up(button),
            InputEvent::Wheel(delta) => self.scroll(delta),
        }
    }

    /// Updates mouse position.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32) {
        self.mouse_moved |= x != self.mouse_x || y != self.mouse_y;
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Records a mouse button press. Ignored while already held.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        if self.buttons_down & mask == 0 {
            self.buttons_pressed |= mask;
            self.buttons_down |= mask;
        }
    }

    /// Records a mouse button release.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_released |= mask;
        self.buttons_down &= !mask;
    }

    /// Records wheel input.
    pub fn scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Records a key press. Ignored while the key is already held.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_down.push(key);
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        if self.keys_down.contains(&key) {
            self.keys_released.push(key);
            self.keys_down.retain(|&k| k != key);
        }
    }

    /// Returns true if the mouse button was pressed this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button was released this frame.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        (self.buttons_released & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns true if the cursor moved this frame.
    #[must_use]
    pub fn mouse_moved(&self) -> bool {
        self.mouse_moved
    }

    /// Vertical wheel delta accumulated this frame.
    #[must_use]
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    #[must_use]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Keys pressed this frame, in press order.
    #[must_use]
    pub fn keys_pressed(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// Returns the bit mask for a button.
    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Supplies platform events. Implemented by the window layer.
pub trait InputSource {
    /// Feeds everything that happened since the last poll into `state`.
    fn poll(&mut self, state: &mut InputState);
}

/// Replays a fixed script of events, one batch per poll.
///
/// Used by the headless runner and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one frame's worth of events.
    #[must_use]
    pub fn then(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.frames.push_back(events.into_iter().collect());
        self
    }

    /// Appends `count` frames with no events.
    #[must_use]
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    /// Frames left to replay.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, state: &mut InputState) {
        if let Some(events) = self.frames.pop_front() {
            for event in events {
                state.apply(event);
            }
        }
    }
}

// ============================================================================
// BINDINGS
// ============================================================================

/// Gameplay intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Accelerate left while held.
    MoveLeft,
    /// Accelerate right while held.
    MoveRight,
    /// Jump, once per press.
    Jump,
    /// Mine the block under the cursor.
    Mine,
    /// Place the selected block under the cursor.
    Place,
    /// Select grass for placing.
    SelectGrass,
    /// Select dirt for placing.
    SelectDirt,
    /// Select wood for placing.
    SelectWood,
    /// Zoom the camera in one step.
    ZoomIn,
    /// Zoom the camera out one step.
    ZoomOut,
}

/// Key and button → action map.
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    keys: HashMap<Key, Action>,
    buttons: HashMap<MouseButton, Action>,
}

impl InputBindings {
    /// No bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// `A`/`D` move, `Space` jumps, left mines, right places, `1`/`2`/`3`
    /// select, `=`/`-` zoom.
    #[must_use]
    pub fn standard() -> Self {
        let mut bindings = Self::empty();
        bindings
            .subscribe(Key::A, Action::MoveLeft)
            .subscribe(Key::D, Action::MoveRight)
            .subscribe(Key::Space, Action::Jump)
            .subscribe(Key::Num1, Action::SelectGrass)
            .subscribe(Key::Num2, Action::SelectDirt)
            .subscribe(Key::Num3, Action::SelectWood)
            .subscribe(Key::Equals, Action::ZoomIn)
            .subscribe(Key::Minus, Action::ZoomOut)
            .subscribe_button(MouseButton::Left, Action::Mine)
            .subscribe_button(MouseButton::Right, Action::Place);
        bindings
    }

    /// Binds a key, replacing any previous binding of that key.
    pub fn subscribe(&mut self, key: Key, action: Action) -> &mut Self {
        self.keys.insert(key, action);
        self
    }

    /// Binds a mouse button, replacing any previous binding of that button.
    pub fn subscribe_button(&mut self, button: MouseButton, action: Action) -> &mut Self {
        self.buttons.insert(button, action);
        self
    }

    /// Removes a key binding.
    pub fn unsubscribe(&mut self, key: Key) -> Option<Action> {
        self.keys.remove(&key)
    }

    /// Action bound to a key.
    #[must_use]
    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.keys.get(&key).copied()
    }

    /// True if any key or button bound to `action` is held.
    #[must_use]
    pub fn held(&self, state: &InputState, action: Action) -> bool {
        self.keys
            .iter()
            .any(|(&key, &bound)| bound == action && state.key_held(key))
            || self
                .buttons
                .iter()
                .any(|(&button, &bound)| bound == action && state.mouse_down(button))
    }

    /// Actions whose key or button was pressed this frame.
    ///
    /// Keys come first in press order, then buttons.
    #[must_use]
    pub fn pressed(&self, state: &InputState) -> Vec<Action> {
        let keys = state
            .keys_pressed()
            .iter()
            .filter_map(|key| self.keys.get(key).copied());
        let buttons = MouseButton::ALL
            .into_iter()
            .filter(|&button| state.mouse_clicked(button))
            .filter_map(|button| self.buttons.get(&button).copied());
        keys.chain(buttons).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left);
        assert!(input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_auto_repeat_fires_once() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown { key: Key::Space, repeat: false });
        assert!(input.key_pressed(Key::Space));

        input.begin_frame();
        input.apply(InputEvent::KeyDown { key: Key::Space, repeat: true });
        input.apply(InputEvent::KeyDown { key: Key::Space, repeat: false });
        assert!(!input.key_pressed(Key::Space));
        assert!(input.key_held(Key::Space));

        input.apply(InputEvent::KeyUp(Key::Space));
        input.begin_frame();
        input.apply(InputEvent::KeyDown { key: Key::Space, repeat: false });
        assert!(input.key_pressed(Key::Space));
    }

    #[test]
    fn test_scroll_accumulates_per_frame() {
        let mut input = InputState::new();
        input.apply(InputEvent::Wheel(1.0));
        input.apply(InputEvent::Wheel(2.0));
        assert_eq!(input.scroll_delta(), 3.0);
        input.begin_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }

    #[test]
    fn test_bindings_held_and_pressed() {
        let bindings = InputBindings::standard();
        let mut input = InputState::new();
        input.key_down(Key::D);
        input.key_down(Key::Num3);
        input.mouse_button_down(MouseButton::Right);

        assert!(bindings.held(&input, Action::MoveRight));
        assert!(!bindings.held(&input, Action::MoveLeft));
        assert_eq!(
            bindings.pressed(&input),
            vec![Action::MoveRight, Action::SelectWood, Action::Place]
        );

        input.begin_frame();
        assert!(bindings.pressed(&input).is_empty());
        assert!(bindings.held(&input, Action::MoveRight));
    }

    #[test]
    fn test_subscribe_rebinds() {
        let mut bindings = InputBindings::standard();
        bindings.subscribe(Key::W, Action::Jump);
        bindings.subscribe(Key::Space, Action::Mine);
        assert_eq!(bindings.action_for(Key::W), Some(Action::Jump));
        assert_eq!(bindings.action_for(Key::Space), Some(Action::Mine));
        assert_eq!(bindings.unsubscribe(Key::W), Some(Action::Jump));
        assert_eq!(bindings.action_for(Key::W), None);
    }

    #[test]
    fn test_scripted_input_replays_frames() {
        let mut source = ScriptedInput::new()
            .then([InputEvent::KeyDown { key: Key::A, repeat: false }])
            .idle(1)
            .then([InputEvent::KeyUp(Key::A)]);
        let mut state = InputState::new();

        source.poll(&mut state);
        assert!(state.key_pressed(Key::A));
        state.begin_frame();
        source.poll(&mut state);
        assert!(state.key_held(Key::A));
        state.begin_frame();
        source.poll(&mut state);
        assert!(!state.key_held(Key::A));
        assert_eq!(source.remaining(), 0);
    }
}
