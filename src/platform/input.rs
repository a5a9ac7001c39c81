//! Input snapshot and hotkey table
//!
//! DOM listeners only record what happened; nothing here touches game state.
//! Once per frame [`InputState::sample`] folds held keys and the commands
//! queued since the last frame into a [`TickInput`].

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::sim::{BuildingKind, TickInput};

/// One-shot action a hotkey can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
    Recycle,
    Grab,
    Place,
    CancelBuild,
    Select(BuildingKind),
}

impl Command {
    /// Parse a command name such as `"recycle"` or `"build_tree"`
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        let cmd = match name.as_str() {
            "start" => Command::Start,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "restart" => Command::Restart,
            "quit" => Command::Quit,
            "recycle" => Command::Recycle,
            "grab" => Command::Grab,
            "place" => Command::Place,
            "cancel" | "cancel_build" => Command::CancelBuild,
            other => {
                let kind = other.strip_prefix("build_")?;
                Command::Select(BuildingKind::from_name(kind)?)
            }
        };
        Some(cmd)
    }

    fn apply(self, input: &mut TickInput) {
        match self {
            Command::Start => input.start = true,
            Command::Pause => input.pause = true,
            Command::Resume => input.resume = true,
            Command::Restart => input.restart = true,
            Command::Quit => input.quit = true,
            Command::Recycle => input.recycle = true,
            Command::Grab => input.grab = true,
            Command::Place => input.place = true,
            Command::CancelBuild => input.cancel_build = true,
            Command::Select(kind) => input.select_building = Some(kind),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Hotkey {
    command: Command,
    prevent_default: bool,
}

/// Keys that scroll the page unless suppressed
const SCROLL_KEYS: [&str; 5] = [" ", "arrowup", "arrowdown", "arrowleft", "arrowright"];

/// Browser `KeyboardEvent.key` values compare case-insensitively ("W" == "w")
fn normalize(key: &str) -> String {
    key.to_lowercase()
}

/// Keyboard and pointer state accumulated between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<String>,
    hotkeys: HashMap<String, Hotkey>,
    /// Canvas-relative pointer position in pixels
    pointer: Vec2,
    buttons_down: [bool; 3],
    /// Accumulated wheel delta since the last `take_wheel`
    wheel: f32,
    /// Commands queued since the last sample
    pending: TickInput,
}

impl InputState {
    /// Empty state with the default key bindings
    pub fn new() -> Self {
        let mut input = Self::default();
        input.register_hotkey("Enter", Command::Start, false);
        input.register_hotkey("Escape", Command::Pause, true);
        input.register_hotkey("p", Command::Pause, false);
        input.register_hotkey("r", Command::Recycle, false);
        input.register_hotkey(" ", Command::Grab, true);
        input.register_hotkey("e", Command::Place, false);
        input.register_hotkey("x", Command::CancelBuild, false);
        input.register_hotkey("1", Command::Select(BuildingKind::Recycler), false);
        input.register_hotkey("2", Command::Select(BuildingKind::Tree), false);
        input.register_hotkey("3", Command::Select(BuildingKind::OxygenGenerator), false);
        input.register_hotkey("n", Command::Restart, false);
        input.register_hotkey("q", Command::Quit, false);
        input
    }

    /// Bind `key` to `command`, replacing any previous binding
    pub fn register_hotkey(&mut self, key: &str, command: Command, prevent_default: bool) {
        self.hotkeys.insert(
            normalize(key),
            Hotkey {
                command,
                prevent_default,
            },
        );
    }

    /// Bind by command name. Unknown names are logged and ignored.
    pub fn register_named(&mut self, key: &str, command: &str, prevent_default: bool) -> bool {
        match Command::from_name(command) {
            Some(cmd) => {
                self.register_hotkey(key, cmd, prevent_default);
                true
            }
            None => {
                log::warn!("Ignoring hotkey {:?}: unknown command {:?}", key, command);
                false
            }
        }
    }

    pub fn unregister_hotkey(&mut self, key: &str) -> bool {
        self.hotkeys.remove(&normalize(key)).is_some()
    }

    pub fn hotkey(&self, key: &str) -> Option<Command> {
        self.hotkeys.get(&normalize(key)).map(|h| h.command)
    }

    /// Record a key press. Returns true if the browser default should be suppressed.
    ///
    /// Auto-repeat presses don't re-trigger the bound command.
    pub fn key_down(&mut self, key: &str) -> bool {
        let key = normalize(key);
        let fresh = self.keys_down.insert(key.clone());
        let mut suppress = SCROLL_KEYS.contains(&key.as_str());
        if let Some(hotkey) = self.hotkeys.get(&key) {
            if fresh {
                log::debug!("Hotkey {:?} -> {:?}", key, hotkey.command);
                hotkey.command.apply(&mut self.pending);
            }
            suppress |= hotkey.prevent_default;
        }
        suppress
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys_down.remove(&normalize(key));
    }

    pub fn is_key_down(&self, key: &str) -> bool {
        self.keys_down.contains(&normalize(key))
    }

    /// Forget held keys and buttons (window lost focus)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.buttons_down = [false; 3];
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn pointer_down(&mut self, button: usize) {
        if let Some(b) = self.buttons_down.get_mut(button) {
            *b = true;
        }
    }

    pub fn pointer_up(&mut self, button: usize) {
        if let Some(b) = self.buttons_down.get_mut(button) {
            *b = false;
        }
    }

    pub fn is_button_down(&self, button: usize) -> bool {
        self.buttons_down.get(button).copied().unwrap_or(false)
    }

    /// Primary click places the selected building (ignored outside build mode)
    pub fn click(&mut self, button: usize) {
        if button == 0 {
            Command::Place.apply(&mut self.pending);
        }
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y.is_finite() {
            self.wheel += delta_y;
        }
    }

    /// Wheel movement since the last call
    pub fn take_wheel(&mut self) -> f32 {
        std::mem::take(&mut self.wheel)
    }

    /// Planar movement from WASD / arrow keys, unnormalized
    pub fn movement(&self) -> Vec2 {
        let axis = |pos: [&str; 2], neg: [&str; 2]| {
            let p = pos.iter().any(|k| self.is_key_down(k)) as i32;
            let n = neg.iter().any(|k| self.is_key_down(k)) as i32;
            (p - n) as f32
        };
        Vec2::new(
            axis(["d", "ArrowRight"], ["a", "ArrowLeft"]),
            axis(["w", "ArrowUp"], ["s", "ArrowDown"]),
        )
    }

    /// Build this frame's input and clear queued commands
    pub fn sample(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.movement = self.movement();
        input.boost = self.is_key_down("Shift");
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_from_held_keys() {
        let mut input = InputState::new();
        input.key_down("W");
        input.key_down("ArrowLeft");
        assert_eq!(input.sample().movement, Vec2::new(-1.0, 1.0));

        // Held keys persist across samples
        assert_eq!(input.sample().movement, Vec2::new(-1.0, 1.0));

        input.key_down("s");
        input.key_up("ArrowLeft");
        assert_eq!(input.sample().movement, Vec2::ZERO);
    }

    #[test]
    fn test_hotkeys_are_edge_triggered() {
        let mut input = InputState::new();
        input.key_down("r");
        // Auto-repeat
        input.key_down("r");
        let frame = input.sample();
        assert!(frame.recycle);
        assert!(!input.sample().recycle);

        input.key_up("r");
        input.key_down("r");
        assert!(input.sample().recycle);
    }

    #[test]
    fn test_prevent_default_flags() {
        let mut input = InputState::new();
        assert!(input.key_down("Escape"));
        assert!(!input.key_down("Enter"));
        assert!(input.key_down("ArrowUp"));
        assert!(!input.key_down("w"));
    }

    #[test]
    fn test_register_named() {
        let mut input = InputState::new();
        assert!(input.register_named("t", "build_tree", true));
        assert_eq!(input.hotkey("T"), Some(Command::Select(BuildingKind::Tree)));
        assert!(!input.register_named("z", "teleport", false));
        assert_eq!(input.hotkey("z"), None);

        assert!(input.key_down("t"));
        assert_eq!(input.sample().select_building, Some(BuildingKind::Tree));

        assert!(input.unregister_hotkey("t"));
        assert!(!input.unregister_hotkey("t"));
    }

    #[test]
    fn test_shift_boosts() {
        let mut input = InputState::new();
        input.key_down("Shift");
        assert!(input.sample().boost);
        input.release_all();
        assert!(!input.sample().boost);
    }

    #[test]
    fn test_pointer_and_wheel() {
        let mut input = InputState::new();
        input.pointer_move(120.0, 80.0);
        input.pointer_down(0);
        assert_eq!(input.pointer(), Vec2::new(120.0, 80.0));
        assert!(input.is_button_down(0));
        assert!(!input.is_button_down(7));
        input.pointer_up(0);
        assert!(!input.is_button_down(0));

        input.wheel(3.0);
        input.wheel(-1.0);
        input.wheel(f32::NAN);
        assert_eq!(input.take_wheel(), 2.0);
        assert_eq!(input.take_wheel(), 0.0);

        input.click(0);
        assert!(input.sample().place);
        input.click(2);
        assert!(!input.sample().place);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::from_name("Pause"), Some(Command::Pause));
        assert_eq!(
            Command::from_name("build_oxygen_generator"),
            Some(Command::Select(BuildingKind::OxygenGenerator))
        );
        assert_eq!(Command::from_name("build_castle"), None);
    }
}
