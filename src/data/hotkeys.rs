//! Keyboard shortcuts for the viewer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modifier keys (combinations) used for hotkeys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlShift => "Ctrl+Shift",
        };
        write!(f, "{}", s)
    }
}

/// A single hotkey consisting of an optional modifier and a character key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self { modifier, key }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.key == ' ' {
            "Space".to_string()
        } else {
            self.key.to_string()
        };
        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        // "Ctrl+S", "S", "Space"
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let (last, mods) = parts
            .split_last()
            .ok_or_else(|| "invalid hotkey".to_string())?;
        let key = if last.eq_ignore_ascii_case("space") {
            ' '
        } else {
            let mut chars = last.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_ascii_uppercase(),
                _ => return Err(format!("unknown key '{}'", last)),
            }
        };
        let lowers: Vec<String> = mods.iter().map(|m| m.to_lowercase()).collect();
        let modifier = match lowers.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Modifier::None,
            ["ctrl"] | ["control"] => Modifier::Ctrl,
            ["alt"] => Modifier::Alt,
            ["shift"] => Modifier::Shift,
            ["ctrl", "shift"] | ["shift", "ctrl"] => Modifier::CtrlShift,
            _ => return Err(format!("unknown modifier combo '{:?}'", mods)),
        };
        Ok(Hotkey { modifier, key })
    }
}

/// Container for all configurable hotkeys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub pause: Hotkey,
    pub save_png: Hotkey,
    pub clear_overlay: Hotkey,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            pause: Hotkey::new(Modifier::None, ' '),
            save_png: Hotkey::new(Modifier::None, 'S'),
            clear_overlay: Hotkey::new(Modifier::None, 'C'),
        }
    }
}

/// Actions a hotkey can trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyName {
    Pause,
    SavePng,
    ClearOverlay,
}

fn key_from_char(c: char) -> Option<egui::Key> {
    if c == ' ' {
        return Some(egui::Key::Space);
    }
    egui::Key::from_name(&c.to_ascii_uppercase().to_string())
}

fn modifiers_match(mods: &egui::Modifiers, modifier: Modifier) -> bool {
    let ctrl = mods.ctrl || mods.command;
    let alt = mods.alt;
    let shift = mods.shift;
    match modifier {
        Modifier::None => !ctrl && !alt,
        Modifier::Ctrl => ctrl && !alt,
        Modifier::Alt => alt && !ctrl,
        Modifier::Shift => shift && !ctrl && !alt,
        Modifier::CtrlShift => ctrl && shift && !alt,
    }
}

fn is_hotkey_pressed(hk: &Hotkey, input: &egui::InputState) -> bool {
    let Some(key) = key_from_char(hk.key) else {
        return false;
    };
    modifiers_match(&input.modifiers, hk.modifier) && input.key_pressed(key)
}

/// Actions whose hotkey was pressed this frame. Suppressed while a text field has focus.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyName> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|input| {
        [
            (&cfg.pause, HotkeyName::Pause),
            (&cfg.save_png, HotkeyName::SavePng),
            (&cfg.clear_overlay, HotkeyName::ClearOverlay),
        ]
        .into_iter()
        .filter(|(hk, _)| is_hotkey_pressed(hk, input))
        .map(|(_, name)| name)
        .collect()
    })
}

/// Tooltip text with the bound hotkey appended, e.g. `"Pause (Space)"`.
pub fn format_button_tooltip(label: &str, hk: &Hotkey) -> String {
    format!("{} ({})", label, hk)
}
