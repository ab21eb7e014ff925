//! Keyboard surface. Keys are `KeyboardEvent.key` strings.

use crate::limits::HOTKEY_SLOTS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Digit 0..=9; selects by list position.
    Select(u8),
    Cycle,
    ToggleInfo,
    ToggleHelp,
}

pub fn action_for(key: &str) -> Option<KeyAction> {
    let mut chars = key.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        // Named keys ("Enter", "Shift", ...) other than space are ignored
        return None;
    }
    if let Some(d) = ch.to_digit(10) {
        return Some(KeyAction::Select(d as u8));
    }
    // Cyrillic letters share the physical key with their Latin counterpart
    match ch.to_lowercase().next()? {
        't' | 'е' | ' ' => Some(KeyAction::Cycle),
        'i' | 'ш' => Some(KeyAction::ToggleInfo),
        '?' => Some(KeyAction::ToggleHelp),
        _ => None,
    }
}

/// List position a digit selects: 1..9 map to 0..8, 0 maps to the last slot.
pub fn digit_position(digit: u8) -> Option<usize> {
    match digit {
        0 => Some(HOTKEY_SLOTS - 1),
        1..=9 => Some(digit as usize - 1),
        _ => None,
    }
}

/// Label shown next to the list entry at `position`.
pub fn hotkey_label(position: usize) -> Option<char> {
    if position >= HOTKEY_SLOTS {
        return None;
    }
    char::from_digit(((position + 1) % HOTKEY_SLOTS) as u32, 10)
}
