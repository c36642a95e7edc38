//! Keyboard input for the overlay
//!
//! Only two kinds of keys matter: digits, which change the tile count while
//! idle, and escape, which cancels the session.

/// Virtual key code for escape
const VK_ESCAPE: u32 = 0x1b;
/// Virtual key codes for the top-row digits
const VK_0: u32 = 0x30;
const VK_9: u32 = 0x39;
/// Virtual key codes for the numeric keypad digits
const VK_NUMPAD0: u32 = 0x60;
const VK_NUMPAD9: u32 = 0x69;

/// Keys the overlay reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Digit 0-9 from the top row or the keypad
    Digit(u8),
    /// Cancel the session
    Escape,
    /// Anything else (ignored)
    Other(u32),
}

impl Key {
    /// Convert Windows virtual key code to Key
    pub fn from_vk_code(vk_code: u32) -> Self {
        match vk_code {
            VK_0..=VK_9 => Key::Digit((vk_code - VK_0) as u8),
            VK_NUMPAD0..=VK_NUMPAD9 => Key::Digit((vk_code - VK_NUMPAD0) as u8),
            VK_ESCAPE => Key::Escape,
            other => Key::Other(other),
        }
    }
}
