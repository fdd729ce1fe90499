//! Lighting modes exchanged with the keyboard firmware.
//!
//! The firmware knows two zones, the per-key lights and the underglow. Command
//! 0x01 selects which zones are lit (or advances the animation), and command
//! 0x02 overrides a zone with a static color until the next state change.

use serde::{Deserialize, Serialize};

/// Global LED state, sent as the argument of command 0x01 and returned by the
/// state query (command 0x03).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum LightingState {
    /// Key lights and underglow on.
    #[default]
    AllOn = 0x01,
    /// Key lights only.
    KeyOnly = 0x02,
    /// Underglow only.
    UnderOnly = 0x03,
    /// Everything off.
    AllOff = 0x04,
    /// Advance to the next built-in animation. Never reported by a query.
    NextAnimation = 0x05,
}

impl LightingState {
    /// All states, in wire order.
    pub const ALL: &'static [LightingState] = &[
        LightingState::AllOn,
        LightingState::KeyOnly,
        LightingState::UnderOnly,
        LightingState::AllOff,
        LightingState::NextAnimation,
    ];

    /// Decode a wire byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::AllOn),
            0x02 => Some(Self::KeyOnly),
            0x03 => Some(Self::UnderOnly),
            0x04 => Some(Self::AllOff),
            0x05 => Some(Self::NextAnimation),
            _ => None,
        }
    }

    /// Decode the answer to a state query. The keyboard only ever reports
    /// 1..=4; `NextAnimation` is a command, not a state.
    pub fn from_query_byte(byte: u8) -> Option<Self> {
        match Self::from_byte(byte)? {
            Self::NextAnimation => None,
            state => Some(state),
        }
    }

    /// Wire byte for this state.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Short CLI name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllOn => "all",
            Self::KeyOnly => "key",
            Self::UnderOnly => "under",
            Self::AllOff => "off",
            Self::NextAnimation => "next",
        }
    }

    /// Parse a state from a CLI-friendly string (case-insensitive).
    ///
    /// - "all", "on", "all-on" → AllOn
    /// - "key", "keys", "key-only" → KeyOnly
    /// - "under", "underglow", "under-only" → UnderOnly
    /// - "off", "none", "all-off" → AllOff
    /// - "next", "next-animation" → NextAnimation
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" | "on" | "all-on" => Some(Self::AllOn),
            "key" | "keys" | "key-only" => Some(Self::KeyOnly),
            "under" | "underglow" | "under-only" => Some(Self::UnderOnly),
            "off" | "none" | "all-off" => Some(Self::AllOff),
            "next" | "next-animation" => Some(Self::NextAnimation),
            _ => None,
        }
    }
}

impl std::fmt::Display for LightingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Zone targeted by a color override (subcommand of command 0x02).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum NotificationMode {
    /// User-facing (front) strip of the underglow.
    Bottom = 0x01,
    /// Whole keyboard.
    #[default]
    Full = 0x02,
    /// Whole underglow.
    Under = 0x03,
}

impl NotificationMode {
    /// All modes, in wire order.
    pub const ALL: &'static [NotificationMode] = &[
        NotificationMode::Bottom,
        NotificationMode::Full,
        NotificationMode::Under,
    ];

    /// Subcommand byte for this mode.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Full => "full",
            Self::Under => "under",
        }
    }

    /// Parse a mode name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "bottom" => Some(Self::Bottom),
            "full" => Some(Self::Full),
            "under" => Some(Self::Under),
            _ => None,
        }
    }

    /// Parse a mode name, falling back to [`NotificationMode::Full`] when the
    /// name is not recognized.
    pub fn resolve(name: &str) -> (Self, Option<InputWarning>) {
        match Self::from_name(name) {
            Some(mode) => (mode, None),
            None => (
                Self::Full,
                Some(InputWarning::InvalidNotificationMode {
                    mode: name.to_string(),
                }),
            ),
        }
    }
}

impl std::fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A caller-supplied value that was rejected and replaced with a safe default.
///
/// These never abort a command; they are logged and handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InputWarning {
    /// RGB components outside 0..=255; white was used instead.
    InvalidRgb { r: i64, g: i64, b: i64 },
    /// Color name missing from the palette; white was used instead.
    UnknownColorName { name: String },
    /// Unrecognized notification mode; `full` was used instead.
    InvalidNotificationMode { mode: String },
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRgb { r, g, b } => write!(
                f,
                "RGB values must be 0-255, got ({r}, {g}, {b}); defaulting to white"
            ),
            Self::UnknownColorName { name } => {
                write!(f, "unrecognized color name '{name}'; defaulting to white")
            }
            Self::InvalidNotificationMode { mode } => write!(
                f,
                "invalid notification mode '{mode}' (valid: full, bottom, under); defaulting to full"
            ),
        }
    }
}
