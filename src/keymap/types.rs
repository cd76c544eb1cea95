//! Core types for the keymap system: Keystroke, Modifiers, KeyCode

use std::fmt;
use std::str::FromStr;

use super::config::KeymapError;

/// Modifier keys (plus NumLock state) as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0_0001);
    pub const SHIFT: Modifiers = Modifiers(0b0_0010);
    pub const ALT: Modifiers = Modifiers(0b0_0100);
    pub const META: Modifiers = Modifiers(0b0_1000);
    /// NumLock is on; numpad keys type digits instead of navigating
    pub const NUM_LOCK: Modifiers = Modifiers(0b1_0000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn num_lock(self) -> bool {
        self.0 & Self::NUM_LOCK.0 != 0
    }

    /// No modifier keys held (NumLock state is ignored)
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.without(Self::NUM_LOCK).0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code representing a physical or logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to lowercase)
    Char(char),

    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    F(u8),

    /// Numpad digit keys (physical)
    Numpad(u8),
    NumpadEnter,
    NumpadDecimal,
}

impl KeyCode {
    pub fn is_numpad(self) -> bool {
        matches!(
            self,
            KeyCode::Numpad(_) | KeyCode::NumpadEnter | KeyCode::NumpadDecimal
        )
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Numpad(n) => write!(f, "Num{}", n),
            KeyCode::NumpadEnter => write!(f, "NumEnter"),
            KeyCode::NumpadDecimal => write!(f, "Num."),
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// A keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// A character keystroke; uppercase letters imply Shift
    pub fn char(c: char) -> Self {
        let mods = if c.is_uppercase() {
            Modifiers::SHIFT
        } else {
            Modifiers::NONE
        };
        Self::char_with_mods(c, mods)
    }

    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self {
            key: KeyCode::Char(c.to_lowercase().next().unwrap_or(c)),
            mods,
        }
    }

    /// The character this keystroke types, if it is plain text input
    pub fn text(&self) -> Option<char> {
        if self.mods.ctrl() || self.mods.alt() || self.mods.meta() {
            return None;
        }
        match self.key {
            KeyCode::Char(c) if self.mods.shift() => c.to_uppercase().next(),
            KeyCode::Char(c) => Some(c),
            KeyCode::Space => Some(' '),
            KeyCode::Numpad(n) if self.mods.num_lock() => char::from_digit(u32::from(n), 10),
            KeyCode::NumpadDecimal if self.mods.num_lock() => Some('.'),
            _ => None,
        }
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

impl FromStr for Keystroke {
    type Err = KeymapError;

    /// Parse `"ctrl+shift+home"`, `"numlock+num7"`, `"a"` and the like
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_string(s)
    }
}

/// Parse a key string like "ctrl+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    // "ctrl++" binds the plus key
    let (body, plus_key) = match key_str.strip_suffix("++") {
        Some(rest) => (rest, true),
        None => (key_str, false),
    };

    let mut mods = Modifiers::NONE;
    let mut key_part = plus_key.then_some(KeyCode::Char('+'));

    for part in body.split('+').filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" | "cmd" => mods = mods | Modifiers::META,
            "numlock" => mods = mods | Modifiers::NUM_LOCK,
            key => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(part, key)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    // An uppercase letter means Shift
    if let KeyCode::Char(c) = key {
        if c.is_uppercase() {
            return Ok(Keystroke::char_with_mods(c, mods | Modifiers::SHIFT));
        }
    }
    Ok(Keystroke::new(key, mods))
}

/// Parse a key code; `raw` keeps the original case for single characters
fn parse_key_code(raw: &str, key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match key {
        "enter" | "return" | "ret" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" | "spc" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),
        "insert" | "ins" => Ok(KeyCode::Insert),

        "numenter" | "numpad_enter" => Ok(KeyCode::NumpadEnter),
        "numdot" | "numpad_decimal" => Ok(KeyCode::NumpadDecimal),

        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=24).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let digit = key
                .strip_prefix("numpad")
                .or_else(|| key.strip_prefix("num"))
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| *n <= 9);
            match digit {
                Some(n) => Ok(KeyCode::Numpad(n)),
                None => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_num_lock_is_not_a_held_modifier() {
        assert!(Modifiers::NUM_LOCK.is_empty());
        assert!(Modifiers::NUM_LOCK.num_lock());
        assert_eq!((Modifiers::CTRL | Modifiers::NUM_LOCK).without(Modifiers::NUM_LOCK), Modifiers::CTRL);
    }

    #[test]
    fn test_parse_key_strings() {
        assert_eq!(
            "Ctrl+Shift+Home".parse::<Keystroke>().unwrap(),
            Keystroke::new(KeyCode::Home, Modifiers::CTRL | Modifiers::SHIFT)
        );
        assert_eq!(
            "num7".parse::<Keystroke>().unwrap(),
            Keystroke::key(KeyCode::Numpad(7))
        );
        assert_eq!(
            "ctrl+space".parse::<Keystroke>().unwrap(),
            Keystroke::new(KeyCode::Space, Modifiers::CTRL)
        );
        assert_eq!("F5".parse::<Keystroke>().unwrap(), Keystroke::key(KeyCode::F(5)));
        assert_eq!("A".parse::<Keystroke>().unwrap(), Keystroke::char('A'));
        assert_eq!(
            "ctrl++".parse::<Keystroke>().unwrap(),
            Keystroke::new(KeyCode::Char('+'), Modifiers::CTRL)
        );
        assert!("ctrl+a+b".parse::<Keystroke>().is_err());
        assert!("ctrl".parse::<Keystroke>().is_err());
        assert!("hyper+x".parse::<Keystroke>().is_err());
    }

    #[test]
    fn test_text_input() {
        assert_eq!(Keystroke::char('a').text(), Some('a'));
        assert_eq!(Keystroke::char('A').text(), Some('A'));
        assert_eq!(Keystroke::new(KeyCode::Char('a'), Modifiers::CTRL).text(), None);
        assert_eq!(Keystroke::key(KeyCode::Space).text(), Some(' '));
        assert_eq!(Keystroke::key(KeyCode::Numpad(7)).text(), None);
        assert_eq!(
            Keystroke::new(KeyCode::Numpad(7), Modifiers::NUM_LOCK).text(),
            Some('7')
        );
    }

    #[test]
    fn test_keystroke_display() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL);
        assert_eq!(stroke.to_string(), "Ctrl+S");
    }
}
