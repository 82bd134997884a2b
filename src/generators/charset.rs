//! Alphabet construction from character-class flags.

use crate::models::CharacterClasses;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

/// Build the alphabet for the selected classes, always in the order
/// uppercase, lowercase, numbers, symbols. Empty when nothing is selected.
pub fn build(classes: &CharacterClasses) -> Vec<char> {
    let mut chars: Vec<char> = Vec::with_capacity(size(classes));

    if classes.uppercase {
        chars.extend(UPPERCASE.chars());
    }
    if classes.lowercase {
        chars.extend(LOWERCASE.chars());
    }
    if classes.numbers {
        chars.extend(NUMBERS.chars());
    }
    if classes.symbols {
        chars.extend(SYMBOLS.chars());
    }

    chars
}

/// Number of characters `build` would return.
pub fn size(classes: &CharacterClasses) -> usize {
    let mut size = 0;
    if classes.uppercase {
        size += UPPERCASE.len();
    }
    if classes.lowercase {
        size += LOWERCASE.len();
    }
    if classes.numbers {
        size += NUMBERS.len();
    }
    if classes.symbols {
        size += SYMBOLS.len();
    }
    size
}

/// Which classes actually occur in `password`. Anything outside
/// `[A-Za-z0-9]` counts as a symbol.
pub fn classes_in(password: &str) -> CharacterClasses {
    CharacterClasses {
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        numbers: password.chars().any(|c| c.is_ascii_digit()),
        symbols: password.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}
