// src/models.rs
use serde::{Serialize, Deserialize};
use std::fmt;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 64;
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

// Character classes a password may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl CharacterClasses {
    pub const fn all() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
        }
    }

    /// True when at least one class is selected.
    pub fn any(&self) -> bool {
        self.uppercase || self.lowercase || self.numbers || self.symbols
    }

    /// Number of selected classes (0-4).
    pub fn count(&self) -> usize {
        [self.uppercase, self.lowercase, self.numbers, self.symbols]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }
}

impl Default for CharacterClasses {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
        }
    }
}

// A single generation request from the control surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub length: usize,
    pub classes: CharacterClasses,
    pub pronounceable: bool,
}

impl GenerationRequest {
    pub fn new(length: usize, classes: CharacterClasses, pronounceable: bool) -> Self {
        Self { length, classes, pronounceable }
    }

    /// Classes the generated password may contain. Pronounceable mode always
    /// asks for every class, whatever flags were selected.
    pub fn effective_classes(&self) -> CharacterClasses {
        if self.pronounceable {
            CharacterClasses::all()
        } else {
            self.classes
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            classes: CharacterClasses::default(),
            pronounceable: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    TooWeak,
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLabel::TooWeak => write!(f, "Too weak"),
            StrengthLabel::Weak => write!(f, "Weak"),
            StrengthLabel::Medium => write!(f, "Medium"),
            StrengthLabel::Strong => write!(f, "Strong"),
        }
    }
}

// Presentation hint paired with each label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Destructive,
    Warning,
    Success,
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTag::Destructive => write!(f, "destructive"),
            ColorTag::Warning => write!(f, "warning"),
            ColorTag::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthAssessment {
    pub score: f64,
    pub label: StrengthLabel,
    pub color: ColorTag,
}

impl StrengthAssessment {
    pub fn too_weak() -> Self {
        Self {
            score: 0.0,
            label: StrengthLabel::TooWeak,
            color: ColorTag::Destructive,
        }
    }
}

impl Default for StrengthAssessment {
    fn default() -> Self {
        Self::too_weak()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pronounceable_requests_use_every_class() {
        let request = GenerationRequest::new(12, CharacterClasses::none(), true);
        assert_eq!(request.effective_classes(), CharacterClasses::all());
    }

    #[test]
    fn local_requests_keep_selected_classes() {
        let classes = CharacterClasses { uppercase: false, lowercase: true, numbers: false, symbols: true };
        let request = GenerationRequest::new(12, classes, false);
        assert_eq!(request.effective_classes(), classes);
    }

    #[test]
    fn default_classes_match_initial_form_state() {
        let classes = CharacterClasses::default();
        assert!(classes.any());
        assert_eq!(classes.count(), 3);
        assert!(!classes.symbols);
        assert!(!CharacterClasses::none().any());
    }
}
