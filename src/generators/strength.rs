// src/generators/strength.rs
use super::charset;
use crate::models::{ColorTag, StrengthAssessment, StrengthLabel};

/// Length at which the length term stops growing.
const FULL_CREDIT_LENGTH: f64 = 20.0;

pub struct StrengthScorer;

impl StrengthScorer {
    // Half the score comes from length, half from class variety
    pub fn score(password: &str) -> StrengthAssessment {
        if password.is_empty() {
            return StrengthAssessment::too_weak();
        }

        let length = password.chars().count() as f64;
        let length_term = (length / FULL_CREDIT_LENGTH).min(1.0) * 50.0;

        let variety = charset::classes_in(password).count() as f64;
        let variety_term = (variety / 4.0) * 50.0;

        let score = (length_term + variety_term).min(100.0);

        let (label, color) = if score < 40.0 {
            (StrengthLabel::Weak, ColorTag::Destructive)
        } else if score < 70.0 {
            (StrengthLabel::Medium, ColorTag::Warning)
        } else {
            (StrengthLabel::Strong, ColorTag::Success)
        };

        StrengthAssessment { score, label, color }
    }
}
