// src/utils/format.rs

// Truncate a string if it's too long, counting characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// Render a strength score the way the meter shows it
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}/100", score)
    } else {
        format!("{:.1}/100", score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_character_boundaries() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate_string("ééééééééé", 6), "ééé...");
    }

    #[test]
    fn formats_whole_and_fractional_scores() {
        assert_eq!(format_score(100.0), "100/100");
        assert_eq!(format_score(27.5), "27.5/100");
    }
}
