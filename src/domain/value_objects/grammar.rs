//! Small English helpers for player-facing text

/// Prefix `noun` with "a" or "an"
pub fn with_indefinite_article(noun: &str) -> String {
    let starts_with_vowel = noun
        .chars()
        .next()
        .map(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .unwrap_or(false);
    if starts_with_vowel {
        format!("an {}", noun)
    } else {
        format!("a {}", noun)
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
