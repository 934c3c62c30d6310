//! Tokenizing and normalizing Georgian sentences for phrase matching.

/// Georgian Unicode block (Asomtavruli, Nuskhuri capitals, Mkhedruli).
const GEORGIAN_BLOCK: std::ops::RangeInclusive<char> = '\u{10A0}'..='\u{10FF}';

#[must_use]
pub fn is_georgian(ch: char) -> bool {
    GEORGIAN_BLOCK.contains(&ch)
}

fn is_word_char(ch: char) -> bool {
    is_georgian(ch) || ch.is_ascii_alphanumeric()
}

/// Split a sentence on whitespace, dropping empty tokens.
#[must_use]
pub fn extract_words(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(str::to_owned).collect()
}

/// Gameplay name for [`extract_words`].
#[must_use]
pub fn extract_words_from_georgian(sentence: &str) -> Vec<String> {
    extract_words(sentence)
}

/// Keep Georgian letters, ASCII letters and ASCII digits; drop everything else.
///
/// Georgian punctuation outside the block (for example `„` and `“`) is
/// removed along with ASCII punctuation. U+10FB (Georgian paragraph
/// separator) sits inside the block and is kept.
#[must_use]
pub fn remove_punctuation(word: &str) -> String {
    word.chars().filter(|ch| is_word_char(*ch)).collect()
}

/// Canonical form used to compare an assembled sentence with the answer.
///
/// Trims, strips characters that are neither word characters nor
/// whitespace, collapses whitespace runs to a single space and lowercases.
#[must_use]
pub fn normalize_for_comparison(text: &str) -> String {
    let stripped: String = text
        .trim()
        .chars()
        .filter(|ch| is_word_char(*ch) || ch.is_whitespace())
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Words of `sentence` with punctuation removed, skipping tokens that were
/// punctuation only (a lone `-` or `?`).
#[must_use]
pub fn clean_words(sentence: &str) -> Vec<String> {
    extract_words(sentence)
        .iter()
        .map(|word| remove_punctuation(word))
        .filter(|word| !word.is_empty())
        .collect()
}
