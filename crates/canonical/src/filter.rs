//! Character filters applied before segmentation.

/// ASCII punctuation, the same 32 characters as C's `ispunct` in the "C" locale.
pub const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Removes every ASCII punctuation character.
///
/// ```rust
/// use canonical::strip_ascii_punctuation;
///
/// assert_eq!(strip_ascii_punctuation("What's up?"), "Whats up");
/// ```
pub fn strip_ascii_punctuation(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_ascii_punctuation()).collect()
}

/// Removes the ASCII decimal digits `0`-`9`.
pub fn strip_ascii_digits(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_ascii_digit()).collect()
}
