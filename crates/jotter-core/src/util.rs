//! Shared utility functions used across multiple modules.

/// Number of words kept by [`trim_details`].
pub const PREVIEW_WORDS: usize = 5;

/// First five whitespace-separated words of `text`, joined by single spaces.
///
/// No ellipsis is appended and punctuation is left alone.
///
/// ```
/// use jotter_core::util::trim_details;
///
/// assert_eq!(trim_details("one two three four five six"), "one two three four five");
/// assert_eq!(trim_details(""), "");
/// ```
pub fn trim_details(text: &str) -> String {
    text.split_whitespace()
        .take(PREVIEW_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Current Unix timestamp in milliseconds.
pub fn unix_timestamp_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
