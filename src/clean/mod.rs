//! Text cleaning for descriptions and account names.
//!
//! Descriptions and nicknames come in with emoji, control characters, and
//! filesystem-hostile punctuation. [`TextCleaner`] provides the three
//! transforms the extraction pipeline relies on: [`filter`](TextCleaner::filter)
//! strips unsafe characters, [`clear_spaces`](TextCleaner::clear_spaces)
//! collapses whitespace, and [`clean_name`](TextCleaner::clean_name)
//! produces a usable account name or falls back to a caller-supplied
//! sentinel.

use std::io::{self, BufRead, Write};

use deunicode::deunicode;

/// Characters that are invalid in filenames on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Cleans free-form platform text into safe, stable output values.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner;

impl TextCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Remove control characters and filesystem-unsafe punctuation.
    ///
    /// Everything else passes through untouched, including `#` topic
    /// markers and non-ASCII text.
    pub fn filter(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() && !INVALID_CHARS.contains(c))
            .collect()
    }

    /// Collapse runs of whitespace to single spaces and trim the edges.
    pub fn clear_spaces(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Clean a raw account name, falling back to `default` when nothing
    /// usable remains.
    ///
    /// The name is transliterated to ASCII, stripped of unsafe characters,
    /// and whitespace-collapsed. When the result is empty and `inquire` is
    /// set, the user is prompted for a replacement first (TTY only); the
    /// prompt answer goes through the same cleaning.
    pub fn clean_name(&self, raw: &str, inquire: bool, default: &str) -> String {
        let cleaned = self.clear_spaces(&self.filter(&deunicode(raw)));
        if !cleaned.is_empty() {
            return cleaned;
        }
        if inquire {
            if let Some(replacement) = prompt_replacement(raw) {
                let cleaned = self.clear_spaces(&self.filter(&deunicode(&replacement)));
                if !cleaned.is_empty() {
                    return cleaned;
                }
            }
        }
        default.to_string()
    }
}

/// Ask the user for a replacement name on stderr/stdin.
///
/// Returns `None` when stdin is not a TTY or the answer is blank.
#[cfg(not(tarpaulin_include))]
fn prompt_replacement(raw: &str) -> Option<String> {
    if !atty::is(atty::Stream::Stdin) {
        return None;
    }

    eprint!("Name {raw:?} is unusable, enter a replacement (blank for default): ");
    io::stderr().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;

    let answer = input.trim();
    if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    }
}
