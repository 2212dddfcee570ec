//! Interactive prompt port.
//!
//! Kept synchronous: prompts block on the terminal anyway, and the
//! resolver runs before any connection is opened.

use crate::error::Result;

/// Asks the operator for missing values.
pub trait Prompter {
    /// Whether a human can answer prompts right now.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Free-text input, with an optional pre-filled default.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Masked input for secrets.
    fn secret(&self, prompt: &str) -> Result<String>;

    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Pick one of `items`; returns its index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
}
