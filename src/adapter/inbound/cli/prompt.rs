//! Terminal prompter backed by `dialoguer`.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

use super::interrupt::PromptScope;
use crate::error::{Error, Result};
use crate::port::Prompter;

/// Prompts on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    /// Prompts render on stderr and read stdin; both must be terminals.
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let _scope = PromptScope::enter();
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    fn secret(&self, prompt: &str) -> Result<String> {
        let _scope = PromptScope::enter();
        let value = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()?;
        Ok(value.trim().to_string())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let _scope = PromptScope::enter();
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?
            .ok_or(Error::Cancelled)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        let _scope = PromptScope::enter();
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?
            .ok_or(Error::Cancelled)
    }
}
