//! Scripted prompt answers.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::port::Prompter;

/// One canned answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Choice(usize),
    /// Simulate Esc / Ctrl-C.
    Cancel,
}

/// A [`Prompter`] that pops answers in order and records every prompt.
///
/// Running out of answers, or receiving the wrong kind, fails the call.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<String>>,
    interactive: bool,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
            interactive: true,
        }
    }

    /// A prompter that behaves like a closed stdin.
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            ..Self::new([])
        }
    }

    /// Prompts shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }

    fn next(&self, prompt: &str) -> Result<Answer> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(prompt.to_string());
        }
        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front());
        match answer {
            Some(Answer::Cancel) => Err(Error::Cancelled),
            Some(answer) => Ok(answer),
            None => Err(Error::Prompt(format!("no scripted answer for '{prompt}'"))),
        }
    }
}

fn unexpected(prompt: &str, answer: &Answer) -> Error {
    Error::Prompt(format!("unexpected answer {answer:?} for '{prompt}'"))
}

impl Prompter for ScriptedPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt)? {
            Answer::Text(text) if text.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(text) => Ok(text),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn secret(&self, prompt: &str) -> Result<String> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn select(&self, prompt: &str, items: &[&str], _default: usize) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Choice(index) if index < items.len() => Ok(index),
            other => Err(unexpected(prompt, &other)),
        }
    }
}
