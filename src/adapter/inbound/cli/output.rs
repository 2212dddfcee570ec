//! Astral-style CLI output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting), quiet mode, and color control. In JSON mode every item is a
//! `{"type": ..., "payload": ...}` line on stdout.
//!
//! Primary results (a key-value reply, an object body, a presigned URL)
//! are printed even in quiet mode; decoration is not.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Style};
use serde_json::json;

use super::command::ColorChoice;
use crate::domain::Reply;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Apply ANSI styling.
    pub color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the global flags.
    ///
    /// `auto` colors only when stdout is a terminal and `NO_COLOR` is unset.
    #[must_use]
    pub fn new(json: bool, quiet: bool, color: ColorChoice) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        };
        Self { json, quiet, color }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    #[cfg(test)]
    if let Some(config) = capture::config() {
        return config;
    }
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

fn out_line(line: impl Into<String>) {
    write_line(Stream::Stdout, line.into());
}

fn err_line(line: impl Into<String>) {
    write_line(Stream::Stderr, line.into());
}

fn write_line(stream: Stream, line: String) {
    #[cfg(test)]
    if capture::record(stream, &line) {
        return;
    }
    match stream {
        Stream::Stdout => println!("{line}"),
        Stream::Stderr => eprintln!("{line}"),
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Style `text` when colors are enabled.
fn paint(config: OutputConfig, text: &str, style: Style) -> String {
    if config.color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Emit a JSON line with type and payload structure.
fn emit_json_line(kind: &str, payload: serde_json::Value) {
    out_line(json!({ "type": kind, "payload": payload }).to_string());
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point, before anything is printed.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line(
            "field",
            json!({
                "label": label,
                "value": value,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    let label = format!("{label:<14}");
    out_line(format!("  {} {}", paint(config, &label, Style::new().dimmed()), value));
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    out_line(format!("  {} {}", paint(config, "✓", Style::new().green()), message));
}

/// Print a warning line.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    out_line(format!("  {} {}", paint(config, "⚠", Style::new().yellow()), message));
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    let config = read_config();

    if config.json {
        err_line(json!({ "type": "error", "payload": { "message": message } }).to_string());
        return;
    }

    err_line(format!("  {} {}", paint(config, "×", Style::new().red()), message));
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    out_line(String::new());
    out_line(paint(config, title, Style::new().bold()));
}

/// Print a horizontal rule of `width` characters.
pub fn rule(width: usize) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    out_line(paint(config, &"─".repeat(width), Style::new().dimmed()));
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    out_line(format!("  {}", paint(config, message, Style::new().dimmed())));
}

/// Print a hint with "hint:" prefix (Astral-style).
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    out_line(format!(
        "  {}: {}",
        paint(config, "hint", Style::new().cyan().dimmed()),
        paint(config, message, Style::new().dimmed())
    ));
}

/// Print a list entry.
pub fn item(kind: &str, text: &str, payload: serde_json::Value) {
    let config = read_config();

    if config.json {
        emit_json_line(kind, payload);
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    out_line(format!("  {text}"));
}

/// Print a key-value reply. Always shown, even in quiet mode.
pub fn reply(reply: &Reply) {
    if read_config().json {
        emit_json_line("reply", reply.to_json());
        return;
    }
    out_line(reply.render());
}

/// Print a command's primary result. Always shown, even in quiet mode.
///
/// `intro` is a human-only lead-in line; `text` is the result itself.
pub fn result(kind: &str, intro: Option<&str>, text: &str, payload: serde_json::Value) {
    let config = read_config();

    if config.json {
        emit_json_line(kind, payload);
        return;
    }
    if let Some(intro) = intro {
        if !config.quiet {
            out_line(format!("  {intro}"));
        }
    }
    out_line(text);
}

/// Braille spinner animation frames (Astral-style).
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner with braille animation.
///
/// Returns a hidden progress bar in JSON or quiet mode.
fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let template = if config.color {
        "  {spinner:.cyan} {msg}"
    } else {
        "  {spinner} {msg}"
    };
    let style = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template(template)
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());

    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("spinner_success", json!({ "message": message }));
        pb.finish_and_clear();
        return;
    }
    if config.quiet {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!(
        "{} {}",
        paint(config, "✓", Style::new().green()),
        message
    ));
}

/// Finish a spinner with a failure mark.
fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("spinner_fail", json!({ "message": message }));
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", paint(config, "×", Style::new().red()), message));
}

/// Run `fut` behind a spinner, finishing it according to the outcome.
pub async fn with_spinner<T, F>(message: &str, done: &str, fut: F) -> crate::error::Result<T>
where
    F: std::future::Future<Output = crate::error::Result<T>>,
{
    let pb = spinner(message);
    match fut.await {
        Ok(value) => {
            spinner_success(&pb, done);
            Ok(value)
        }
        Err(err) => {
            spinner_fail(&pb, message);
            Err(err)
        }
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let config = read_config();
    let value = value.to_string();
    if config.json {
        return value;
    }
    paint(config, &value, Style::new().cyan())
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    let config = read_config();
    let value = value.to_string();
    if config.json {
        return value;
    }
    paint(config, &value, Style::new().dimmed())
}

/// Print a table header row.
pub fn table_header(columns: &[(&str, usize)]) {
    let config = read_config();

    if config.json {
        let cols: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        emit_json_line("table_header", json!({ "columns": cols }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    let mut line = String::from("  ");
    for (name, width) in columns {
        line.push_str(&format!("{name:>width$} "));
    }
    out_line(paint(config, &line, Style::new().dimmed()));
}

/// Print a table separator line.
pub fn table_separator(widths: &[usize]) {
    let config = read_config();

    if config.json || regular_output_suppressed(config) {
        return;
    }

    let mut line = String::from("  ");
    for width in widths {
        line.push_str(&"─".repeat(*width));
        line.push(' ');
    }
    out_line(paint(config, &line, Style::new().dimmed()));
}

/// Print a table data row.
pub fn table_row(cells: &[String], widths: &[usize]) {
    let config = read_config();

    if config.json {
        emit_json_line("table_row", json!({ "cells": cells }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    let mut line = String::from("  ");
    for (cell, width) in cells.iter().zip(widths.iter()) {
        line.push_str(&format!("{cell:>width$} "));
    }
    out_line(line);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_color_choices_win() {
        assert!(OutputConfig::new(false, false, ColorChoice::Always).color);
        assert!(!OutputConfig::new(false, false, ColorChoice::Never).color);
    }

    #[test]
    fn quiet_only_suppresses_human_output() {
        let quiet = OutputConfig::new(false, true, ColorChoice::Never);
        assert!(regular_output_suppressed(quiet));
        let json = OutputConfig::new(true, true, ColorChoice::Never);
        assert!(!regular_output_suppressed(json));
    }

    #[test]
    fn paint_is_plain_without_color() {
        let config = OutputConfig::new(false, false, ColorChoice::Never);
        assert_eq!(paint(config, "ok", Style::new().green()), "ok");

        let config = OutputConfig::new(false, false, ColorChoice::Always);
        let styled = paint(config, "ok", Style::new().green());
        assert!(styled.contains("ok"));
        assert!(styled.contains('\u{1b}'));
    }

    fn plain() -> OutputConfig {
        OutputConfig::new(false, false, ColorChoice::Never)
    }

    #[test]
    fn json_reply_uses_type_payload_envelope() {
        let captured = capture::Captured::start(OutputConfig::new(true, false, ColorChoice::Never));
        reply(&Reply::Status("PONG".into()));
        reply(&Reply::Integer(3));

        let lines: Vec<serde_json::Value> = captured
            .stdout()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines[0], json!({ "type": "reply", "payload": "PONG" }));
        assert_eq!(lines[1], json!({ "type": "reply", "payload": 3 }));
    }

    #[test]
    fn quiet_mode_still_prints_primary_results() {
        let captured = capture::Captured::start(OutputConfig::new(false, true, ColorChoice::Never));
        success("decoration");
        note("decoration");
        reply(&Reply::text("value"));
        result("presigned_url", Some("intro line"), "https://example", json!({}));

        assert_eq!(captured.stdout(), ["value", "https://example"]);
    }

    #[test]
    fn human_result_prints_intro_then_text() {
        let captured = capture::Captured::start(plain());
        result("object_content", Some("Content of \"a\":"), "hello", json!({}));
        assert_eq!(captured.stdout(), ["  Content of \"a\":", "hello"]);
    }

    #[test]
    fn errors_go_to_stderr() {
        let captured = capture::Captured::start(plain());
        error("boom");
        assert!(captured.stdout().is_empty());
        assert_eq!(captured.stderr(), ["  × boom"]);

        let captured = capture::Captured::start(OutputConfig::new(true, false, ColorChoice::Never));
        error("boom");
        let value: serde_json::Value = serde_json::from_str(&captured.stderr()[0]).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["payload"]["message"], "boom");
    }
}
