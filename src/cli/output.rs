use std::fmt;
use std::sync::RwLock;

use colored::Colorize;
use once_cell::sync::Lazy;

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// Suppresses informational chatter; warnings and errors always print.
    pub quiet_mode: bool,
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
}

fn quiet() -> bool {
    PREFERENCES
        .read()
        .map(|guard| guard.quiet_mode)
        .unwrap_or(false)
}

pub fn info(message: impl fmt::Display) {
    if quiet() {
        return;
    }
    println!("{message}");
}

pub fn hint(message: impl fmt::Display) {
    if quiet() {
        return;
    }
    println!("{}", format!("    {message}").dimmed());
}

pub fn success(message: impl fmt::Display) {
    println!("{}", format!("[✓] {message}").bright_green());
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", format!("[!] {message}").bright_yellow());
}

pub fn error(message: impl fmt::Display) {
    println!("{}", format!("[x] {message}").bright_red());
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", format!("=== {title} ===").bold());
}
