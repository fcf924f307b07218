//! View-models and handlers for the four panel pages.
//!
//! Each page builds its view once and mutates it from handlers and pollers;
//! a front end renders [`snapshot`](home::HomePage::snapshot)s of it.

pub mod calendar;
pub mod home;
pub mod manual;
pub mod settings;

/// Shown in place of a clock field that could not be read.
pub const NO_VALUE: &str = "--";

/// Shown in place of a state that could not be read.
pub const NO_STATE: &str = "---";

/// Label of the button that flips a boolean: it names the action, not the
/// current state.
pub fn toggle_label(state: bool) -> &'static str {
    if state {
        "Désactiver"
    } else {
        "Activer"
    }
}

fn two_digits(n: u8) -> String {
    format!("{:02}", n)
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
