//! Application state owned by the presentation layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Read a stored preference. Only exactly `"light"` selects the light
    /// theme.
    pub fn from_stored(value: &str) -> Self {
        if value == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Snapshot of what the user currently sees.
///
/// Transitions consume the state and return the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub theme: Theme,
    pub last_query: Option<String>,
    pub results_visible: bool,
}

impl AppState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn toggle_theme(self) -> Self {
        Self {
            theme: self.theme.toggled(),
            ..self
        }
    }

    /// Record a submitted query and whether it produced visible results.
    pub fn submitted(self, query: &str, results_visible: bool) -> Self {
        Self {
            last_query: Some(query.to_string()),
            results_visible,
            ..self
        }
    }

    /// Clear the input and hide results. The theme is kept.
    pub fn reset(self) -> Self {
        Self::with_theme(self.theme)
    }
}
