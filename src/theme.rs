//! Terminal theme
//!
//! The theme is a plain value chosen at startup and passed to the renderer.

use serde::Deserialize;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Plain,
    #[default]
    Library,
}

impl FromStr for ThemeName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(ThemeName::Plain),
            "library" => Ok(ThemeName::Library),
            other => Err(AppError::BadRequest(format!("unknown theme '{}'", other))),
        }
    }
}

/// What a piece of text is, for styling purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Header,
    Error,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    title: Option<&'static str>,
    header: Option<&'static str>,
    error: Option<&'static str>,
    muted: Option<&'static str>,
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            title: None,
            header: None,
            error: None,
            muted: None,
        }
    }

    /// Browns and creams of a reading room
    pub fn library() -> Self {
        Self {
            title: Some("1;38;5;94"),
            header: Some("1;38;5;58"),
            error: Some("1;38;5;160"),
            muted: Some("38;5;137"),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Plain => Self::plain(),
            ThemeName::Library => Self::library(),
        }
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        let code = match role {
            Role::Title => self.title,
            Role::Header => self.header,
            Role::Error => self.error,
            Role::Muted => self.muted,
        };
        match code {
            Some(code) => format!("\x1b[{}m{}\x1b[0m", code, text),
            None => text.to_string(),
        }
    }
}
