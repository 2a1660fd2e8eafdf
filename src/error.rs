use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sprite generation
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("Config file not found or unreadable: {path}")]
    #[diagnostic(code(vjs::config::not_found))]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {message}")]
    #[diagnostic(code(vjs::config::parse))]
    ConfigParse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Icon '{name}' not found at {path}")]
    #[diagnostic(
        code(vjs::icon::not_found),
        help("Check the icon's `file` and `root-dir` entries in the config")
    )]
    IconNotFound { name: String, path: PathBuf },

    #[error("Staging directory error with {path}: {message}")]
    #[diagnostic(code(vjs::staging))]
    Staging { path: PathBuf, message: String },

    #[error("Sprite compilation failed: {message}")]
    #[diagnostic(code(vjs::sprite::compile))]
    SpriteCompilation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to write {path}: {message}")]
    #[diagnostic(code(vjs::output))]
    OutputWrite { path: PathBuf, message: String },

    #[error("Invalid SVG: {message}")]
    #[diagnostic(code(vjs::svg))]
    SvgParse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(vjs::io))]
    Io { path: PathBuf, message: String },
}

impl SpriteError {
    /// Shorthand for a compilation error without help text.
    pub fn compile(message: impl Into<String>) -> Self {
        SpriteError::SpriteCompilation {
            message: message.into(),
            help: None,
        }
    }

    /// Shorthand for an SVG parse error without help text.
    pub fn svg(message: impl Into<String>) -> Self {
        SpriteError::SvgParse {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;
