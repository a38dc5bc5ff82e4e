// Parser safety limits
//
// Bounds the work a single parse may do:
// - Stack depth of the mutually recursive parsing procedures
// - Source size and token count
// - Length of names, string literals and comments
//
// All limits have permissive defaults and can be overridden via sfl.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Parser safety limits with permissive defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserLimits {
    // Lexer limits
    pub max_input_size: usize,     // Maximum source size in bytes
    pub max_token_count: usize,    // Maximum number of significant tokens lexed
    pub max_name_length: usize,    // Maximum name length in bytes
    pub max_string_length: usize,  // Maximum string literal length in bytes
    pub max_comment_length: usize, // Maximum comment length in bytes

    // Parser limits
    pub max_depth: usize, // Maximum parsing procedure recursion depth
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000,    // 10 MB
            max_token_count: 100_000,      // 100k tokens
            max_name_length: 1_000,        // 1k bytes
            max_string_length: 10_000_000, // 10 MB
            max_comment_length: 100_000,   // 100k bytes
            max_depth: 256,
        }
    }
}

impl ParserLimits {
    /// Load limits from a TOML file, falling back to defaults
    ///
    /// Returns error only if the file is unreadable or malformed, not if it is missing
    pub fn from_config_toml<P: AsRef<Path>>(path: P) -> Result<Self, LimitError> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("no config at {}, using default limits", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| LimitError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            LimitError::Malformed { message, .. } => LimitError::Malformed {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse limits from TOML text; only keys present in `[limits]` override defaults
    pub fn from_toml_str(content: &str) -> Result<Self, LimitError> {
        let config: ConfigFile = toml::from_str(content).map_err(|e| LimitError::Malformed {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;

        let mut limits = Self::default();

        if let Some(overrides) = config.limits {
            if let Some(v) = overrides.max_input_size {
                limits.max_input_size = v;
            }
            if let Some(v) = overrides.max_token_count {
                limits.max_token_count = v;
            }
            if let Some(v) = overrides.max_name_length {
                limits.max_name_length = v;
            }
            if let Some(v) = overrides.max_string_length {
                limits.max_string_length = v;
            }
            if let Some(v) = overrides.max_comment_length {
                limits.max_comment_length = v;
            }
            if let Some(v) = overrides.max_depth {
                limits.max_depth = v;
            }
        }

        Ok(limits)
    }

    /// Validate that all limits are positive and not absurdly large
    pub fn validate(&self) -> Result<(), LimitError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        check("max_input_size", self.max_input_size, MAX_REASONABLE)?;
        check("max_token_count", self.max_token_count, 10_000_000)?;
        check("max_name_length", self.max_name_length, 100_000)?;
        check("max_string_length", self.max_string_length, MAX_REASONABLE)?;
        check("max_comment_length", self.max_comment_length, MAX_REASONABLE)?;
        check("max_depth", self.max_depth, 10_000)?;

        Ok(())
    }
}

fn check(name: &'static str, value: usize, max: usize) -> Result<(), LimitError> {
    if value == 0 || value > max {
        return Err(LimitError::Invalid { name, value });
    }
    Ok(())
}

/// TOML configuration structures for deserialization
#[derive(Debug, Deserialize)]
struct ConfigFile {
    limits: Option<LimitsTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsTable {
    max_input_size: Option<usize>,
    max_token_count: Option<usize>,
    max_name_length: Option<usize>,
    max_string_length: Option<usize>,
    max_comment_length: Option<usize>,
    max_depth: Option<usize>,
}

/// Error type for limit validation and loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("Limit error: failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Limit error: failed to parse {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("Limit error: invalid limit '{name}': {value} (must be positive and reasonable)")]
    Invalid { name: &'static str, value: usize },
}
