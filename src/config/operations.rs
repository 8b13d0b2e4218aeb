//! Option loading, validation, and accessors.

use super::model::ParseOptions;
use super::types::DEFAULT_TOO_BIG_MESSAGE;
use crate::encoding::Encoding;
use crate::error::{Result, UdiffError};
use std::path::Path;

impl ParseOptions {
    /// Load options from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the options file
    ///
    /// # Returns
    ///
    /// * `Ok(ParseOptions)` - Successfully loaded and validated options
    /// * `Err(UdiffError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            UdiffError::Config(format!(
                "failed to read options file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string.
    ///
    /// Unknown keys are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let options: ParseOptions = serde_yaml::from_str(yaml)
            .map_err(|e| UdiffError::Config(format!("failed to parse options YAML: {}", e)))?;

        options.validate()?;
        Ok(options)
    }

    /// Serialize options to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| UdiffError::Config(format!("failed to serialize options to YAML: {}", e)))
    }

    /// Validate option values.
    ///
    /// Validation rules:
    /// - `encoding`, when set, must name a supported encoding
    /// - `diff_too_big_message`, when set, must not be blank
    /// - prefixes, when set, must not be empty
    pub fn validate(&self) -> Result<()> {
        self.resolved_encoding()?;

        if let Some(message) = &self.diff_too_big_message {
            if message.trim().is_empty() {
                return Err(UdiffError::Config(
                    "options validation failed: diff_too_big_message must not be blank"
                        .to_string(),
                ));
            }
        }

        for (key, prefix) in [("src_prefix", &self.src_prefix), ("dst_prefix", &self.dst_prefix)] {
            if prefix.as_deref() == Some("") {
                return Err(UdiffError::Config(format!(
                    "options validation failed: {} must not be empty (omit it instead)",
                    key
                )));
            }
        }

        Ok(())
    }

    /// The encoding raw input is decoded with.
    pub fn resolved_encoding(&self) -> Result<Encoding> {
        match &self.encoding {
            Some(label) => label.parse(),
            None => Ok(Encoding::default()),
        }
    }

    /// Header text of the placeholder hunk for oversized files.
    pub fn too_big_message(&self) -> &str {
        self.diff_too_big_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_TOO_BIG_MESSAGE)
    }

    /// The changed-lines threshold, if one is active. Zero disables it.
    pub fn max_changes(&self) -> Option<usize> {
        self.diff_max_changes.filter(|&n| n > 0)
    }

    /// The line-length threshold, if one is active. Zero disables it.
    pub fn max_line_length(&self) -> Option<usize> {
        self.diff_max_line_length.filter(|&n| n > 0)
    }
}
