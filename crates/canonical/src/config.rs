//! Configuration types for the normalization pipeline.
//!
//! This module defines [`NormalizeConfig`], which selects the steps applied to
//! a question before it is compared against the knowledge base.
//!
//! # Versioning
//!
//! The `version` field tracks normalization behavior. Any change to the
//! output (a new stemming rule, a different punctuation set) must come with a
//! version bump so persisted comparisons can be reasoned about.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.strip_digits);
//! assert!(config.strip_punctuation);
//! assert!(config.lowercase);
//! assert!(config.stem);
//! ```
//!
//! ## Matching on surface forms only
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig {
//!     stem: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the normalization pipeline.
///
/// Every step is enabled by default; that combination is the one the
/// matcher and the answer lookup are calibrated against.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "strip_digits": true,
///   "strip_punctuation": true,
///   "lowercase": true,
///   "stem": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    pub version: u32,

    /// Remove ASCII decimal digits (`0`-`9`).
    ///
    /// Other Unicode digits are left in place.
    pub strip_digits: bool,

    /// Remove the 32 ASCII punctuation characters.
    ///
    /// ```text
    /// "What's your name?" → "Whats your name"
    /// ```
    ///
    /// Non-ASCII punctuation survives and is split off by word segmentation.
    pub strip_punctuation: bool,

    /// Apply locale-free Unicode lowercasing.
    pub lowercase: bool,

    /// Reduce every token to its Porter stem.
    ///
    /// ```text
    /// "running dogs" → "run dog"
    /// ```
    pub stem: bool,
}

impl NormalizeConfig {
    /// Check the configuration for values the pipeline cannot honor.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strip_digits: true,
            strip_punctuation: true,
            lowercase: true,
            stem: true,
        }
    }
}
