//! Configuration for family inference
//!
//! Covers the policy choices the data alone cannot settle: which parent
//! label a member without a recorded sex receives, and how strictly a
//! second spouse edge is treated.

use crate::InferenceError;
use kinship_domain::RelationLabel;
use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
///
/// # Examples
///
/// ```
/// use kinship_inference::InferenceConfig;
/// use kinship_domain::RelationLabel;
///
/// let config = InferenceConfig::default();
/// assert_eq!(config.parent_fallback().unwrap(), RelationLabel::Father);
///
/// let config = InferenceConfig::strict();
/// assert!(config.strict_single_spouse);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Parent label given to a member whose sex is unspecified
    /// ("father" or "mother")
    /// Default: "father"
    #[serde(default = "default_parent_label")]
    pub unspecified_sex_parent_label: String,

    /// Fail the run instead of warning when a member has several spouse edges
    /// Default: false (the first spouse edge is used)
    #[serde(default)]
    pub strict_single_spouse: bool,
}

fn default_parent_label() -> String {
    RelationLabel::Father.as_str().to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            unspecified_sex_parent_label: default_parent_label(),
            strict_single_spouse: false,
        }
    }
}

impl InferenceConfig {
    /// Default configuration that rejects multiple spouse edges
    pub fn strict() -> Self {
        Self {
            strict_single_spouse: true,
            ..Self::default()
        }
    }

    /// Resolve the configured fallback parent label
    pub fn parent_fallback(&self) -> Result<RelationLabel, InferenceError> {
        match RelationLabel::parse(&self.unspecified_sex_parent_label) {
            Some(label) if label.is_parent() => Ok(label),
            _ => Err(InferenceError::Config(format!(
                "unspecified_sex_parent_label must be \"father\" or \"mother\", got \"{}\"",
                self.unspecified_sex_parent_label
            ))),
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), InferenceError> {
        self.parent_fallback().map(|_| ())
    }
}
