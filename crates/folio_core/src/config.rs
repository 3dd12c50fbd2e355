//! Behavior constants and host capability flags.
//!
//! # Responsibility
//! - Carry every tuning literal the page behaviors use.
//! - Describe what the host environment can do, decided once at mount.
//!
//! # Invariants
//! - `PageConfig::default()` reproduces the shipped page literals.
//! - Mount refuses configs that fail `validate()`.

use crate::behavior::lazy_image::LazyImageFallback;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visible fraction that reveals a section or card.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
/// Bottom root margin for reveal watchers; negative triggers early.
pub const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: f64 = -50.0;
pub const DEFAULT_CARD_STAGGER_MS: u64 = 100;
pub const DEFAULT_SECTION_LOOKAHEAD_PX: f64 = 200.0;
pub const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
pub const DEFAULT_FADE_INTERVAL_MS: u64 = 100;

/// Tuning constants for every page behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    /// Per-index delay for card reveals inside one batch.
    pub card_stagger_ms: u64,
    /// Distance above a section's top at which it becomes current.
    pub section_lookahead_px: f64,
    /// Scroll offset beyond which the back-to-top control shows.
    pub back_to_top_threshold_px: f64,
    pub fade_interval_ms: u64,
    /// Strategy for deferred images when intersection is unavailable.
    pub lazy_image_fallback: LazyImageFallback,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_bottom_margin_px: DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
            card_stagger_ms: DEFAULT_CARD_STAGGER_MS,
            section_lookahead_px: DEFAULT_SECTION_LOOKAHEAD_PX,
            back_to_top_threshold_px: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            fade_interval_ms: DEFAULT_FADE_INTERVAL_MS,
            lazy_image_fallback: LazyImageFallback::Disabled,
        }
    }
}

impl PageConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    /// - `reveal_threshold` outside `[0, 1]` or not finite.
    /// - Negative or non-finite lookahead / back-to-top threshold.
    /// - Non-finite reveal margin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reveal_threshold.is_finite() || !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.reveal_threshold));
        }
        if !self.reveal_bottom_margin_px.is_finite() {
            return Err(ConfigError::NonFinite("reveal_bottom_margin_px"));
        }
        for (field, value) in [
            ("section_lookahead_px", self.section_lookahead_px),
            ("back_to_top_threshold_px", self.back_to_top_threshold_px),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(field));
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeOffset { field, value });
            }
        }
        Ok(())
    }
}

/// What the host environment supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostCapabilities {
    /// Whether viewport intersection observation is available.
    pub intersection_observer: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
        }
    }
}

impl HostCapabilities {
    pub fn without_intersection_observer() -> Self {
        Self {
            intersection_observer: false,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ThresholdOutOfRange(f64),
    NegativeOffset { field: &'static str, value: f64 },
    NonFinite(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThresholdOutOfRange(value) => {
                write!(f, "reveal_threshold must be within [0, 1], got {value}")
            }
            Self::NegativeOffset { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NonFinite(field) => write!(f, "{field} must be a finite number"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PageConfig};
    use crate::behavior::lazy_image::LazyImageFallback;

    #[test]
    fn defaults_match_page_literals_and_validate() {
        let config = PageConfig::default();
        assert_eq!(config.reveal_threshold, 0.1);
        assert_eq!(config.reveal_bottom_margin_px, -50.0);
        assert_eq!(config.card_stagger_ms, 100);
        assert_eq!(config.section_lookahead_px, 200.0);
        assert_eq!(config.back_to_top_threshold_px, 300.0);
        assert_eq!(config.fade_interval_ms, 100);
        assert_eq!(config.lazy_image_fallback, LazyImageFallback::Disabled);
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let config = PageConfig {
            reveal_threshold: 1.5,
            ..PageConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(1.5))
        );
    }

    #[test]
    fn rejects_negative_lookahead() {
        let config = PageConfig {
            section_lookahead_px: -1.0,
            ..PageConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeOffset {
                field: "section_lookahead_px",
                ..
            })
        ));
    }
}
