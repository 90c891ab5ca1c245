//! Layout reconstruction: turns the blocks of a page back into the list
//! entries (thumbnail + text) and the heading lines it was typeset from.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::consts::*;

pub mod header;
pub mod normalize;
pub mod rows;

pub use header::HeaderExtractor;
pub use normalize::{CodeQuantityNormalizer, TextNormalizer};
pub use rows::RowReconstructor;

/// Thresholds of the row heuristic.
///
/// They fit one document family; retune them (usually from a JSON file)
/// rather than the code when the layout changes.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default)]
#[serde(default, deny_unknown_fields)]
pub struct ReconstructConfig {
    /// Image blocks must be strictly larger than this many bytes.
    pub noise_size_threshold: usize,
    /// Text blocks must start strictly right of this x.
    pub left_margin_x: f32,
    /// Space above the first image claimed by its row.
    pub top_margin: f32,
    /// Space below the page bottom claimed by the last row.
    pub bottom_margin: f32,
    /// Extra band height for the fallback pass.
    pub fallback_extra_margin: f32,
    /// Minimum normalized characters before the fallback pass kicks in.
    pub min_text_length: usize,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            noise_size_threshold: DEFAULT_NOISE_SIZE_THRESHOLD,
            left_margin_x: DEFAULT_LEFT_MARGIN_X,
            top_margin: DEFAULT_TOP_MARGIN,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            fallback_extra_margin: DEFAULT_FALLBACK_EXTRA_MARGIN,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Text blocks whose top edge lies above this y are header candidates.
    pub header_max_y: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            header_max_y: DEFAULT_HEADER_MAX_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_config_default() {
        let config = ReconstructConfig::default();
        assert_eq!(config.noise_size_threshold, DEFAULT_NOISE_SIZE_THRESHOLD);
        assert_eq!(config.left_margin_x, DEFAULT_LEFT_MARGIN_X);
        assert_eq!(config.min_text_length, DEFAULT_MIN_TEXT_LENGTH);
    }

    #[test]
    fn test_reconstruct_config_builder() {
        let config = ReconstructConfigBuilder::default()
            .min_text_length(5)
            .left_margin_x(42.0)
            .build()
            .unwrap();

        assert_eq!(config.min_text_length, 5);
        assert_eq!(config.left_margin_x, 42.0);
        assert_eq!(config.top_margin, DEFAULT_TOP_MARGIN);
    }

    #[test]
    fn test_reconstruct_config_partial_json() {
        let config: ReconstructConfig =
            serde_json::from_str(r#"{ "noise_size_threshold": 500, "bottom_margin": 0.0 }"#)
                .unwrap();

        assert_eq!(config.noise_size_threshold, 500);
        assert_eq!(config.bottom_margin, 0.0);
        assert_eq!(config.fallback_extra_margin, DEFAULT_FALLBACK_EXTRA_MARGIN);
    }

    #[test]
    fn test_reconstruct_config_rejects_unknown_option() {
        let result = serde_json::from_str::<ReconstructConfig>(r#"{ "left_margin": 10.0 }"#);
        assert!(result.is_err());
    }
}
