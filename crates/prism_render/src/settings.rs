//! Renderer Settings
//!
//! Configuration consumed by [`BaseRenderer`](crate::renderer::BaseRenderer)
//! when it builds its queue and on every
//! [`render_frame`](crate::renderer::BaseRenderer::render_frame).
//!
//! ```rust,ignore
//! use prism::render::RendererSettings;
//!
//! let settings = RendererSettings {
//!     initial_bucket_capacity: 256,
//!     ..Default::default()
//! };
//!
//! // Or from JSON; missing fields keep their defaults.
//! let settings = RendererSettings::from_json_str(r#"{ "clear_buckets": false }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use prism_core::{PrismError, Result};

// ---------------------------------------------------------------------------
// RendererSettings
// ---------------------------------------------------------------------------

/// Per-renderer queue and frame configuration.
///
/// # Fields
///
/// | Field                     | Description                                  | Default |
/// |---------------------------|----------------------------------------------|---------|
/// | `initial_bucket_capacity` | Entries each default bucket starts with      | `32`    |
/// | `sort_buckets`            | Sort against the context camera each frame   | `true`  |
/// | `clear_buckets`           | Clear buckets and marks after each frame     | `true`  |
/// | `notify_marked_on_clear`  | Notify marked renderables when marks clear   | `true`  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Initial capacity of each default bucket; buckets double when full.
    pub initial_bucket_capacity: usize,

    /// Whether [`render_frame`](crate::renderer::BaseRenderer::render_frame)
    /// sorts before drawing.
    pub sort_buckets: bool,

    /// Whether [`render_frame`](crate::renderer::BaseRenderer::render_frame)
    /// clears after drawing.
    pub clear_buckets: bool,

    pub notify_marked_on_clear: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            initial_bucket_capacity: 32,
            sort_buckets: true,
            clear_buckets: true,
            notify_marked_on_clear: true,
        }
    }
}

impl RendererSettings {
    /// Parses and validates settings from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_bucket_capacity == 0 {
            return Err(PrismError::InvalidArgument(
                "initial_bucket_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = RendererSettings::from_json_str(r#"{ "clear_buckets": false }"#).unwrap();
        assert!(!settings.clear_buckets);
        assert_eq!(settings.initial_bucket_capacity, 32);
        assert!(settings.sort_buckets);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RendererSettings::from_json_str(r#"{ "initial_bucket_capacity": 0 }"#);
        assert!(matches!(err, Err(PrismError::InvalidArgument(_))));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            RendererSettings::from_json_str("{"),
            Err(PrismError::Serialization(_))
        ));
    }
}
