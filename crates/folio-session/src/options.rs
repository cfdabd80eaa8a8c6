use crate::error::{Result, SessionError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable knobs for a viewer session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewerOptions {
    /// Assumed container width when the host region reports zero width
    pub fallback_container_width: f32,

    // Zoom quantization, in percent of the fit-width base scale
    pub min_zoom_percent: f32,
    pub max_zoom_percent: f32,
    pub zoom_step_percent: f32,

    /// Accumulated wheel delta that triggers one zoom step
    pub wheel_step_threshold: f32,

    /// Quiet time before a window resize triggers a refit
    pub resize_debounce_ms: u64,

    // Worker-side page cache
    pub page_cache_size: usize,
    pub prefetch_adjacent: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            fallback_container_width: 800.0,
            min_zoom_percent: 50.0,
            max_zoom_percent: 500.0,
            zoom_step_percent: 25.0,
            wheel_step_threshold: 50.0,
            resize_debounce_ms: 200,
            page_cache_size: 24,
            prefetch_adjacent: true,
        }
    }
}

impl ViewerOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SessionError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SessionError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.fallback_container_width <= 0.0 {
            return Err(SessionError::Config(
                "Fallback container width must be positive".to_string(),
            ));
        }

        if self.zoom_step_percent <= 0.0 {
            return Err(SessionError::Config(
                "Zoom step must be positive".to_string(),
            ));
        }

        if self.min_zoom_percent <= 0.0 || self.min_zoom_percent > self.max_zoom_percent {
            return Err(SessionError::Config(format!(
                "Zoom bounds [{}, {}] are not a valid range",
                self.min_zoom_percent, self.max_zoom_percent
            )));
        }

        if self.wheel_step_threshold <= 0.0 {
            return Err(SessionError::Config(
                "Wheel step threshold must be positive".to_string(),
            ));
        }

        if self.page_cache_size == 0 {
            return Err(SessionError::Config(
                "Page cache must hold at least one page".to_string(),
            ));
        }

        Ok(())
    }
}
