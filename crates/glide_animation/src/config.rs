//! Animator configuration

use crate::animator::AnimationRequest;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use glide_core::Vec2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Frame rate and request defaults
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Frames per second of the frame clock
    pub frame_rate: u32,
    /// Easing used by [`AnimatorConfig::request`]
    pub default_easing: Easing,
    /// Duration used by [`AnimatorConfig::request`], in milliseconds
    pub default_duration_ms: u64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            default_easing: Easing::Linear,
            default_duration_ms: 250,
        }
    }
}

impl AnimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 || self.frame_rate > 1000 {
            return Err(AnimationError::InvalidConfig(format!(
                "frame_rate must be between 1 and 1000, got {}",
                self.frame_rate
            )));
        }
        Ok(())
    }

    /// Nominal time between two frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Request to `destination` using the configured defaults
    pub fn request(&self, destination: Vec2) -> AnimationRequest {
        AnimationRequest::new(destination, self.default_duration()).with_easing(self.default_easing)
    }
}
