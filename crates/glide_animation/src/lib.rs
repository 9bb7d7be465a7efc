//! Glide Animation System
//!
//! Smooth, time-based scrolling driven by a per-frame clock.
//!
//! # Features
//!
//! - **Easing Curves**: 22 classic Penner curves with exact endpoints
//! - **Frame Clock**: Display-link style per-frame subscriptions
//! - **Scroll Animator**: One interpolation session per target, re-targetable
//!   mid-flight, weakly bound to its target
//! - **Deferred Completion**: Completions run on the main queue's next turn

pub mod animator;
pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod runtime;

pub use animator::{AnimationPhase, AnimationRequest, Completion, ScrollAnimator, SessionId};
pub use clock::{FrameCallback, FrameClock, FrameClockHandle, FrameSubscriptionId};
pub use config::AnimatorConfig;
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use runtime::{AnimationRuntime, Pacing};
