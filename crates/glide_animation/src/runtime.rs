//! Animation runtime
//!
//! Bundles the frame clock, the main queue and a scroll animator, and drives
//! them frame by frame the way a UI thread would: tick the clock, then run
//! whatever the frame deferred to the next turn.

use crate::animator::ScrollAnimator;
use crate::clock::FrameClock;
use crate::config::AnimatorConfig;
use crate::error::Result;
use glide_core::MainQueue;
use std::thread;
use std::time::Instant;

/// How [`AnimationRuntime::run_until_idle`] spaces frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Deliver frames back to back
    Simulated,
    /// Sleep out the rest of each frame interval
    RealTime,
}

/// The runtime that owns the clock and queue an animator depends on
pub struct AnimationRuntime {
    clock: FrameClock,
    queue: MainQueue,
    animator: ScrollAnimator,
    config: AnimatorConfig,
}

impl AnimationRuntime {
    pub fn new(config: AnimatorConfig) -> Result<Self> {
        config.validate()?;

        let clock = FrameClock::with_frame_rate(config.frame_rate);
        let queue = MainQueue::new();
        let animator = ScrollAnimator::new(clock.handle(), queue.clone());

        Ok(Self {
            clock,
            queue,
            animator,
            config,
        })
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn queue(&self) -> &MainQueue {
        &self.queue
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Run one frame of `dt` seconds followed by one turn of the main queue
    ///
    /// Returns true while there is still work (subscriptions or queued tasks).
    pub fn step(&self, dt: f32) -> bool {
        self.clock.tick(dt);
        self.queue.drain();
        !self.is_idle()
    }

    /// Run one frame of the nominal frame interval
    pub fn step_frame(&self) -> bool {
        self.step(self.clock.frame_interval().as_secs_f32())
    }

    /// Check if nothing is animating and nothing is queued
    pub fn is_idle(&self) -> bool {
        !self.clock.is_active() && self.queue.is_empty()
    }

    /// Step frames until idle, or until `max_frames` have run
    ///
    /// Returns the number of frames delivered.
    pub fn run_until_idle(&self, max_frames: usize, pacing: Pacing) -> usize {
        self.run_with(max_frames, pacing, |_| {})
    }

    /// Like [`run_until_idle`](Self::run_until_idle), calling `on_frame` with
    /// the 1-based frame number after each frame
    pub fn run_with<F>(&self, max_frames: usize, pacing: Pacing, mut on_frame: F) -> usize
    where
        F: FnMut(usize),
    {
        // Deferred work from before the first frame
        self.queue.drain();

        let frame_duration = self.clock.frame_interval();
        let mut frames = 0;

        while frames < max_frames && !self.is_idle() {
            let start = Instant::now();
            self.step_frame();
            frames += 1;
            on_frame(frames);

            if pacing == Pacing::RealTime {
                // Sleep for remaining frame time
                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }

        if !self.is_idle() {
            tracing::warn!(
                "AnimationRuntime: still busy after {} frames ({} subscription(s), {} queued task(s))",
                frames,
                self.clock.subscriber_count(),
                self.queue.pending()
            );
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::AnimationRequest;
    use crate::error::AnimationError;
    use glide_core::{ScrollView, Scrollable, Size, Vec2};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn test_runtime_runs_animation_to_completion() {
        let runtime = AnimationRuntime::new(AnimatorConfig::default()).unwrap();
        let view = Rc::new(RefCell::new(ScrollView::new(Size::new(320.0, 480.0), 100, 44.0)));
        let done = Rc::new(Cell::new(false));

        let done_clone = done.clone();
        runtime.animator().animate(
            &view,
            runtime
                .config()
                .request(Vec2::new(0.0, 500.0))
                .on_complete(move || done_clone.set(true)),
        );
        assert!(!runtime.is_idle());

        let frames = runtime.run_until_idle(120, Pacing::Simulated);

        // 250ms at 60fps
        assert!((15..=17).contains(&frames), "took {frames} frames");
        assert!(done.get());
        assert!(runtime.is_idle());
        assert_eq!(view.borrow().content_offset(), Vec2::new(0.0, 500.0));
    }

    #[test]
    fn test_completion_can_chain_next_animation() {
        let runtime = AnimationRuntime::new(AnimatorConfig::default()).unwrap();
        let view = Rc::new(RefCell::new(ScrollView::new(Size::new(320.0, 480.0), 100, 44.0)));
        let finished = Rc::new(Cell::new(0));

        let animator = runtime.animator().clone();
        let chained_view = view.clone();
        let finished_clone = finished.clone();
        runtime.animator().animate(
            &view,
            AnimationRequest::new(Vec2::new(0.0, 300.0), Duration::from_millis(100)).on_complete(
                move || {
                    let finished = finished_clone.clone();
                    finished_clone.set(finished_clone.get() + 1);
                    animator.animate(
                        &chained_view,
                        AnimationRequest::new(Vec2::ZERO, Duration::from_millis(100))
                            .on_complete(move || finished.set(finished.get() + 1)),
                    );
                },
            ),
        );

        runtime.run_until_idle(120, Pacing::Simulated);

        assert_eq!(finished.get(), 2);
        assert_eq!(view.borrow().content_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnimatorConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            AnimationRuntime::new(config),
            Err(AnimationError::InvalidConfig(_))
        ));
    }
}
