//! Frame clock
//!
//! A display-link style clock: subscribers receive one callback per frame
//! with the frame's time delta in seconds. Everything runs on the UI thread,
//! so the clock is `Rc`-based and never locks.
//!
//! Callbacks are invoked without the clock being borrowed, which lets a
//! subscriber unsubscribe itself (or subscribe others) from inside its own
//! callback. Subscriptions added during a frame first fire on the next one.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

new_key_type! {
    /// Handle to a per-frame subscription
    pub struct FrameSubscriptionId;
}

/// Per-frame callback, receives the frame delta in seconds
pub type FrameCallback = Box<dyn FnMut(f32)>;

/// Internal state of the frame clock
struct ClockInner {
    /// `None` while the callback is executing
    subscribers: SlotMap<FrameSubscriptionId, Option<FrameCallback>>,
    frame_interval: Duration,
    frames: u64,
}

/// The clock that drives all frame subscriptions
///
/// Owned by the runtime; components receive a [`FrameClockHandle`].
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    /// Create a clock running at 60fps
    pub fn new() -> Self {
        Self::with_frame_rate(60)
    }

    pub fn with_frame_rate(fps: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClockInner {
                subscribers: SlotMap::with_key(),
                frame_interval: frame_interval_for(fps),
                frames: 0,
            })),
        }
    }

    /// Get a weak handle to this clock for passing to components
    pub fn handle(&self) -> FrameClockHandle {
        FrameClockHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Nominal time between two frames
    pub fn frame_interval(&self) -> Duration {
        self.inner.borrow().frame_interval
    }

    pub fn subscribe<F>(&self, callback: F) -> FrameSubscriptionId
    where
        F: FnMut(f32) + 'static,
    {
        self.inner
            .borrow_mut()
            .subscribers
            .insert(Some(Box::new(callback)))
    }

    /// Remove a subscription, returns `false` if it was already gone
    pub fn unsubscribe(&self, id: FrameSubscriptionId) -> bool {
        unsubscribe(&self.inner, id)
    }

    /// Deliver one frame of `dt` seconds to every subscriber
    ///
    /// Returns true if any subscriptions remain (another frame is wanted).
    pub fn tick(&self, dt: f32) -> bool {
        let ids: SmallVec<[FrameSubscriptionId; 8]> = {
            let mut inner = self.inner.borrow_mut();
            inner.frames += 1;
            inner.subscribers.keys().collect()
        };

        for id in ids {
            // Take the callback out so it can re-enter the clock
            let callback = self
                .inner
                .borrow_mut()
                .subscribers
                .get_mut(id)
                .and_then(Option::take);
            let Some(mut callback) = callback else {
                continue;
            };

            callback(dt);

            // Only restore if the subscription survived its own callback
            if let Some(slot) = self.inner.borrow_mut().subscribers.get_mut(id) {
                *slot = Some(callback);
            }
        }

        self.is_active()
    }

    /// Deliver a frame of the nominal frame interval
    ///
    /// This is how a display link reports time: every frame advances by the
    /// refresh period, regardless of scheduling jitter.
    pub fn tick_frame(&self) -> bool {
        let dt = self.frame_interval().as_secs_f32();
        self.tick(dt)
    }

    /// Check if anything is subscribed
    pub fn is_active(&self) -> bool {
        !self.inner.borrow().subscribers.is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Number of frames delivered so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn frame_interval_for(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

fn unsubscribe(inner: &RefCell<ClockInner>, id: FrameSubscriptionId) -> bool {
    // Drop the callback after the borrow is released
    let removed = inner.borrow_mut().subscribers.remove(id);
    removed.is_some()
}

/// A weak handle to the frame clock
///
/// It won't keep the clock alive; operations on a dropped clock no-op.
#[derive(Clone)]
pub struct FrameClockHandle {
    inner: Weak<RefCell<ClockInner>>,
}

impl FrameClockHandle {
    /// Subscribe to frames, `None` if the clock is gone
    pub fn subscribe(&self, callback: FrameCallback) -> Option<FrameSubscriptionId> {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().subscribers.insert(Some(callback)))
    }

    pub fn unsubscribe(&self, id: FrameSubscriptionId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| unsubscribe(&inner, id))
            .unwrap_or(false)
    }

    /// Check if the clock still exists
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for FrameClockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClockHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_tick_delivers_delta() {
        let clock = FrameClock::new();
        let total = Rc::new(Cell::new(0.0f32));

        let total_clone = total.clone();
        clock.subscribe(move |dt| total_clone.set(total_clone.get() + dt));

        assert!(clock.tick(0.5));
        assert!(clock.tick(0.25));
        assert_eq!(total.get(), 0.75);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let clock = FrameClock::new();
        let count = Rc::new(Cell::new(0));

        let count_clone = count.clone();
        let id = clock.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        clock.tick(0.1);
        assert!(clock.unsubscribe(id));
        assert!(!clock.unsubscribe(id));
        assert!(!clock.tick(0.1));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscriber_can_unsubscribe_itself() {
        let clock = FrameClock::new();
        let handle = clock.handle();
        let count = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<FrameSubscriptionId>>> = Rc::new(Cell::new(None));

        let count_clone = count.clone();
        let own_id_clone = own_id.clone();
        let id = clock.subscribe(move |_| {
            count_clone.set(count_clone.get() + 1);
            if count_clone.get() == 2 {
                if let Some(id) = own_id_clone.get() {
                    handle.unsubscribe(id);
                }
            }
        });
        own_id.set(Some(id));

        assert!(clock.tick(0.1));
        assert!(!clock.tick(0.1));
        clock.tick(0.1);
        assert_eq!(count.get(), 2);
        assert_eq!(clock.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_added_mid_frame_starts_next_frame() {
        let clock = FrameClock::new();
        let handle = clock.handle();
        let late_frames = Rc::new(Cell::new(0));

        let late_clone = late_frames.clone();
        let mut added = false;
        clock.subscribe(move |_| {
            if !added {
                added = true;
                let late = late_clone.clone();
                handle.subscribe(Box::new(move |_| late.set(late.get() + 1)));
            }
        });

        clock.tick(0.1);
        assert_eq!(late_frames.get(), 0);
        assert_eq!(clock.subscriber_count(), 2);

        clock.tick(0.1);
        assert_eq!(late_frames.get(), 1);
    }

    #[test]
    fn test_tick_frame_uses_nominal_interval() {
        let clock = FrameClock::with_frame_rate(50);
        let seen = Rc::new(Cell::new(0.0f32));

        let seen_clone = seen.clone();
        clock.subscribe(move |dt| seen_clone.set(dt));
        clock.tick_frame();

        assert!((seen.get() - 0.02).abs() < 1e-6);
        assert_eq!(clock.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let clock = FrameClock::new();
            clock.handle()
        };

        // Clock is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        assert!(handle.subscribe(Box::new(|_| {})).is_none());
    }
}
