//! Scroll animator
//!
//! Interpolates the content offset of [`Scrollable`] targets over a fixed
//! duration, sampling an [`Easing`] curve once per frame of the
//! [`FrameClock`](crate::clock::FrameClock).
//!
//! Each target has at most one session. A session is created by the first
//! timed request for a target and re-targeted in place by later requests
//! while it is still running:
//!
//! - the start offset is re-captured from the target's *live* offset
//! - elapsed time restarts at zero
//! - the previous completion is dropped without being called
//!
//! Requests with a duration of zero or less apply the destination
//! immediately and call the completion before returning.
//!
//! Targets are held weakly. A target dropped mid-animation is noticed on the
//! next frame: the session is discarded and its completion never fires.
//!
//! # Example
//!
//! ```ignore
//! let runtime = AnimationRuntime::new(AnimatorConfig::default())?;
//! let view = Rc::new(RefCell::new(ScrollView::new(viewport, 100, 44.0)));
//!
//! runtime.animator().animate(
//!     &view,
//!     AnimationRequest::new(Vec2::new(0.0, 500.0), Duration::from_millis(250))
//!         .with_easing(Easing::SineInOut)
//!         .on_complete(|| tracing::info!("done")),
//! );
//!
//! runtime.run_until_idle(600, Pacing::Simulated);
//! ```

use crate::clock::{FrameCallback, FrameClockHandle, FrameSubscriptionId};
use crate::easing::Easing;
use glide_core::{MainQueue, Scrollable, Vec2};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to an in-flight scroll session
    pub struct SessionId;
}

/// One-shot completion callback
pub type Completion = Box<dyn FnOnce()>;

/// Identity of a target, derived from its allocation address
///
/// A session's `Weak` keeps the allocation alive, so an address cannot be
/// reused by another target while its entry exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TargetKey(usize);

impl TargetKey {
    fn of<T: ?Sized>(target: &Rc<RefCell<T>>) -> Self {
        TargetKey(Rc::as_ptr(target) as *const () as usize)
    }
}

/// Phase of a target's animation
///
/// Instant requests never leave `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Running,
}

/// A request to move a target to a new offset
pub struct AnimationRequest {
    destination: Vec2,
    /// Seconds, `<= 0` (or NaN) means instant
    duration: f32,
    easing: Easing,
    on_complete: Option<Completion>,
}

impl AnimationRequest {
    pub fn new(destination: Vec2, duration: Duration) -> Self {
        Self::with_secs(destination, duration.as_secs_f32())
    }

    /// Create a request from a duration in seconds
    ///
    /// Zero and negative durations are applied instantly.
    pub fn with_secs(destination: Vec2, duration: f32) -> Self {
        Self {
            destination,
            duration,
            easing: Easing::Linear,
            on_complete: None,
        }
    }

    /// Builder: replace the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration.as_secs_f32();
        self
    }

    /// Builder: set the easing curve (defaults to linear)
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Builder: set the completion callback
    pub fn on_complete<F: FnOnce() + 'static>(mut self, callback: F) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_instant(&self) -> bool {
        // NaN compares false, so it is instant as well
        !(self.duration > 0.0)
    }
}

impl std::fmt::Debug for AnimationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRequest")
            .field("destination", &self.destination)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Mutable state of one target's animation
struct Session {
    key: TargetKey,
    target: Weak<RefCell<dyn Scrollable>>,
    /// Wall-clock start of the current request, reported against the frame
    /// time when the session finishes
    started_at: Instant,
    /// Seconds, accumulated from frame deltas
    elapsed: f32,
    duration: f32,
    start_offset: Vec2,
    destination: Vec2,
    easing: Easing,
    /// Present while the session is running
    subscription: Option<FrameSubscriptionId>,
    on_complete: Option<Completion>,
}

/// What a frame did to a session, applied once the animator is released
enum FrameStep {
    /// The session no longer exists
    Stale,
    /// The detached session, dropped once the animator is released since its
    /// completion may capture state that reaches back into the animator
    TargetDropped { session: Option<Session> },
    Moved {
        target: Rc<RefCell<dyn Scrollable>>,
        offset: Vec2,
    },
    Finished {
        target: Rc<RefCell<dyn Scrollable>>,
        destination: Vec2,
        subscription: Option<FrameSubscriptionId>,
        on_complete: Option<Completion>,
    },
}

/// Internal state of the animator
struct AnimatorInner {
    sessions: SlotMap<SessionId, Session>,
    by_target: FxHashMap<TargetKey, SessionId>,
    clock: FrameClockHandle,
}

impl AnimatorInner {
    fn detach(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(id)?;
        self.by_target.remove(&session.key);
        Some(session)
    }

    fn detach_target(&mut self, key: TargetKey) -> Option<Session> {
        let id = self.by_target.get(&key).copied()?;
        self.detach(id)
    }

    /// Advance a session by one frame
    fn advance(&mut self, id: SessionId, dt: f32) -> FrameStep {
        let Some(session) = self.sessions.get_mut(id) else {
            return FrameStep::Stale;
        };

        let Some(target) = session.target.upgrade() else {
            return FrameStep::TargetDropped {
                session: self.detach(id),
            };
        };

        // Negative (and NaN) deltas are ignored, elapsed time never runs backwards
        session.elapsed += dt.max(0.0);

        if session.elapsed >= session.duration {
            let destination = session.destination;
            let wall = session.started_at.elapsed();
            let elapsed = session.elapsed;
            let (subscription, on_complete) = match self.detach(id) {
                Some(session) => (session.subscription, session.on_complete),
                None => (None, None),
            };
            tracing::debug!(
                "ScrollAnimator: finished at {:?} after {:.3}s of frames ({:?} wall)",
                destination,
                elapsed,
                wall
            );
            return FrameStep::Finished {
                target,
                destination,
                subscription,
                on_complete,
            };
        }

        let Session {
            elapsed,
            duration,
            start_offset,
            destination,
            easing,
            ..
        } = *session;
        let delta = destination - start_offset;
        let offset = start_offset.zip_with(delta, |b, c| easing.compute(elapsed, b, c, duration));
        tracing::trace!("ScrollAnimator: t={:.4}s offset={:?}", elapsed, offset);

        FrameStep::Moved { target, offset }
    }
}

impl Drop for AnimatorInner {
    fn drop(&mut self) {
        // Release every frame subscription still held by a session
        for (_, session) in self.sessions.drain() {
            if let Some(subscription) = session.subscription {
                self.clock.unsubscribe(subscription);
            }
        }
    }
}

/// Drives scroll animations for any number of targets
///
/// Cloning yields another handle to the same animator, which is how
/// completion callbacks chain follow-up animations.
#[derive(Clone)]
pub struct ScrollAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
    clock: FrameClockHandle,
    queue: MainQueue,
}

impl ScrollAnimator {
    /// Create an animator ticked by `clock`
    ///
    /// Completions of timed animations are dispatched onto `queue` and run on
    /// its next drain.
    pub fn new(clock: FrameClockHandle, queue: MainQueue) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                sessions: SlotMap::with_key(),
                by_target: FxHashMap::default(),
                clock: clock.clone(),
            })),
            clock,
            queue,
        }
    }

    /// Animate `target`'s content offset
    ///
    /// The target must not be borrowed while this is called.
    pub fn animate<T>(&self, target: &Rc<RefCell<T>>, request: AnimationRequest)
    where
        T: Scrollable + 'static,
    {
        let target: Rc<RefCell<dyn Scrollable>> = target.clone();
        self.animate_dyn(&target, request);
    }

    /// Animate a type-erased target
    pub fn animate_dyn(&self, target: &Rc<RefCell<dyn Scrollable>>, request: AnimationRequest) {
        let key = TargetKey::of(target);
        let is_instant = request.is_instant();
        let AnimationRequest {
            destination,
            duration,
            easing,
            on_complete,
        } = request;

        if is_instant {
            self.apply_instantly(key, target, destination, on_complete);
            return;
        }

        if !self.clock.is_alive() {
            tracing::warn!("ScrollAnimator: frame clock is gone, applying offset immediately");
            self.apply_instantly(key, target, destination, on_complete);
            return;
        }

        let start_offset = target.borrow().content_offset();

        let mut inner = self.inner.borrow_mut();
        let existing = inner
            .by_target
            .get(&key)
            .copied()
            .filter(|id| inner.sessions.contains_key(*id));

        let (id, superseded) = match existing {
            Some(id) => {
                let session = &mut inner.sessions[id];
                session.started_at = Instant::now();
                session.elapsed = 0.0;
                session.duration = duration;
                session.start_offset = start_offset;
                session.destination = destination;
                session.easing = easing;
                let superseded = std::mem::replace(&mut session.on_complete, on_complete);
                tracing::debug!(
                    "ScrollAnimator: re-targeting from {:?} to {:?} over {:.3}s ({})",
                    start_offset,
                    destination,
                    duration,
                    easing
                );
                (id, superseded)
            }
            None => {
                let id = inner.sessions.insert(Session {
                    key,
                    target: Rc::downgrade(target),
                    started_at: Instant::now(),
                    elapsed: 0.0,
                    duration,
                    start_offset,
                    destination,
                    easing,
                    subscription: None,
                    on_complete,
                });
                inner.by_target.insert(key, id);
                tracing::debug!(
                    "ScrollAnimator: animating from {:?} to {:?} over {:.3}s ({})",
                    start_offset,
                    destination,
                    duration,
                    easing
                );
                (id, None)
            }
        };
        let needs_subscription = inner.sessions[id].subscription.is_none();
        drop(inner);

        if superseded.is_some() {
            tracing::debug!("ScrollAnimator: dropped completion of superseded request");
        }
        drop(superseded);

        if needs_subscription {
            match self.clock.subscribe(self.frame_callback(id)) {
                Some(subscription) => {
                    if let Some(session) = self.inner.borrow_mut().sessions.get_mut(id) {
                        session.subscription = Some(subscription);
                    }
                }
                None => {
                    // Clock vanished between the liveness check and now
                    let on_complete = self.inner.borrow_mut().detach(id).and_then(|s| s.on_complete);
                    self.apply_instantly(key, target, destination, on_complete);
                }
            }
        }
    }

    /// Current phase of `target`
    pub fn phase<T: ?Sized>(&self, target: &Rc<RefCell<T>>) -> AnimationPhase {
        let inner = self.inner.borrow();
        let running = inner
            .by_target
            .get(&TargetKey::of(target))
            .and_then(|id| inner.sessions.get(*id))
            .is_some_and(|session| session.subscription.is_some());
        if running {
            AnimationPhase::Running
        } else {
            AnimationPhase::Idle
        }
    }

    pub fn is_animating<T: ?Sized>(&self, target: &Rc<RefCell<T>>) -> bool {
        self.phase(target) == AnimationPhase::Running
    }

    /// Number of sessions currently held
    pub fn session_count(&self) -> usize {
        self.inner.borrow().sessions.len()
    }

    /// Supersede any running session, set the destination and complete now
    fn apply_instantly(
        &self,
        key: TargetKey,
        target: &Rc<RefCell<dyn Scrollable>>,
        destination: Vec2,
        on_complete: Option<Completion>,
    ) {
        let superseded = self.inner.borrow_mut().detach_target(key);
        if let Some(session) = superseded {
            tracing::debug!("ScrollAnimator: instant request superseded a running animation");
            if let Some(subscription) = session.subscription {
                self.clock.unsubscribe(subscription);
            }
        }

        tracing::debug!("ScrollAnimator: set offset {:?} without animation", destination);
        target.borrow_mut().set_content_offset(destination);

        if let Some(callback) = on_complete {
            callback();
        }
    }

    fn frame_callback(&self, id: SessionId) -> FrameCallback {
        let inner: Weak<RefCell<AnimatorInner>> = Rc::downgrade(&self.inner);
        let clock = self.clock.clone();
        let queue = self.queue.clone();

        Box::new(move |dt| {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let step = inner.borrow_mut().advance(id, dt);

            match step {
                FrameStep::Stale => {}
                FrameStep::TargetDropped { session } => {
                    tracing::debug!("ScrollAnimator: target dropped mid-animation, discarding");
                    if let Some(subscription) = session.as_ref().and_then(|s| s.subscription) {
                        clock.unsubscribe(subscription);
                    }
                    drop(session);
                }
                FrameStep::Moved { target, offset } => {
                    target.borrow_mut().set_content_offset(offset);
                }
                FrameStep::Finished {
                    target,
                    destination,
                    subscription,
                    on_complete,
                } => {
                    target.borrow_mut().set_content_offset(destination);
                    if let Some(subscription) = subscription {
                        clock.unsubscribe(subscription);
                    }
                    if let Some(callback) = on_complete {
                        queue.dispatch(callback);
                    }
                }
            }
        })
    }
}
