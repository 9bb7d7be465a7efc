//! Main-thread task queue
//!
//! Work dispatched here runs on the next turn of the owning thread, never
//! re-entrantly inside the caller's stack. Tasks dispatched while the queue is
//! draining are held back until the following [`MainQueue::drain`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Single-threaded FIFO of deferred tasks
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct MainQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl MainQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` for the next turn
    pub fn dispatch<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Run every task that was queued before this call
    ///
    /// Returns the number of tasks executed.
    pub fn drain(&self) -> usize {
        let batch: VecDeque<Task> = std::mem::take(&mut *self.tasks.borrow_mut());
        let count = batch.len();
        for task in batch {
            task();
        }
        if count > 0 {
            tracing::trace!("MainQueue: ran {} deferred task(s)", count);
        }
        count
    }

    /// Number of tasks waiting for the next turn
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl std::fmt::Debug for MainQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
