//! Glide Core
//!
//! Foundational primitives shared by the Glide crates:
//!
//! - **Geometry**: `Vec2` offsets and `Size`
//! - **Scrollable targets**: the `Scrollable` trait and a `ScrollView` model
//! - **Main queue**: next-turn task dispatch for the UI thread
//!
//! # Example
//!
//! ```rust
//! use glide_core::{MainQueue, Scrollable, ScrollView, Size, Vec2};
//!
//! let mut view = ScrollView::new(Size::new(320.0, 480.0), 100, 44.0);
//! view.set_content_offset(Vec2::new(0.0, 88.0));
//! assert_eq!(view.visible_rows().start, 2);
//!
//! let queue = MainQueue::new();
//! queue.dispatch(|| println!("next turn"));
//! assert_eq!(queue.drain(), 1);
//! ```

pub mod geometry;
pub mod queue;
pub mod scroll;

pub use geometry::{Size, Vec2};
pub use queue::{MainQueue, Task};
pub use scroll::{ScrollView, Scrollable};
