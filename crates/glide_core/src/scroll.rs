//! Scrollable targets
//!
//! Anything that exposes a content offset can be animated. [`ScrollView`] is a
//! minimal model of a vertically scrolling list used by the demo and tests.

use crate::geometry::{Size, Vec2};

/// A target with a readable and writable content offset
///
/// Setting the offset is unconditional: implementors must not clamp or animate
/// on their own, the animator owns the motion.
pub trait Scrollable {
    /// Current content offset
    fn content_offset(&self) -> Vec2;

    /// Replace the content offset
    fn set_content_offset(&mut self, offset: Vec2);
}

/// A scroll view over fixed-height rows
#[derive(Clone, Debug)]
pub struct ScrollView {
    offset: Vec2,
    viewport: Size,
    row_count: usize,
    row_height: f32,
    /// Number of offset writes, mostly useful for tests
    updates: u64,
}

impl ScrollView {
    pub fn new(viewport: Size, row_count: usize, row_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
            row_count,
            row_height,
            updates: 0,
        }
    }

    /// Size of the scrollable content
    pub fn content_size(&self) -> Size {
        Size::new(
            self.viewport.width,
            self.row_count as f32 * self.row_height,
        )
    }

    /// Largest offset that still keeps the viewport filled
    pub fn max_offset(&self) -> Vec2 {
        let content = self.content_size();
        Vec2::new(
            (content.width - self.viewport.width).max(0.0),
            (content.height - self.viewport.height).max(0.0),
        )
    }

    /// Range of rows intersecting the viewport at the current offset
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        if self.row_count == 0 || self.row_height <= 0.0 {
            return 0..0;
        }
        let top = self.offset.y.max(0.0);
        let first = ((top / self.row_height).floor() as usize).min(self.row_count);
        let last = (((top + self.viewport.height) / self.row_height).ceil() as usize)
            .min(self.row_count);
        first..last
    }

    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl Scrollable for ScrollView {
    fn content_offset(&self) -> Vec2 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ScrollView {
        ScrollView::new(Size::new(320.0, 440.0), 100, 44.0)
    }

    #[test]
    fn test_content_size_and_bounds() {
        let view = list();
        assert_eq!(view.content_size(), Size::new(320.0, 4400.0));
        assert_eq!(view.max_offset(), Vec2::new(0.0, 3960.0));
    }

    #[test]
    fn test_visible_rows_follow_offset() {
        let mut view = list();
        assert_eq!(view.visible_rows(), 0..10);

        view.set_content_offset(Vec2::new(0.0, 500.0));
        // 500 / 44 = 11.36, (500 + 440) / 44 = 21.36
        assert_eq!(view.visible_rows(), 11..22);
        assert_eq!(view.update_count(), 1);
    }

    #[test]
    fn test_offset_is_not_clamped() {
        let mut view = list();
        view.set_content_offset(Vec2::new(0.0, -80.0));
        assert_eq!(view.content_offset(), Vec2::new(0.0, -80.0));
        assert_eq!(view.visible_rows(), 0..10);
    }
}
