//! Scroll demo
//!
//! Scrolls a simulated list with the animator and logs every frame.

use anyhow::Result;
use glide_animation::{AnimationRuntime, Easing, Pacing};
use glide_core::{Scrollable, Vec2};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::info;

use crate::config::GlideConfig;

/// Overrides for a single demo run
#[derive(Debug, Default)]
pub struct DemoOptions {
    pub scroll_to: Option<f32>,
    pub duration: Option<Duration>,
    pub easing: Option<Easing>,
    pub pacing: Option<Pacing>,
}

/// Outcome of a demo run
#[derive(Debug)]
pub struct DemoReport {
    pub frames: usize,
    pub final_offset: Vec2,
    pub completed: bool,
}

pub fn run(config: &GlideConfig, options: DemoOptions) -> Result<DemoReport> {
    let runtime = AnimationRuntime::new(config.animation.clone())?;
    let view = Rc::new(RefCell::new(config.demo.scroll_view()));

    let destination = Vec2::new(0.0, options.scroll_to.unwrap_or(config.demo.scroll_to));
    let mut request = config.animation.request(destination);
    if let Some(duration) = options.duration {
        request = request.with_duration(duration);
    }
    if let Some(easing) = options.easing {
        request = request.with_easing(easing);
    }

    info!(
        "Scrolling {} rows to y={} over {:.0}ms ({}) at {}fps",
        config.demo.rows,
        destination.y,
        request.duration_secs() * 1000.0,
        request.easing(),
        config.animation.frame_rate
    );

    let completed = Rc::new(Cell::new(false));
    let completed_flag = completed.clone();
    runtime.animator().animate(
        &view,
        request.on_complete(move || {
            completed_flag.set(true);
            info!("scroll finished");
        }),
    );

    // Generous cap: the requested duration plus a second of frames
    let max_frames = (request_frames(config, options.duration) + config.animation.frame_rate as usize)
        .max(1);
    let pacing = options.pacing.unwrap_or(Pacing::RealTime);

    let frames = runtime.run_with(max_frames, pacing, |frame| {
        let view = view.borrow();
        let offset = view.content_offset();
        let rows = view.visible_rows();
        info!(
            "frame {:>3}: offset y={:>8.2}  rows {}..{}",
            frame, offset.y, rows.start, rows.end
        );
    });

    let final_offset = view.borrow().content_offset();
    Ok(DemoReport {
        frames,
        final_offset,
        completed: completed.get(),
    })
}

fn request_frames(config: &GlideConfig, duration: Option<Duration>) -> usize {
    let duration = duration.unwrap_or_else(|| config.animation.default_duration());
    (duration.as_secs_f64() * config.animation.frame_rate as f64).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulated() -> DemoOptions {
        DemoOptions {
            pacing: Some(Pacing::Simulated),
            ..Default::default()
        }
    }

    #[test]
    fn test_demo_reaches_destination() {
        let config = GlideConfig::starter();
        let report = run(&config, simulated()).unwrap();

        assert!(report.completed);
        assert_eq!(report.final_offset, Vec2::new(0.0, 500.0));
        assert!(report.frames >= 15);
    }

    #[test]
    fn test_demo_overrides() {
        let config = GlideConfig::default();
        let report = run(
            &config,
            DemoOptions {
                scroll_to: Some(88.0),
                duration: Some(Duration::from_millis(50)),
                easing: Some(Easing::CircOut),
                ..simulated()
            },
        )
        .unwrap();

        assert!(report.completed);
        assert_eq!(report.final_offset, Vec2::new(0.0, 88.0));
        assert!(report.frames <= 5);
    }

    #[test]
    fn test_zero_duration_completes_without_frames() {
        let config = GlideConfig::default();
        let report = run(
            &config,
            DemoOptions {
                duration: Some(Duration::ZERO),
                ..simulated()
            },
        )
        .unwrap();

        assert!(report.completed);
        assert_eq!(report.frames, 0);
        assert_eq!(report.final_offset, Vec2::new(0.0, 500.0));
    }
}
