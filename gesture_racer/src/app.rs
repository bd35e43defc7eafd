//! Top-level run loop.
//!
//! `run` opens the key backend, tracker and window, then drives the
//! [`Pipeline`] once per frame until the window closes, `q` is pressed,
//! Ctrl-C arrives or the tracker disconnects. Every exit path releases held
//! keys before the window is torn down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use racer_control::KeyBackend;
use racer_overlay::Canvas;

use crate::config::AppConfig;
use crate::error::{RacerError, TrackerError};
use crate::keyboard::{open_key_backend, KeyBackendKind};
use crate::pipeline::{Flow, Pipeline};
use crate::tracker::{open_tracker, HandTracker, TrackerKind};
use crate::window::{RacerWindow, WindowEvent};

/// Collaborators to open for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub tracker: TrackerKind,
    pub keys:    KeyBackendKind,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions { tracker: TrackerKind::Sim, keys: KeyBackendKind::Log }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application. This is the entry point called from `main.rs`.
pub fn run(config: AppConfig, opts: RunOptions) -> Result<(), RacerError> {
    let quit = Arc::new(AtomicBool::new(false));
    {
        let quit = Arc::clone(&quit);
        ctrlc::set_handler(move || quit.store(true, Ordering::SeqCst))?;
    }

    let backend = open_key_backend(opts.keys, &config.movement_keys);
    let mut tracker = open_tracker(opts.tracker, &config)?;

    let (w, h) = (config.frame_width as usize, config.frame_height as usize);
    let mut window = RacerWindow::new(w, h, config.target_fps as usize)?;
    let mut canvas = Canvas::new(w, h);
    let mut pipeline = Pipeline::new(config, backend);

    let result = drive(&mut pipeline, tracker.as_mut(), &mut window, &mut canvas, &quit);
    match &result {
        Ok(()) => {}
        Err(RacerError::Tracker(e @ TrackerError::Disconnected(_))) => {
            tracing::warn!(error = %e, "frame source lost; stopping");
        }
        Err(e) => tracing::error!(error = %e, "run loop stopped"),
    }

    pipeline.shutdown();
    drop(window);
    tracing::info!("shut down");
    result
}

fn drive<B: KeyBackend>(
    pipeline: &mut Pipeline<B>,
    tracker:  &mut dyn HandTracker,
    window:   &mut RacerWindow,
    canvas:   &mut Canvas,
    quit:     &AtomicBool,
) -> Result<(), RacerError> {
    let mut last_frame = Instant::now();

    while window.is_open() {
        if quit.load(Ordering::SeqCst) {
            tracing::info!("interrupted");
            break;
        }

        // 1. Window input → commands / sim hands
        for event in window.poll() {
            match event {
                WindowEvent::Sim(input) => tracker.handle_input(input),
                WindowEvent::Command(cmd) => {
                    if pipeline.apply(cmd) == Flow::Quit {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                }
            }
        }

        // 2. Hands → keys + HUD
        let hands = tracker.detect()?;
        let frame = pipeline.tick(&hands);

        // 3. Render & present
        canvas.render(&frame.draw);
        window.present(canvas)?;

        let now = Instant::now();
        pipeline.observe_frame_interval(now - last_frame);
        last_frame = now;
    }

    Ok(())
}
