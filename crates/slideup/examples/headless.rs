//! Headless Sheet Example
//!
//! Drives a bottom sheet through a scripted session (open, a short drag that
//! snaps back, a long drag that closes it, then open and a back press) and
//! prints one line per frame with a bar showing how much of the panel is on
//! screen.
//!
//! Run: `cargo run -p slideup --example headless`
//!
//! Set `RUST_LOG=slideup=debug` to see the sheet's lifecycle events.

use std::time::Duration;

use slideup::{
    BottomSheet, Event, FrameChanges, FrameClock, PointerEvent, SheetOptions, SheetRegion,
};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);
const BAR_WIDTH: usize = 32;

enum Step {
    Open,
    Drag(f64),
    Back,
    Wait(u32),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn bar(fraction: f64) -> String {
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)))
}

fn main() {
    init_tracing();

    let options = SheetOptions::new().height(320.0).duration_ms(240.0);
    let mut sheet = match BottomSheet::from_options(options) {
        Ok(sheet) => sheet.on_close(|| println!("          on_close")),
        Err(err) => {
            eprintln!("invalid options: {err}");
            return;
        }
    };

    let script = [
        Step::Open,
        Step::Wait(20),
        Step::Drag(90.0),
        Step::Wait(60),
        Step::Drag(200.0),
        Step::Wait(20),
        Step::Open,
        Step::Wait(20),
        Step::Back,
        Step::Wait(20),
    ];

    let mut clock = FrameClock::new();
    let mut now = Instant::now();
    let mut frame_no = 0u32;
    clock.advance(now);

    for step in &script {
        match *step {
            Step::Open => sheet.open(),
            Step::Back => {
                sheet.handle_event(&Event::Back, None);
            }
            Step::Drag(dy) => {
                let y0 = 600.0;
                sheet.handle_event_at(
                    &Event::from(PointerEvent::down(100.0, y0)),
                    Some(SheetRegion::Handle),
                    now,
                );
                for i in 1..=8 {
                    now += FRAME;
                    let y = y0 + dy * f64::from(i) / 8.0;
                    sheet.handle_event_at(&Event::from(PointerEvent::moved(100.0, y)), None, now);
                    sheet.tick(clock.advance(now));
                }
                sheet.handle_event_at(&Event::from(PointerEvent::up(100.0, y0 + dy)), None, now);
            }
            Step::Wait(frames) => {
                for _ in 0..frames {
                    now += FRAME;
                    frame_no += 1;
                    let changes = sheet.tick(clock.advance(now));
                    if changes.is_empty() {
                        continue;
                    }
                    let frame = sheet.frame();
                    println!(
                        "{frame_no:>4} {:<12} [{}] y={:>6.1}{}",
                        format!("{:?}", frame.phase),
                        bar(frame.open_fraction()),
                        frame.translate_y,
                        if changes.contains(FrameChanges::VISIBILITY) {
                            "  (visibility)"
                        } else {
                            ""
                        }
                    );
                }
            }
        }
    }
}
