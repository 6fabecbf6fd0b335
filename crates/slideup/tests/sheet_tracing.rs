//! Structured log events emitted by the sheet.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use slideup::{BottomSheet, Event, PointerEvent, SheetRegion};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use web_time::Instant;

#[derive(Default)]
struct Captured {
    messages: Vec<String>,
    decisions: Vec<String>,
    saw_tick_span: bool,
}

struct SheetTraceCapture {
    state: Arc<Mutex<Captured>>,
}

impl<S> Layer<S> for SheetTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() == "sheet.tick" {
            self.state.lock().expect("trace lock").saw_tick_span = true;
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        #[derive(Default)]
        struct Fields {
            message: Option<String>,
            decision: Option<String>,
        }
        impl tracing::field::Visit for Fields {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                match field.name() {
                    "message" => self.message = Some(value.to_string()),
                    "decision" => self.decision = Some(value.to_string()),
                    _ => {}
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let text = format!("{value:?}").trim_matches('"').to_string();
                match field.name() {
                    "message" => self.message = Some(text),
                    "decision" => self.decision = Some(text),
                    _ => {}
                }
            }
        }
        let mut fields = Fields::default();
        event.record(&mut fields);
        let mut state = self.state.lock().expect("trace lock");
        if let Some(message) = fields.message {
            state.messages.push(message);
        }
        if let Some(decision) = fields.decision {
            state.decisions.push(decision);
        }
    }
}

#[test]
fn lifecycle_events_are_emitted_in_order() {
    let state = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(SheetTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut sheet = BottomSheet::default();
    let t = Instant::now();
    let ms = Duration::from_millis(16);

    sheet.open();
    for _ in 0..30 {
        sheet.tick(ms);
    }
    sheet.handle_event_at(
        &Event::from(PointerEvent::down(0.0, 400.0)),
        Some(SheetRegion::Content),
        t,
    );
    sheet.handle_event_at(&Event::from(PointerEvent::moved(0.0, 440.0)), None, t + ms);
    sheet.handle_event_at(&Event::from(PointerEvent::up(0.0, 440.0)), None, t + ms * 2);
    for _ in 0..200 {
        sheet.tick(ms);
    }
    sheet.handle_event_at(&Event::Back, None, t + ms * 3);
    for _ in 0..30 {
        sheet.tick(ms);
    }

    let snapshot = state.lock().expect("trace lock");
    assert!(snapshot.saw_tick_span, "expected sheet.tick span");

    let order = [
        "sheet.open",
        "sheet.drag.start",
        "sheet.drag.release",
        "sheet.snap_back",
        "sheet.back.press",
        "sheet.close",
        "sheet.close.complete",
    ];
    let mut cursor = snapshot.messages.iter();
    for expected in order {
        assert!(
            cursor.any(|m| m == expected),
            "missing {expected} in order; got {:?}",
            snapshot.messages
        );
    }
    assert_eq!(snapshot.decisions, vec!["snap_back".to_string()]);
}
