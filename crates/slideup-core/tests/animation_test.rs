//! Integration tests for the animation module.

use slideup_core::animation::*;
use std::time::Duration;

const MS_16: Duration = Duration::from_millis(16);
const MS_300: Duration = Duration::from_millis(300);

#[test]
fn tween_frame_by_frame_matches_single_tick() {
    let mut stepped = Tween::new(260.0, 0.0, MS_300);
    for _ in 0..10 {
        stepped.tick(Duration::from_millis(15));
    }
    let mut jumped = Tween::new(260.0, 0.0, MS_300);
    jumped.tick(Duration::from_millis(150));
    assert!((stepped.value() - jumped.value()).abs() < 1e-9);
}

#[test]
fn standard_curve_open_trajectory_is_reproducible() {
    let trajectory = || {
        let mut offset = AnimatedOffset::new(260.0);
        offset.animate_to(0.0, Curve::timing(MS_300, standard));
        let mut samples = Vec::new();
        while offset.is_animating() {
            offset.tick(MS_16);
            samples.push(offset.value());
        }
        samples
    };
    let first = trajectory();
    let second = trajectory();
    assert_eq!(first, second);
    assert_eq!(first.last().copied(), Some(0.0));
}

#[test]
fn open_then_reverse_keeps_continuity() {
    let mut offset = AnimatedOffset::new(260.0);
    offset.animate_to(0.0, Curve::timing(MS_300, standard));
    for _ in 0..5 {
        offset.tick(MS_16);
    }
    let mid = offset.value();
    assert!(mid > 0.0 && mid < 260.0);

    // Closing mid-open starts from where the sheet is, not from an endpoint.
    let token = offset.animate_to(260.0, Curve::timing(MS_300, standard));
    offset.tick(Duration::ZERO);
    assert!((offset.value() - mid).abs() < 1e-9);

    let mut completions = Vec::new();
    for _ in 0..40 {
        completions.extend(offset.tick(MS_16));
    }
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].token, token);
    assert_eq!(offset.value(), 260.0);
}

#[test]
fn spring_snap_back_from_drag_position() {
    let mut offset = AnimatedOffset::new(0.0);
    offset.set_to(80.0);
    let token = offset.animate_to(0.0, Curve::spring(SpringParams::default()));

    let mut frames = 0;
    let done = loop {
        frames += 1;
        if let Some(done) = offset.tick(MS_16) {
            break done;
        }
        assert!(frames < 1000, "spring never settled");
    };
    assert_eq!(done.token, token);
    assert_eq!(offset.value(), 0.0);
}

#[test]
fn named_easings_match_functions() {
    assert_eq!(Easing::Standard.apply(0.3), standard(0.3));
    assert_eq!(Easing::Ease.apply(0.3), ease(0.3));
    assert_eq!(Easing::default(), Easing::Standard);
}
