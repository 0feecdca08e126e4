#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn range(min: f64, max: f64) -> ZoomRange {
    ZoomRange::new(min, max).unwrap()
}

/// Tick until settled, starting at `t0`. Returns the final timestamp.
fn run_to_end(z: &mut ZoomController, t0: f64) -> f64 {
    let mut t = t0;
    while z.tick(t) == FrameRequest::Schedule {
        t += 16.0;
    }
    t
}

// =============================================================
// ZoomRange
// =============================================================

#[test]
fn default_range() {
    let r = ZoomRange::default();
    assert_eq!((r.min(), r.max()), (0.1, 3.0));
}

#[test]
fn range_rejects_non_positive_min() {
    assert_eq!(ZoomRange::new(0.0, 1.0), Err(ConfigError::InvalidZoomRange { min: 0.0, max: 1.0 }));
    assert!(ZoomRange::new(-1.0, 1.0).is_err());
}

#[test]
fn range_rejects_inverted_bounds() {
    assert!(ZoomRange::new(2.0, 1.0).is_err());
    assert!(ZoomRange::new(1.0, 1.0).is_ok());
}

#[test]
fn range_rejects_non_finite() {
    assert!(ZoomRange::new(0.5, f64::INFINITY).is_err());
    assert!(ZoomRange::new(f64::NAN, 1.0).is_err());
}

#[test]
fn range_clamp() {
    let r = range(0.5, 3.0);
    assert_eq!(r.clamp(0.1), 0.5);
    assert_eq!(r.clamp(9.0), 3.0);
    assert_eq!(r.clamp(1.25), 1.25);
    assert_eq!(r.clamp(f64::NAN), 0.5);
}

// =============================================================
// Easing
// =============================================================

#[test]
fn ease_out_cubic_endpoints_and_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_out_cubic(f64::from(i) / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_clamps_initial() {
    let z = ZoomController::new(range(0.5, 3.0), 0.3);
    assert_eq!(z.current(), 0.5);
    assert_eq!(z.target(), 0.5);
    assert!(!z.is_animating());
}

// =============================================================
// Stepping
// =============================================================

#[test]
fn scenario_zoom_in_from_one_lands_on_exact_decimal() {
    let mut z = ZoomController::new(range(0.5, 3.0), 1.0);
    assert_eq!(z.zoom_by(ZoomDirection::In), FrameRequest::Schedule);
    assert_eq!(z.target(), 1.1);
    run_to_end(&mut z, 0.0);
    assert_eq!(z.current(), 1.1);
    assert!(!z.is_animating());
}

#[test]
fn scenario_repeated_zoom_in_clamps_to_max() {
    let mut z = ZoomController::new(range(0.5, 3.0), 1.0);
    for _ in 0..40 {
        z.zoom_by(ZoomDirection::In);
    }
    assert_eq!(z.target(), 3.0);
    run_to_end(&mut z, 0.0);
    assert_eq!(z.current(), 3.0);
}

#[test]
fn repeated_steps_stay_decimal() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    for _ in 0..5 {
        z.zoom_by(ZoomDirection::Out);
    }
    assert_eq!(z.target(), 0.5);
    for _ in 0..7 {
        z.zoom_by(ZoomDirection::In);
    }
    assert_eq!(z.target(), 1.2);
}

#[test]
fn step_at_bound_requests_nothing() {
    let mut z = ZoomController::new(range(0.5, 3.0), 3.0);
    assert_eq!(z.zoom_by(ZoomDirection::In), FrameRequest::None);
    assert!(!z.is_animating());
}

#[test]
fn zoom_out_clamps_to_min() {
    let mut z = ZoomController::new(range(0.5, 3.0), 0.55);
    z.zoom_by(ZoomDirection::Out);
    assert_eq!(z.target(), 0.5);
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_up_zooms_in_proportionally() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    z.zoom_wheel(-100.0);
    assert_eq!(z.target(), 1.05);
    z.zoom_wheel(-200.0);
    assert_eq!(z.target(), 1.15);
}

#[test]
fn wheel_down_zooms_out() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    z.zoom_wheel(50.0);
    assert_eq!(z.target(), 0.975);
}

#[test]
fn wheel_zero_is_noop() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    assert_eq!(z.zoom_wheel(0.0), FrameRequest::None);
    assert_eq!(z.target(), 1.0);
}

// =============================================================
// Animation
// =============================================================

#[test]
fn tick_without_animation_requests_nothing() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    assert_eq!(z.tick(123.0), FrameRequest::None);
}

#[test]
fn start_time_is_first_tick() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    z.set_zoom(2.0);
    assert_eq!(z.tick(5000.0), FrameRequest::Schedule);
    assert_eq!(z.current(), 1.0);
    assert_eq!(z.tick(5100.0), FrameRequest::Schedule);
    assert!((z.current() - (1.0 + ease_out_cubic(0.5))).abs() < 1e-12);
    assert_eq!(z.tick(5200.0), FrameRequest::None);
    assert_eq!(z.current(), 2.0);
}

#[test]
fn completion_snaps_even_with_late_frame() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    z.set_zoom(0.7);
    z.tick(0.0);
    assert_eq!(z.tick(10_000.0), FrameRequest::None);
    assert_eq!(z.current(), 0.7);
}

#[test]
fn interruption_restarts_from_displayed_value() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    z.set_zoom(2.0);
    z.tick(0.0);
    z.tick(100.0);
    let mid = z.current();
    assert!(mid > 1.0 && mid < 2.0);

    assert_eq!(z.zoom_by(ZoomDirection::In), FrameRequest::Reschedule);
    assert_eq!(z.target(), 2.1);
    // First tick of the new animation sits on the displayed value.
    z.tick(116.0);
    assert_eq!(z.current(), mid);
    run_to_end(&mut z, 116.0);
    assert_eq!(z.current(), 2.1);
}

#[test]
fn set_immediate_cancels_animation() {
    let mut z = ZoomController::new(range(0.1, 3.0), 1.0);
    z.set_zoom(2.0);
    assert!(z.set_immediate(0.25));
    assert_eq!(z.current(), 0.25);
    assert_eq!(z.target(), 0.25);
    assert!(!z.is_animating());
    assert!(!z.set_immediate(0.5));
}

#[test]
fn set_immediate_clamps() {
    let mut z = ZoomController::new(range(0.5, 3.0), 1.0);
    z.set_immediate(0.01);
    assert_eq!(z.current(), 0.5);
}

#[test]
fn sweep_converges_without_overshoot() {
    let mut rng = StdRng::seed_from_u64(42);
    let r = range(0.1, 3.0);
    for _ in 0..500 {
        let mut z = ZoomController::new(r, rng.random_range(0.1..3.0));
        let wanted = rng.random_range(-1.0..5.0);
        let from = z.current();
        z.set_zoom(wanted);
        let to = z.target();
        assert_eq!(to, r.clamp(to));

        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let mut t = rng.random_range(0.0..1e6);
        loop {
            let req = z.tick(t);
            assert!(z.current() >= lo - 1e-12 && z.current() <= hi + 1e-12);
            if req == FrameRequest::None {
                break;
            }
            t += rng.random_range(1.0..40.0);
        }
        assert_eq!(z.current(), to);
    }
}
