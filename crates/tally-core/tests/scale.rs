use tally_core::page::PageSize;
use tally_core::scale::{fit_scale, Measurement, ScaleToFit};

fn measurement(container: f32, intrinsic: f32) -> Measurement {
    Measurement {
        container_width: container,
        intrinsic_width: intrinsic,
        intrinsic_height: intrinsic * 1.414,
    }
}

#[test]
fn half_width_container_halves_the_scale() {
    assert_eq!(fit_scale(400.0, 800.0), Some(0.5));
}

#[test]
fn wide_container_never_enlarges() {
    assert_eq!(fit_scale(800.0, 800.0), Some(1.0));
    assert_eq!(fit_scale(2400.0, 800.0), Some(1.0));
}

#[test]
fn unmeasurable_widths_defer() {
    assert_eq!(fit_scale(400.0, 0.0), None);
    assert_eq!(fit_scale(400.0, f32::NAN), None);
    assert_eq!(fit_scale(0.0, 800.0), None);
    assert_eq!(fit_scale(-10.0, 800.0), None);
}

#[test]
fn underflowing_container_defers() {
    assert_eq!(fit_scale(1e-45, 800.0), None);
    assert_eq!(fit_scale(f32::MIN_POSITIVE, f32::MAX), None);

    let mut scale = ScaleToFit::new(true);
    assert_eq!(scale.measure(measurement(400.0, 800.0)), 0.5);
    assert_eq!(scale.measure(measurement(1e-45, 800.0)), 0.5);
}

#[test]
fn fit_off_pins_scale_to_one() {
    let mut scale = ScaleToFit::new(false);
    assert_eq!(scale.measure(measurement(400.0, 800.0)), 1.0);
    assert_eq!(scale.spacer_height(), None);

    assert_eq!(scale.toggle_fit(), 0.5);
    assert_eq!(scale.toggle_fit(), 1.0);
}

#[test]
fn deferred_measurement_keeps_previous_scale() {
    let mut scale = ScaleToFit::new(true);
    assert_eq!(scale.measure(measurement(400.0, 800.0)), 0.5);
    assert_eq!(scale.measure(measurement(400.0, 0.0)), 0.5);
    assert_eq!(scale.last_measurement(), Some(measurement(400.0, 800.0)));
}

#[test]
fn scale_stays_within_unit_interval() {
    let mut scale = ScaleToFit::default();
    for container in [1.0_f32, 37.5, 400.0, 793.0, 794.0, 5000.0] {
        let s = scale.measure(Measurement::for_page(container, PageSize::A4));
        assert!(s > 0.0 && s <= 1.0, "scale {s} for container {container}");
    }
}

#[test]
fn spacer_tracks_scaled_height() {
    let mut scale = ScaleToFit::new(true);
    assert_eq!(scale.spacer_height(), None);
    scale.measure(Measurement {
        container_width: 300.0,
        intrinsic_width: 600.0,
        intrinsic_height: 1000.0,
    });
    assert_eq!(scale.spacer_height(), Some(500.0));
}
