//! End-to-end gesture scenarios against in-memory strips.

use std::cell::RefCell;
use std::rc::Rc;

use listing_map::slider::{
    AttachOutcome, FrameCommand, GestureInput, HeadlessIndicators, HeadlessStrip, PhotoSlider,
    SliderConfig, SliderPhase, SliderRegistry, StripId, StripSurface,
};

const WIDTH: f64 = 300.0;

fn slider(images: usize, config: SliderConfig) -> PhotoSlider<HeadlessStrip, HeadlessIndicators> {
    PhotoSlider::new(
        HeadlessStrip::new(images, WIDTH),
        HeadlessIndicators::new(images),
        config,
    )
}

fn settle(slider: &mut PhotoSlider<HeadlessStrip, HeadlessIndicators>) -> usize {
    let mut frames = 0;
    while slider.frame_pending() {
        slider.on_frame();
        frames += 1;
        assert!(frames < 10_000, "slider never settled");
    }
    frames
}

#[test]
fn half_slide_drag_snaps_to_second_photo() {
    let mut slider = slider(3, SliderConfig::default());

    assert_eq!(slider.handle_input(GestureInput::Start { x: 500.0 }), None);
    slider.handle_input(GestureInput::Move { x: 375.0 });
    assert!((slider.strip().scroll_offset() - 100.0).abs() < 1e-9);
    slider.handle_input(GestureInput::Move { x: 250.0 });
    assert!((slider.strip().scroll_offset() - 200.0).abs() < 1e-9);
    assert_eq!(slider.active_index(), Some(1));

    // A final move that goes nowhere leaves no release velocity.
    slider.handle_input(GestureInput::Move { x: 250.0 });
    assert_eq!(slider.velocity(), 0.0);

    assert_eq!(
        slider.handle_input(GestureInput::End),
        Some(FrameCommand::Schedule)
    );
    assert_eq!(slider.phase(), SliderPhase::Snapping);
    assert_eq!(slider.strip().scroll_offset(), 300.0);
    assert!(slider.strip().is_smooth());

    settle(&mut slider);
    assert_eq!(slider.phase(), SliderPhase::Idle);
    assert_eq!(slider.active_index(), Some(1));
    assert_eq!(slider.indicators().active_indices(), vec![1]);
}

#[test]
fn empty_strip_ignores_everything() {
    let mut slider = PhotoSlider::new(
        HeadlessStrip::empty(WIDTH),
        HeadlessIndicators::new(0),
        SliderConfig::default(),
    );

    assert_eq!(slider.handle_input(GestureInput::Start { x: 10.0 }), None);
    slider.handle_input(GestureInput::Move { x: -400.0 });
    assert_eq!(slider.handle_input(GestureInput::End), None);
    assert_eq!(slider.on_frame(), None);

    assert_eq!(slider.phase(), SliderPhase::Idle);
    assert_eq!(slider.active_index(), None);
    assert_eq!(slider.strip().scroll_offset(), 0.0);
}

#[test]
fn flick_decays_geometrically_and_lands_on_a_photo() {
    let config = SliderConfig::default();
    let mut slider = PhotoSlider::new(
        HeadlessStrip::new(5, WIDTH).with_offset(900.0),
        HeadlessIndicators::new(5),
        config,
    );
    assert_eq!(slider.active_index(), Some(3));

    slider.handle_input(GestureInput::Start { x: 0.0 });
    slider.handle_input(GestureInput::Move { x: 80.0 });
    assert!((slider.velocity() - 8.0).abs() < 1e-9);
    assert!((slider.strip().scroll_offset() - 836.0).abs() < 1e-9);

    assert_eq!(
        slider.handle_input(GestureInput::End),
        Some(FrameCommand::Schedule)
    );
    assert_eq!(slider.phase(), SliderPhase::MomentumDecay);
    assert!(!slider.strip().is_smooth());

    let mut frames = 0;
    let mut last_offset = slider.strip().scroll_offset();
    loop {
        let before = slider.velocity();
        let command = slider.on_frame();
        frames += 1;
        if command.is_none() {
            break;
        }
        assert!((slider.velocity() - before * config.friction).abs() < 1e-9);
        let offset = slider.strip().scroll_offset();
        assert!(offset < last_offset, "positive velocity scrolls backwards");
        last_offset = offset;
        assert_eq!(slider.indicators().active_indices().len(), 1);
    }

    assert!(frames < 200);
    assert_eq!(slider.phase(), SliderPhase::Idle);
    assert_eq!(slider.velocity(), 0.0);
    assert!(slider.strip().is_smooth());

    let offset = slider.strip().scroll_offset();
    let index = slider.active_index().unwrap();
    assert!((offset - index as f64 * WIDTH).abs() < 1e-9);
    assert!(offset < 836.0);
    assert_eq!(slider.indicators().active_indices(), vec![index]);
}

#[test]
fn touch_during_momentum_cancels_pending_frame() {
    let mut slider = slider(4, SliderConfig::default());
    slider.handle_input(GestureInput::Start { x: 400.0 });
    slider.handle_input(GestureInput::Move { x: 300.0 });
    slider.handle_input(GestureInput::End);
    assert_eq!(slider.phase(), SliderPhase::MomentumDecay);
    slider.on_frame();

    assert_eq!(
        slider.handle_input(GestureInput::Start { x: 300.0 }),
        Some(FrameCommand::Cancel)
    );
    assert_eq!(slider.phase(), SliderPhase::Dragging);
    assert_eq!(slider.velocity(), 0.0);
}

#[test]
fn drag_offset_is_damped_and_monotone() {
    let mut slider = slider(6, SliderConfig::without_momentum());
    slider.handle_input(GestureInput::Start { x: 1000.0 });

    let mut previous = slider.strip().scroll_offset();
    for step in 1..=40 {
        let travel = f64::from(step) * 50.0;
        slider.handle_input(GestureInput::Move { x: 1000.0 - travel });

        let offset = slider.strip().scroll_offset();
        assert!(offset >= previous);
        assert!((offset - (travel * 0.8).min(5.0 * WIDTH)).abs() < 1e-9);
        assert_eq!(slider.indicators().active_indices().len(), 1);
        previous = offset;
    }

    slider.handle_input(GestureInput::End);
    settle(&mut slider);
    assert_eq!(slider.active_index(), Some(5));
    assert_eq!(slider.indicators().active_indices(), vec![5]);
}

#[test]
fn registry_attach_is_idempotent() {
    let mut registry = SliderRegistry::new(SliderConfig::default());
    let first_dots = Rc::new(RefCell::new(HeadlessIndicators::new(3)));
    let second_dots = Rc::new(RefCell::new(HeadlessIndicators::new(3)));

    assert_eq!(
        registry.attach(
            StripId(7),
            Box::new(HeadlessStrip::new(3, WIDTH)),
            Box::new(Rc::clone(&first_dots)),
        ),
        AttachOutcome::Attached
    );
    assert_eq!(
        registry.attach(
            StripId(7),
            Box::new(HeadlessStrip::new(3, WIDTH)),
            Box::new(Rc::clone(&second_dots)),
        ),
        AttachOutcome::AlreadyAttached
    );

    assert_eq!(registry.len(), 1);
    assert_eq!(first_dots.borrow().active_indices(), vec![0]);
    assert_eq!(second_dots.borrow().toggles(), 0);

    registry.handle_input(StripId(7), GestureInput::Start { x: 300.0 });
    registry.handle_input(StripId(7), GestureInput::Move { x: 0.0 });
    assert_eq!(first_dots.borrow().active_indices(), vec![1]);
    assert_eq!(second_dots.borrow().toggles(), 0);
}

#[test]
fn snap_follows_width_after_relayout() {
    let strip = Rc::new(RefCell::new(HeadlessStrip::new(3, WIDTH)));
    let mut slider = PhotoSlider::new(
        Rc::clone(&strip),
        HeadlessIndicators::new(3),
        SliderConfig::without_momentum(),
    );
    strip.borrow_mut().resize(200.0);

    slider.handle_input(GestureInput::Start { x: 500.0 });
    slider.handle_input(GestureInput::Move { x: 310.0 });
    assert!((strip.borrow().scroll_offset() - 152.0).abs() < 1e-9);
    slider.handle_input(GestureInput::End);
    settle_shared(&mut slider);

    assert_eq!(strip.borrow().scroll_offset(), 200.0);
    assert_eq!(slider.active_index(), Some(1));

    // The clamp uses the new width too: two slides of 200 past the first.
    slider.handle_input(GestureInput::Start { x: 1000.0 });
    slider.handle_input(GestureInput::Move { x: 0.0 });
    assert_eq!(strip.borrow().scroll_offset(), 400.0);
    slider.handle_input(GestureInput::End);
    settle_shared(&mut slider);
    assert_eq!(slider.active_index(), Some(2));
    assert_eq!(slider.indicators().active_indices(), vec![2]);
}

fn settle_shared(slider: &mut PhotoSlider<Rc<RefCell<HeadlessStrip>>, HeadlessIndicators>) {
    let mut frames = 0;
    while slider.frame_pending() {
        slider.on_frame();
        frames += 1;
        assert!(frames < 10_000, "slider never settled");
    }
}

#[test]
fn every_release_settles_on_a_whole_photo() {
    let travels = [-700.0, -400.0, -150.0, -60.0, -5.0, 0.0, 5.0, 60.0, 150.0, 400.0, 700.0];
    let configs = [SliderConfig::default(), SliderConfig::without_momentum()];

    for images in 1..=5_usize {
        let max_offset = (images - 1) as f64 * WIDTH;
        let starts: Vec<f64> = (0..=2 * (images - 1))
            .map(|half_slides| half_slides as f64 * WIDTH / 2.0)
            .chain([max_offset * 0.37, max_offset * 0.83])
            .collect();

        for config in configs {
            for &start in &starts {
                for travel in travels {
                    let mut slider = PhotoSlider::new(
                        HeadlessStrip::new(images, WIDTH).with_offset(start),
                        HeadlessIndicators::new(images),
                        config,
                    );

                    slider.handle_input(GestureInput::Start { x: 1000.0 });
                    slider.handle_input(GestureInput::Move { x: 1000.0 + travel / 2.0 });
                    slider.handle_input(GestureInput::Move { x: 1000.0 + travel });
                    slider.handle_input(GestureInput::End);
                    settle(&mut slider);

                    let case = format!("images={images} start={start} travel={travel}");
                    assert_eq!(slider.phase(), SliderPhase::Idle, "{case}");
                    let index = slider.active_index().expect(&case);
                    assert!(index < images, "{case}");
                    let offset = slider.strip().scroll_offset();
                    assert!((offset - index as f64 * WIDTH).abs() < 1e-9, "{case}: offset {offset}");
                    assert_eq!(slider.indicators().active_indices(), vec![index], "{case}");
                }
            }
        }
    }
}
