use super::*;
use crate::engine::Key;
use crate::surface::{Class, Target};
use crate::viewport::Mode;

#[test]
fn mounts_narrow_into_mobile_with_featured_strip() {
    let engine = mount(NARROW);
    let featured = engine.state().featured_index;

    assert_eq!(engine.state().mode, Mode::Mobile);
    assert!(featured < 9);
    assert_eq!(engine.surface().strips_with(Class::Featured), vec![featured]);
    assert!(engine.surface().has_class(Target::MobileCaption, Class::Visible));
    assert_eq!(
        engine.surface().text(Target::MobileCaption),
        engine.catalog().get(featured).expect("featured item").caption_text
    );
    // Mobile strips show the full image.
    let item = engine.catalog().get(0).expect("item 0");
    assert_eq!(engine.surface().background(Target::Strip(0)), Some(item.image_ref.as_str()));
}

#[test]
fn tap_changes_featured_strip() {
    let mut engine = mobile(3);
    engine.handle(InputEvent::Click(6), ms(100));
    assert_eq!(engine.state().featured_index, 6);
    assert_eq!(engine.surface().strips_with(Class::Featured), vec![6]);
    assert_eq!(engine.state().current_index, None, "taps never expand on mobile");
    assert!(!engine.state().animating());
}

#[test]
fn tap_on_featured_strip_is_noop() {
    let mut engine = mobile(3);
    let state = engine.state().clone();
    let surface = engine.surface().clone();
    engine.handle(InputEvent::Click(3), ms(100));
    assert_eq!(engine.state(), &state);
    assert_eq!(engine.surface(), &surface);
}

#[test]
fn keys_ignored_on_mobile() {
    let mut engine = mobile(3);
    let state = engine.state().clone();
    engine.handle(InputEvent::KeyDown(Key::ArrowRight), ms(100));
    engine.handle(InputEvent::KeyDown(Key::Escape), ms(110));
    assert_eq!(engine.state(), &state);
}

#[test]
fn short_swipe_changes_nothing() {
    let mut engine = mobile(3);
    let state = engine.state().clone();
    let surface = engine.surface().clone();

    swipe(&mut engine, 10.0, 0.0, 50, 1_000);
    engine.advance(ms(5_000));

    assert_eq!(engine.state(), &state);
    assert_eq!(engine.surface(), &surface);
}

#[test]
fn vertical_swipe_changes_nothing() {
    let mut engine = mobile(3);
    swipe(&mut engine, 40.0, 120.0, 50, 1_000);
    engine.advance(ms(5_000));
    assert_eq!(engine.state().featured_index, 3);
}

#[test]
fn slow_swipe_steps_once_without_inertia() {
    let mut engine = mobile(3);
    swipe(&mut engine, 40.0, 0.0, 200, 1_000);
    assert_eq!(engine.state().featured_index, 4);
    assert!(engine.state().pending_inertia.is_none());

    swipe(&mut engine, -40.0, 0.0, 200, 2_000);
    assert_eq!(engine.state().featured_index, 3);
}

#[test]
fn slow_swipe_at_end_is_noop() {
    let mut engine = mobile(8);
    swipe(&mut engine, 40.0, 0.0, 200, 1_000);
    assert_eq!(engine.state().featured_index, 8);
}

#[test]
fn fast_swipe_runs_inertia_forward() {
    let mut engine = mobile(3);
    swipe(&mut engine, 40.0, 0.0, 50, 1_000);

    assert!(engine.state().pending_inertia.is_some());
    assert_eq!(engine.state().featured_index, 3, "nothing moves before the first tick");

    engine.advance(ms(10_000));
    let featured = engine.state().featured_index;
    assert!((4..=8).contains(&featured), "ended at {featured}");
    assert!(engine.state().pending_inertia.is_none());
    assert!(engine.inertia().is_none());
    assert_eq!(engine.surface().strips_with(Class::Featured), vec![featured]);
}

#[test]
fn hard_fling_stops_at_last_item() {
    let mut engine = mobile(5);
    swipe(&mut engine, 300.0, 0.0, 30, 1_000);
    engine.advance(ms(10_000));
    assert_eq!(engine.state().featured_index, 8);
}

#[test]
fn hard_fling_backward_stops_at_first_item() {
    let mut engine = mobile(4);
    swipe(&mut engine, -300.0, 0.0, 30, 1_000);
    engine.advance(ms(10_000));
    assert_eq!(engine.state().featured_index, 0);
}

#[test]
fn new_touch_cancels_running_inertia() {
    let mut engine = mobile(1);
    // 5 px/ms: the first tick does not yet cover a whole strip.
    swipe(&mut engine, 150.0, 0.0, 30, 1_000);
    engine.advance(ms(1_046));
    assert!(engine.inertia().is_some());
    assert_eq!(engine.state().featured_index, 1);

    engine.handle(
        InputEvent::TouchStart(TouchPoint::new(100.0, 300.0, ms(1_050))),
        ms(1_050),
    );
    assert!(engine.state().pending_inertia.is_none());
    assert!(engine.inertia().is_none());

    engine.advance(ms(10_000));
    assert_eq!(engine.state().featured_index, 1);
}

#[test]
fn touches_ignored_on_desktop() {
    let mut engine = desktop();
    let state = engine.state().clone();
    swipe(&mut engine, 300.0, 0.0, 30, 1_000);
    engine.advance(ms(10_000));
    assert_eq!(engine.state(), &state);
}
