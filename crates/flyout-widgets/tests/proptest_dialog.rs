//! Property tests for dialog lifecycle and drag clamping.

use flyout_core::{AnimatedElement, HostEnvironment, Point, Size, TransitionState};
use flyout_test::{CallbackProbe, FakeHost};
use flyout_widgets::dialog::{clamp_anchor, Dialog, DialogConfig, DialogMode, ScrollLock};
use proptest::prelude::*;

/// One step of a toggle script.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Render with this visibility and commit
    Render(bool),
    /// Deliver every pending completion
    Settle,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![any::<bool>().prop_map(Step::Render), Just(Step::Settle)]
}

proptest! {
    #[test]
    fn prop_callbacks_match_completed_transitions(
        steps in prop::collection::vec(step(), 1..40),
        modal in any::<bool>(),
        destroy in any::<bool>(),
    ) {
        let probe = CallbackProbe::new();
        let lock = ScrollLock::new();
        let mut host = FakeHost::new().body_overflow_style("auto");
        let mut dialog = Dialog::with_scroll_lock(lock.clone());
        let mode = if modal { DialogMode::Modal } else { DialogMode::NotModal };
        let base = DialogConfig::new()
            .mode(mode)
            .destroy_on_close(destroy)
            .on_opened(probe.hook("opened"))
            .on_closed(probe.hook("closed"));

        let mut expected_opened = 0;
        let mut expected_closed = 0;
        let mut visible = false;
        for step in steps.into_iter().chain([Step::Settle]) {
            match step {
                Step::Render(v) => {
                    visible = v;
                    dialog.render(&base.clone().visible(v), &mut host).unwrap();
                    dialog.commit(&mut host);
                }
                Step::Settle => {
                    for anim in host.take_animations() {
                        let before = dialog.panel_state();
                        let current = dialog.transition_end(anim.ticket, &mut host);
                        if current && anim.ticket.element == AnimatedElement::Panel {
                            match before {
                                TransitionState::Entering => expected_opened += 1,
                                TransitionState::Exiting => expected_closed += 1,
                                _ => {}
                            }
                        }
                    }
                }
            }
        }

        prop_assert_eq!(probe.count("opened"), expected_opened);
        prop_assert_eq!(probe.count("closed"), expected_closed);
        prop_assert!(!dialog.panel_state().is_animating());
        prop_assert_eq!(dialog.panel_state().is_showing(), visible);
        if !visible {
            prop_assert!(!lock.is_locked());
            prop_assert_eq!(host.body_overflow(), Some("auto".to_string()));
        }
    }

    #[test]
    fn prop_no_close_fires_while_shown(
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let probe = CallbackProbe::new();
        let mut host = FakeHost::new();
        let mut dialog = Dialog::with_scroll_lock(ScrollLock::new());
        let base = DialogConfig::new().on_closed(probe.hook("closed"));

        let mut visible = false;
        for step in steps {
            match step {
                Step::Render(v) => {
                    visible = v;
                    dialog.render(&base.clone().visible(v), &mut host).unwrap();
                    dialog.commit(&mut host);
                }
                Step::Settle => {
                    let closed = probe.count("closed");
                    for anim in host.take_animations() {
                        dialog.transition_end(anim.ticket, &mut host);
                    }
                    if visible {
                        prop_assert_eq!(probe.count("closed"), closed);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_clamped_anchor_stays_in_viewport(
        x in -2000.0f32..4000.0,
        y in -2000.0f32..4000.0,
        w in 10.0f32..800.0,
        h in 10.0f32..600.0,
    ) {
        let viewport = Size::new(1280.0, 720.0);
        let size = Size::new(w, h);
        let anchor = clamp_anchor(Point::new(x, y), size, viewport);
        prop_assert!(anchor.x - w / 2.0 >= -1e-3);
        prop_assert!(anchor.x + w / 2.0 <= viewport.width + 1e-3);
        prop_assert!(anchor.y - h / 2.0 >= -1e-3);
        prop_assert!(anchor.y + h / 2.0 <= viewport.height + 1e-3);
    }

    #[test]
    fn prop_clamp_is_identity_inside(
        x in 400.0f32..880.0,
        y in 300.0f32..420.0,
    ) {
        let anchor = clamp_anchor(Point::new(x, y), Size::new(200.0, 100.0), Size::new(1280.0, 720.0));
        prop_assert_eq!(anchor, Point::new(x, y));
    }
}
