use marquee_core::controllers::form::FormPhase;
use marquee_core::controllers::modal::ModalState;
use marquee_core::manifest::{
    FilterButton, FilterCard, FilterTargets, FormTargets, InternalLink, ModalTargets, ModalTrigger,
    NavTargets, PreviewTarget, StageManifest, TransitionTargets,
};
use marquee_core::{Config, ElementId, HostOp, Inputs, Key, Orchestrator, StageEvent, UiEvent};

const DT: f32 = 1.0 / 60.0;

fn orchestrator(manifest: StageManifest) -> Orchestrator {
    Orchestrator::new(Config::default(), &manifest).expect("valid manifest")
}

fn click(element: u32) -> Inputs {
    Inputs::one(UiEvent::Click {
        element: ElementId(element),
    })
}

fn modal_manifest() -> StageManifest {
    StageManifest {
        modal: Some(ModalTargets {
            root: ElementId(20),
            overlay: ElementId(21),
            close: Some(ElementId(22)),
            player: ElementId(30),
            mute_button: Some(ElementId(23)),
            mute_label: Some(ElementId(24)),
            triggers: vec![ModalTrigger {
                element: ElementId(31),
                src: "reel.mp4".into(),
            }],
        }),
        previews: vec![PreviewTarget {
            card: ElementId(40),
            video: ElementId(41),
        }],
        ..Default::default()
    }
}

#[test]
fn escape_is_a_no_op_while_the_modal_is_closed() {
    let mut orch = orchestrator(modal_manifest());
    let out = orch.step(DT, Inputs::one(UiEvent::KeyDown { key: Key::Escape }));
    assert!(out.is_empty());
    assert_eq!(orch.modal_state(), Some(ModalState::Closed));
}

#[test]
fn modal_opens_muted_and_escape_clears_the_source() {
    let mut orch = orchestrator(modal_manifest());

    let out = orch.step(DT, click(31));
    assert!(out.events.iter().any(|e| matches!(
        e,
        StageEvent::ModalOpened { src } if src == "reel.mp4"
    )));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::MediaSetMuted { element, muted: true } if *element == ElementId(30)
    )));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetText { text, .. } if text == "Sound Off"
    )));
    assert!(out
        .ops
        .iter()
        .any(|op| matches!(op, HostOp::ScrollLock(true))));
    assert_eq!(orch.modal_state(), Some(ModalState::OpenMuted));
    assert_eq!(orch.active_playback(), Some(ElementId(30)));

    let out = orch.step(DT, Inputs::one(UiEvent::KeyDown { key: Key::Escape }));
    assert!(out.events.contains(&StageEvent::ModalClosed));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::MediaClearSource { element } if *element == ElementId(30)
    )));
    assert!(out
        .ops
        .iter()
        .any(|op| matches!(op, HostOp::ScrollLock(false))));
    assert_eq!(orch.modal_state(), Some(ModalState::Closed));
    assert_eq!(orch.active_playback(), None);
}

#[test]
fn mute_toggle_flips_label_and_flag_together() {
    let mut orch = orchestrator(modal_manifest());
    orch.step(DT, click(31));

    let out = orch.step(DT, click(23));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::MediaSetMuted { muted: false, .. }
    )));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetText { text, .. } if text == "Sound On"
    )));
    assert_eq!(orch.modal_state(), Some(ModalState::OpenSound));

    let out = orch.step(DT, click(23));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetText { text, .. } if text == "Sound Off"
    )));
    assert_eq!(orch.modal_state(), Some(ModalState::OpenMuted));
}

#[test]
fn hover_preview_steals_playback_from_the_modal_player() {
    let mut orch = orchestrator(modal_manifest());
    orch.step(DT, click(31));
    assert_eq!(orch.active_playback(), Some(ElementId(30)));

    let out = orch.step(DT, Inputs::one(UiEvent::PointerEnter {
        element: ElementId(40),
    }));
    let pause_at = out
        .ops
        .iter()
        .position(|op| matches!(op, HostOp::MediaPause { element } if *element == ElementId(30)))
        .expect("previous holder paused");
    let play_at = out
        .ops
        .iter()
        .position(|op| matches!(op, HostOp::MediaPlay { element } if *element == ElementId(41)))
        .expect("preview started");
    assert!(pause_at < play_at, "old playback stops before new starts");
    assert_eq!(orch.active_playback(), Some(ElementId(41)));
}

fn transition_manifest() -> StageManifest {
    StageManifest {
        location: "/site/index.html".into(),
        nav: Some(NavTargets {
            bar: ElementId(2),
            toggle: Some(ElementId(3)),
            menu: Some(ElementId(4)),
            menu_links: vec![ElementId(90)],
        }),
        transition: Some(TransitionTargets {
            overlay: ElementId(5),
            logo: None,
            links: vec![InternalLink {
                element: ElementId(90),
                href: "work.html".into(),
            }],
        }),
        ..Default::default()
    }
}

#[test]
fn double_click_commits_navigation_exactly_once() {
    let cfg = Config::default();
    let mut orch = orchestrator(transition_manifest());
    let link = || {
        Inputs::one(UiEvent::LinkClick {
            element: ElementId(90),
            href: "work.html".into(),
        })
    };

    let mut navigations = 0;
    let out = orch.step(DT, link());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, StageEvent::NavigationArmed { .. })));
    navigations += count_navigations(&out.ops);

    // Second click while in flight is swallowed.
    let out = orch.step(DT, link());
    navigations += count_navigations(&out.ops);

    let out = orch.step(cfg.transition_duration, Inputs::default());
    navigations += count_navigations(&out.ops);
    let out = orch.step(1.0, Inputs::default());
    navigations += count_navigations(&out.ops);

    assert_eq!(navigations, 1);
    assert!(orch.transition_in_flight());
}

fn count_navigations(ops: &marquee_core::OpBatch) -> usize {
    ops.iter()
        .filter(|op| matches!(op, HostOp::Navigate { .. }))
        .count()
}

#[test]
fn nonqualifying_registered_link_still_navigates() {
    let mut orch = orchestrator(transition_manifest());

    // Cross-page anchor on a registered link: no exit animation, but the
    // suppressed default must come back as an immediate Navigate op.
    let out = orch.step(DT, Inputs::one(UiEvent::LinkClick {
        element: ElementId(90),
        href: "work.html#top".into(),
    }));
    assert_eq!(count_navigations(&out.ops), 1);
    assert!(out.ops.iter().any(
        |op| matches!(op, HostOp::Navigate { href } if href == "work.html#top")
    ));
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, StageEvent::NavigationArmed { .. })));
    assert!(!orch.transition_in_flight());

    // No deferred commit sneaks in later.
    let out = orch.step(2.0, Inputs::default());
    assert_eq!(count_navigations(&out.ops), 0);
}

#[test]
fn menu_link_click_closes_the_menu_and_arms_the_transition() {
    let mut orch = orchestrator(transition_manifest());
    orch.step(DT, click(3));

    let out = orch.step(DT, Inputs::one(UiEvent::LinkClick {
        element: ElementId(90),
        href: "work.html".into(),
    }));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, StageEvent::NavigationArmed { .. })));
    assert!(out
        .events
        .contains(&StageEvent::MenuToggled { open: false }));
}

#[test]
fn form_failure_restores_the_submit_control() {
    let cfg = Config::default();
    let manifest = StageManifest {
        form: Some(FormTargets {
            form: ElementId(100),
            submit: ElementId(101),
            success_panel: Some(ElementId(102)),
            submit_label: "Send Message".into(),
        }),
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);

    let fields = vec![("email".to_string(), "a@b.c".to_string())];
    let out = orch.step(DT, Inputs::one(UiEvent::SubmitRequested {
        fields: fields.clone(),
    }));
    assert!(out
        .ops
        .iter()
        .any(|op| matches!(op, HostOp::Submit { fields: f } if *f == fields)));
    assert_eq!(orch.form_phase(), Some(FormPhase::Sending));

    // A second submit while one is pending is ignored.
    let out = orch.step(DT, Inputs::one(UiEvent::SubmitRequested { fields }));
    assert!(!out.ops.iter().any(|op| matches!(op, HostOp::Submit { .. })));

    let out = orch.step(DT, Inputs::one(UiEvent::SubmitResolved { success: false }));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetText { text, .. } if text == "Error! Try Again"
    )));
    assert_eq!(orch.form_phase(), Some(FormPhase::Error));

    let out = orch.step(cfg.form_error_reset, Inputs::default());
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetText { text, .. } if text == "Send Message"
    )));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetDisabled { disabled: false, .. }
    )));
    assert_eq!(orch.form_phase(), Some(FormPhase::Idle));
}

#[test]
fn form_success_swaps_the_panels() {
    let manifest = StageManifest {
        form: Some(FormTargets {
            form: ElementId(100),
            submit: ElementId(101),
            success_panel: Some(ElementId(102)),
            submit_label: "Send Message".into(),
        }),
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);

    orch.step(DT, Inputs::one(UiEvent::SubmitRequested { fields: vec![] }));
    let out = orch.step(DT, Inputs::one(UiEvent::SubmitResolved { success: true }));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(100) && property == "display" && value == "none"
    )));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(102) && property == "display" && value == "flex"
    )));
    assert!(out
        .ops
        .iter()
        .any(|op| matches!(op, HostOp::FormReset { .. })));
    assert_eq!(orch.form_phase(), Some(FormPhase::Success));
}

fn filter_manifest() -> StageManifest {
    StageManifest {
        filter: Some(FilterTargets {
            buttons: vec![
                FilterButton {
                    element: ElementId(110),
                    category: "all".into(),
                },
                FilterButton {
                    element: ElementId(111),
                    category: "video".into(),
                },
            ],
            cards: vec![
                FilterCard {
                    element: ElementId(120),
                    category: "video".into(),
                },
                FilterCard {
                    element: ElementId(121),
                    category: "design".into(),
                },
            ],
        }),
        ..Default::default()
    }
}

#[test]
fn filtered_card_leaves_layout_only_after_the_fade() {
    let cfg = Config::default();
    let mut orch = orchestrator(filter_manifest());

    let out = orch.step(DT, click(111));
    // The design card starts fading; it must not leave layout yet.
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(121) && property == "opacity" && value == "0"
    )));
    assert!(!out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, .. }
            if *element == ElementId(121) && property == "display"
    )));
    // The matching card is untouched.
    assert!(!out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, .. } if *element == ElementId(120)
    )));

    let out = orch.step(cfg.filter_fade, Inputs::default());
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(121) && property == "display" && value == "none"
    )));
}

#[test]
fn restored_card_occupies_layout_before_it_fades_in() {
    let cfg = Config::default();
    let mut orch = orchestrator(filter_manifest());

    orch.step(DT, click(111));
    orch.step(cfg.filter_fade, Inputs::default());

    // Back to "all": the hidden card re-enters layout immediately at
    // opacity 0, and only fades in after the enter delay.
    let out = orch.step(DT, click(110));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::ClearStyle { element, property }
            if *element == ElementId(121) && property == "display"
    )));
    assert!(!out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(121) && property == "opacity" && value == "1"
    )));

    let out = orch.step(cfg.filter_enter_delay, Inputs::default());
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(121) && property == "opacity" && value == "1"
    )));
}

#[test]
fn refiltering_mid_fade_reverses_the_card() {
    let cfg = Config::default();
    let mut orch = orchestrator(filter_manifest());

    // Start hiding the design card, then switch back before the fade ends.
    orch.step(DT, click(111));
    orch.step(cfg.filter_fade / 2.0, Inputs::default());
    let out = orch.step(DT, click(110));
    assert!(out.ops.iter().any(|op| matches!(
        op,
        HostOp::ClearStyle { element, property }
            if *element == ElementId(121) && property == "display"
    )));

    // The stale leave timer must not fire a display:none afterwards.
    let out = orch.step(cfg.filter_fade, Inputs::default());
    assert!(!out.ops.iter().any(|op| matches!(
        op,
        HostOp::SetStyle { element, property, value }
            if *element == ElementId(121) && property == "display" && value == "none"
    )));
    assert_eq!(orch.active_category(), Some("all"));
}
