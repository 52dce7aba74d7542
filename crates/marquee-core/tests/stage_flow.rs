use marquee_core::controllers::reveal::RevealState;
use marquee_core::manifest::{
    CounterTarget, CursorTargets, RevealTarget, SliderTargets, StageManifest,
};
use marquee_core::{Config, ElementId, HostOp, Inputs, Orchestrator, StageEvent, UiEvent};

const DT: f32 = 1.0 / 60.0;

fn orchestrator(manifest: StageManifest) -> Orchestrator {
    Orchestrator::new(Config::default(), &manifest).expect("valid manifest")
}

#[test]
fn loader_dismissal_unlocks_scroll_after_the_delay() {
    let manifest = StageManifest {
        loader: Some(ElementId(1)),
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);

    // Load signal arms the delay; nothing fires yet.
    let out = orch.step(DT, Inputs::one(UiEvent::WindowLoaded));
    assert!(!out.events.contains(&StageEvent::LoaderDismissed));

    // Run past the configured delay.
    let out = orch.step(Config::default().loader_delay, Inputs::default());
    assert!(out.events.contains(&StageEvent::LoaderDismissed));
    assert!(out.ops.iter().any(
        |op| matches!(op, HostOp::AddClass { element, class } if *element == ElementId(1) && class == "hidden")
    ));
    assert!(out
        .ops
        .iter()
        .any(|op| matches!(op, HostOp::ScrollLock(false))));

    // Dismissal is one-shot.
    let out = orch.step(5.0, Inputs::one(UiEvent::WindowLoaded));
    assert!(!out.events.contains(&StageEvent::LoaderDismissed));
}

#[test]
fn reveal_fires_exactly_once_per_element() {
    let manifest = StageManifest {
        loader: Some(ElementId(1)),
        reveals: vec![RevealTarget {
            element: ElementId(7),
            stagger: 0,
        }],
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);
    let mut triggered = 0;

    // Below threshold: the fraction is recorded but nothing fires, not even
    // through the loader-dismissal sweep.
    let out = orch.step(DT, Inputs::one(UiEvent::ElementVisible {
        element: ElementId(7),
        fraction: 0.05,
    }));
    triggered += count_reveals(&out.events);
    let out = orch.step(5.0, Inputs::one(UiEvent::WindowLoaded));
    triggered += count_reveals(&out.events);
    assert_eq!(triggered, 0);
    assert_eq!(orch.reveal_state(ElementId(7)), Some(RevealState::Pending));

    // Crossing the threshold fires once; later reports are ignored.
    for fraction in [0.5, 0.9, 1.0] {
        let out = orch.step(DT, Inputs::one(UiEvent::ElementVisible {
            element: ElementId(7),
            fraction,
        }));
        triggered += count_reveals(&out.events);
    }
    assert_eq!(triggered, 1);
    assert_eq!(orch.reveal_state(ElementId(7)), Some(RevealState::Revealed));
}

fn count_reveals(events: &[StageEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, StageEvent::RevealTriggered { .. }))
        .count()
}

#[test]
fn counter_lands_exactly_on_its_target() {
    let manifest = StageManifest {
        counters: vec![CounterTarget {
            element: ElementId(50),
            target: 120,
        }],
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);

    let mut last_text = None;
    let mut finished = false;
    let out = orch.step(0.5, Inputs::one(UiEvent::ElementVisible {
        element: ElementId(50),
        fraction: 0.5,
    }));
    record_counter(out, &mut last_text, &mut finished);
    for _ in 0..4 {
        let out = orch.step(0.5, Inputs::default());
        record_counter(out, &mut last_text, &mut finished);
    }

    assert_eq!(last_text.as_deref(), Some("120"));
    assert!(finished);
}

fn record_counter(
    out: &marquee_core::Outputs,
    last_text: &mut Option<String>,
    finished: &mut bool,
) {
    for op in out.ops.iter() {
        if let HostOp::SetText { element, text } = op {
            if *element == ElementId(50) {
                *last_text = Some(text.clone());
            }
        }
    }
    if out
        .events
        .iter()
        .any(|e| matches!(e, StageEvent::CounterFinished { value: 120, .. }))
    {
        *finished = true;
    }
}

#[test]
fn cursor_proxies_converge_on_the_pointer() {
    let manifest = StageManifest {
        fine_pointer: true,
        frame_scheduler: true,
        cursor: Some(CursorTargets {
            dot: ElementId(10),
            outline: ElementId(11),
            root: ElementId(12),
            hover_targets: vec![],
        }),
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);

    orch.step(DT, Inputs::one(UiEvent::PointerMove { x: 100.0, y: 50.0 }));
    let mut dot = (0.0, 0.0);
    let mut outline = (0.0, 0.0);
    for _ in 0..120 {
        let out = orch.step(DT, Inputs::default());
        for op in out.ops.iter() {
            if let HostOp::SetTransform { element, x, y } = op {
                if *element == ElementId(10) {
                    dot = (*x, *y);
                } else if *element == ElementId(11) {
                    outline = (*x, *y);
                }
            }
        }
    }

    assert!((dot.0 - 100.0).abs() < 0.01 && (dot.1 - 50.0).abs() < 0.01);
    assert!((outline.0 - 100.0).abs() < 0.5 && (outline.1 - 50.0).abs() < 0.5);
}

#[test]
fn coarse_pointer_never_emits_cursor_transforms() {
    let manifest = StageManifest {
        fine_pointer: false,
        frame_scheduler: true,
        cursor: Some(CursorTargets {
            dot: ElementId(10),
            outline: ElementId(11),
            root: ElementId(12),
            hover_targets: vec![],
        }),
        ..Default::default()
    };
    let mut orch = orchestrator(manifest);

    orch.step(DT, Inputs::one(UiEvent::PointerMove { x: 100.0, y: 50.0 }));
    let out = orch.step(DT, Inputs::default());
    assert!(!out
        .ops
        .iter()
        .any(|op| matches!(op, HostOp::SetTransform { .. })));
}

fn slider_manifest() -> StageManifest {
    StageManifest {
        slider: Some(SliderTargets {
            testimonials: (0..5).map(|i| ElementId(60 + i)).collect(),
            dots: (0..5).map(|i| ElementId(70 + i)).collect(),
            prev: Some(ElementId(80)),
            next: Some(ElementId(81)),
        }),
        ..Default::default()
    }
}

#[test]
fn slider_wraps_in_both_directions() {
    let mut orch = orchestrator(slider_manifest());

    for _ in 0..5 {
        orch.step(DT, Inputs::one(UiEvent::Click {
            element: ElementId(81),
        }));
    }
    assert_eq!(orch.active_slide(), Some(0));

    orch.step(DT, Inputs::one(UiEvent::Click {
        element: ElementId(80),
    }));
    assert_eq!(orch.active_slide(), Some(4));

    // Dot jump lands directly.
    orch.step(DT, Inputs::one(UiEvent::Click {
        element: ElementId(72),
    }));
    assert_eq!(orch.active_slide(), Some(2));
}

#[test]
fn manual_navigation_defers_the_auto_advance() {
    let cfg = Config::default();
    let mut orch = orchestrator(slider_manifest());

    // Just short of the interval, then a manual click: the pending
    // auto-advance must rewind instead of firing on top of it.
    orch.step(cfg.slider_interval - 0.1, Inputs::default());
    orch.step(DT, Inputs::one(UiEvent::Click {
        element: ElementId(81),
    }));
    assert_eq!(orch.active_slide(), Some(1));

    let out = orch.step(0.2, Inputs::default());
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, StageEvent::SlideChanged { .. })));
    assert_eq!(orch.active_slide(), Some(1));

    // A full untouched interval advances once.
    orch.step(cfg.slider_interval, Inputs::default());
    assert_eq!(orch.active_slide(), Some(2));
}
