//! Page transition: intercept qualifying internal-link clicks, play the exit
//! animation, then commit navigation exactly once.
//!
//! The in-flight flag is the whole concurrency story: once a click arms the
//! transition, every further registered-link click is absorbed until
//! navigation completes (page unload) or the host cancels explicitly, so
//! rapid double-clicks can never commit twice or out of order.

use hashbrown::HashMap;

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::TransitionTargets;
use crate::ops::{HostOp, TweenProp};
use crate::outputs::{Outputs, StageEvent};
use crate::schedule::Countdown;

#[derive(Debug)]
pub struct PageTransitionController {
    overlay: ElementId,
    logo: Option<ElementId>,
    links: HashMap<ElementId, String>,
    location: String,
    in_flight: bool,
    commit: Countdown,
    pending_href: Option<String>,
}

impl PageTransitionController {
    pub fn new(targets: Option<&TransitionTargets>, location: &str) -> Option<Self> {
        let targets = targets?;
        Some(Self {
            overlay: targets.overlay,
            logo: targets.logo,
            links: targets
                .links
                .iter()
                .map(|l| (l.element, l.href.clone()))
                .collect(),
            location: location.to_string(),
            in_flight: false,
            commit: Countdown::new(),
            pending_href: None,
        })
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Routes a click on a registered link. Qualifying clicks arm the
    /// transition; non-qualifying ones (anchor hrefs, the current page) emit
    /// the navigation immediately, since the host suppressed the default for
    /// every registered link and is waiting on the engine either way.
    /// Returns true when the click armed (or was absorbed by) a transition.
    pub fn on_link_click(
        &mut self,
        element: ElementId,
        href: &str,
        cfg: &Config,
        out: &mut Outputs,
    ) -> bool {
        let registered = match self.links.get(&element) {
            Some(h) => h.as_str(),
            None => return false,
        };
        if self.in_flight {
            // Already armed: swallow the click, commit only once.
            return true;
        }
        // The registered href is authoritative over whatever the event
        // carried.
        let href = if href.is_empty() { registered } else { href };
        if href.contains('#') || self.location.ends_with(href) {
            out.push_op(HostOp::Navigate {
                href: href.to_string(),
            });
            return false;
        }
        self.arm(href.to_string(), cfg, out);
        true
    }

    fn arm(&mut self, href: String, cfg: &Config, out: &mut Outputs) {
        self.in_flight = true;
        self.pending_href = Some(href.clone());
        self.commit.arm(cfg.transition_duration);
        out.push_op(HostOp::AddClass {
            element: self.overlay,
            class: "active".into(),
        });
        out.push_op(HostOp::Tween {
            element: self.overlay,
            props: vec![TweenProp {
                property: "transform".into(),
                from: "translateY(100%)".into(),
                to: "translateY(0)".into(),
            }],
            duration: cfg.transition_duration,
            delay: 0.0,
            ease: "power4.inOut".into(),
        });
        if let Some(logo) = self.logo {
            out.push_op(HostOp::Tween {
                element: logo,
                props: vec![TweenProp {
                    property: "opacity".into(),
                    from: "0".into(),
                    to: "1".into(),
                }],
                duration: 0.3,
                delay: 0.2,
                ease: "power2.out".into(),
            });
        }
        out.push_event(StageEvent::NavigationArmed { href });
    }

    /// Cancellation path: clears the flag so a later gesture can navigate.
    pub fn cancel(&mut self, out: &mut Outputs) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        self.pending_href = None;
        self.commit.cancel();
        out.push_op(HostOp::RemoveClass {
            element: self.overlay,
            class: "active".into(),
        });
    }

    /// The exit animation's completion commits the navigation.
    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        if self.commit.tick(dt) {
            if let Some(href) = self.pending_href.take() {
                out.push_op(HostOp::Navigate { href: href.clone() });
                out.push_event(StageEvent::NavigationCommitted { href });
            }
            // in_flight stays set: the page is unloading, and only an
            // explicit cancel() re-enables navigation.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{InternalLink, TransitionTargets};

    fn ctrl() -> PageTransitionController {
        PageTransitionController::new(
            Some(&TransitionTargets {
                overlay: ElementId(1),
                logo: None,
                links: vec![InternalLink {
                    element: ElementId(2),
                    href: "work.html".into(),
                }],
            }),
            "/site/index.html",
        )
        .unwrap()
    }

    #[test]
    fn anchor_and_same_page_links_navigate_without_arming() {
        let cfg = Config::default();
        let mut t = ctrl();
        let mut out = Outputs::default();
        assert!(!t.on_link_click(ElementId(2), "work.html#top", &cfg, &mut out));
        assert!(!t.in_flight());
        // The host suppressed the default click, so the navigation must come
        // back as an op even though no transition played.
        assert!(out.ops.iter().any(
            |op| matches!(op, HostOp::Navigate { href } if href == "work.html#top")
        ));

        let mut same = PageTransitionController::new(
            Some(&TransitionTargets {
                overlay: ElementId(1),
                logo: None,
                links: vec![InternalLink {
                    element: ElementId(2),
                    href: "index.html".into(),
                }],
            }),
            "/site/index.html",
        )
        .unwrap();
        out.clear();
        assert!(!same.on_link_click(ElementId(2), "index.html", &cfg, &mut out));
        assert!(!same.in_flight());
        assert!(out.ops.iter().any(
            |op| matches!(op, HostOp::Navigate { href } if href == "index.html")
        ));
    }

    #[test]
    fn armed_transition_absorbs_every_registered_click() {
        let cfg = Config::default();
        let mut t = ctrl();
        let mut out = Outputs::default();
        assert!(t.on_link_click(ElementId(2), "work.html", &cfg, &mut out));
        out.clear();
        // Even a non-qualifying click must not race the pending commit.
        assert!(t.on_link_click(ElementId(2), "work.html#top", &cfg, &mut out));
        assert!(!out
            .ops
            .iter()
            .any(|op| matches!(op, HostOp::Navigate { .. })));
    }

    #[test]
    fn cancel_allows_rearming() {
        let cfg = Config::default();
        let mut t = ctrl();
        let mut out = Outputs::default();
        assert!(t.on_link_click(ElementId(2), "work.html", &cfg, &mut out));
        t.cancel(&mut out);
        assert!(!t.in_flight());
        out.clear();
        assert!(t.on_link_click(ElementId(2), "work.html", &cfg, &mut out));
        assert!(t.in_flight());
    }
}
