//! Category filter over a card collection, with the two-phase show/hide
//! timing that keeps layout honest: cards entering occupy layout space
//! before they fade in; cards leaving fade out fully before they give up
//! their layout slot. Re-filtering mid-animation cancels the pending phase,
//! so no card ever settles in a mixed state.

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::FilterTargets;
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};
use crate::schedule::Countdown;

#[derive(Debug, PartialEq)]
enum CardPhase {
    Visible,
    /// Fading toward opacity 0; leaves layout when the countdown fires.
    Leaving,
    Hidden,
    /// Back in layout at opacity 0; fades in when the countdown fires.
    Entering,
}

#[derive(Debug)]
struct CardSlot {
    element: ElementId,
    category: String,
    phase: CardPhase,
    timer: Countdown,
}

#[derive(Debug)]
pub struct FilterController {
    buttons: Vec<(ElementId, String)>,
    cards: Vec<CardSlot>,
    active: String,
}

impl FilterController {
    pub fn new(targets: Option<&FilterTargets>) -> Option<Self> {
        let targets = targets?;
        if targets.buttons.is_empty() || targets.cards.is_empty() {
            log::debug!("filter: no buttons or cards, skipping");
            return None;
        }
        Some(Self {
            buttons: targets
                .buttons
                .iter()
                .map(|b| (b.element, b.category.clone()))
                .collect(),
            cards: targets
                .cards
                .iter()
                .map(|c| CardSlot {
                    element: c.element,
                    category: c.category.clone(),
                    phase: CardPhase::Visible,
                    timer: Countdown::new(),
                })
                .collect(),
            active: "all".to_string(),
        })
    }

    pub fn active_category(&self) -> &str {
        &self.active
    }

    /// Visibility predicate: pure in (active category, card category).
    fn matches(active: &str, category: &str) -> bool {
        active == "all" || category == active
    }

    pub fn on_click(&mut self, element: ElementId, cfg: &Config, out: &mut Outputs) {
        let category = match self.buttons.iter().find(|(e, _)| *e == element) {
            Some((_, c)) => c.clone(),
            None => return,
        };
        self.select(&category, cfg, out);
    }

    pub fn select(&mut self, category: &str, cfg: &Config, out: &mut Outputs) {
        self.active = category.to_string();
        for &(element, ref cat) in &self.buttons {
            out.push_op(if cat == category {
                HostOp::AddClass {
                    element,
                    class: "active".into(),
                }
            } else {
                HostOp::RemoveClass {
                    element,
                    class: "active".into(),
                }
            });
        }

        for card in &mut self.cards {
            let want_visible = Self::matches(category, &card.category);
            match (&card.phase, want_visible) {
                (CardPhase::Visible, true) | (CardPhase::Entering, true) => {}
                (CardPhase::Hidden, true) | (CardPhase::Leaving, true) => {
                    // Eligible for layout immediately; the fade-in waits for
                    // the next-tick delay so the browser lays the card out
                    // at opacity 0 first.
                    card.phase = CardPhase::Entering;
                    card.timer.arm(cfg.filter_enter_delay);
                    out.push_op(HostOp::ClearStyle {
                        element: card.element,
                        property: "display".into(),
                    });
                }
                (CardPhase::Visible, false) | (CardPhase::Entering, false) => {
                    card.phase = CardPhase::Leaving;
                    card.timer.arm(cfg.filter_fade);
                    out.push_op(HostOp::SetStyle {
                        element: card.element,
                        property: "opacity".into(),
                        value: "0".into(),
                    });
                    out.push_op(HostOp::SetStyle {
                        element: card.element,
                        property: "transform".into(),
                        value: "translateY(20px)".into(),
                    });
                }
                (CardPhase::Hidden, false) | (CardPhase::Leaving, false) => {}
            }
        }
        out.push_event(StageEvent::FilterApplied {
            category: category.to_string(),
        });
    }

    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        for card in &mut self.cards {
            if !card.timer.tick(dt) {
                continue;
            }
            match card.phase {
                CardPhase::Leaving => {
                    // Fade finished; only now leave layout.
                    card.phase = CardPhase::Hidden;
                    out.push_op(HostOp::SetStyle {
                        element: card.element,
                        property: "display".into(),
                        value: "none".into(),
                    });
                }
                CardPhase::Entering => {
                    card.phase = CardPhase::Visible;
                    out.push_op(HostOp::SetStyle {
                        element: card.element,
                        property: "opacity".into(),
                        value: "1".into(),
                    });
                    out.push_op(HostOp::SetStyle {
                        element: card.element,
                        property: "transform".into(),
                        value: "translateY(0)".into(),
                    });
                }
                _ => {}
            }
        }
    }

    /// True once no card has an animation pending.
    pub fn settled(&self) -> bool {
        self.cards
            .iter()
            .all(|c| matches!(c.phase, CardPhase::Visible | CardPhase::Hidden))
    }

    #[cfg(test)]
    pub fn visible_cards(&self) -> Vec<ElementId> {
        self.cards
            .iter()
            .filter(|c| matches!(c.phase, CardPhase::Visible | CardPhase::Entering))
            .map(|c| c.element)
            .collect()
    }
}
