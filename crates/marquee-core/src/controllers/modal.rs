//! Video modal: a three-state machine owning the modal player.
//!
//! The video source is attached exactly on Closed -> Open and cleared on
//! Open -> Closed (clearing stops buffering). Opening always starts muted
//! to satisfy autoplay policies; the mute toggle moves between the two open
//! states and keeps the visible label consistent with the flag.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::ElementId;
use crate::manifest::ModalTargets;
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalState {
    Closed,
    OpenMuted,
    OpenSound,
}

#[derive(Debug)]
pub struct ModalController {
    root: ElementId,
    overlay: ElementId,
    close: Option<ElementId>,
    player: ElementId,
    mute_button: Option<ElementId>,
    mute_label: Option<ElementId>,
    triggers: HashMap<ElementId, String>,
    state: ModalState,
}

impl ModalController {
    pub fn new(targets: Option<&ModalTargets>) -> Option<Self> {
        let targets = targets?;
        Some(Self {
            root: targets.root,
            overlay: targets.overlay,
            close: targets.close,
            player: targets.player,
            mute_button: targets.mute_button,
            mute_label: targets.mute_label,
            triggers: targets
                .triggers
                .iter()
                .map(|t| (t.element, t.src.clone()))
                .collect(),
            state: ModalState::Closed,
        })
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn player(&self) -> ElementId {
        self.player
    }

    /// Click routing: triggers open, close/overlay close, mute toggles.
    /// Returns true when the click belonged to the modal.
    pub fn on_click(
        &mut self,
        element: ElementId,
        playback: &mut super::playback::ActivePlayback,
        out: &mut Outputs,
    ) -> bool {
        if let Some(src) = self.triggers.get(&element).cloned() {
            self.open(&src, playback, out);
            return true;
        }
        if Some(element) == self.close || element == self.overlay {
            if self.state != ModalState::Closed {
                self.close(playback, out);
            }
            return true;
        }
        if Some(element) == self.mute_button {
            self.toggle_mute(out);
            return true;
        }
        false
    }

    /// Escape closes an open modal and is a strict no-op while closed.
    pub fn on_escape(
        &mut self,
        playback: &mut super::playback::ActivePlayback,
        out: &mut Outputs,
    ) {
        if self.state != ModalState::Closed {
            self.close(playback, out);
        }
    }

    /// Autoplay rejections are swallowed; the UI simply looks paused.
    pub fn on_playback_rejected(&self, element: ElementId) {
        if element == self.player {
            log::debug!("modal: autoplay rejected, leaving player paused");
        }
    }

    fn open(
        &mut self,
        src: &str,
        playback: &mut super::playback::ActivePlayback,
        out: &mut Outputs,
    ) {
        playback.transfer(self.player, out);
        out.push_op(HostOp::MediaSetSource {
            element: self.player,
            src: src.to_string(),
        });
        out.push_op(HostOp::MediaSetMuted {
            element: self.player,
            muted: true,
        });
        out.push_op(HostOp::AddClass {
            element: self.root,
            class: "active".into(),
        });
        out.push_op(HostOp::ScrollLock(true));
        out.push_op(HostOp::MediaPlay {
            element: self.player,
        });
        // Reset the toggle display to match the forced-muted start.
        if let Some(btn) = self.mute_button {
            out.push_op(HostOp::RemoveClass {
                element: btn,
                class: "sound-on".into(),
            });
        }
        if let Some(label) = self.mute_label {
            out.push_op(HostOp::SetText {
                element: label,
                text: "Sound Off".into(),
            });
        }
        self.state = ModalState::OpenMuted;
        out.push_event(StageEvent::ModalOpened {
            src: src.to_string(),
        });
    }

    fn close(&mut self, playback: &mut super::playback::ActivePlayback, out: &mut Outputs) {
        out.push_op(HostOp::RemoveClass {
            element: self.root,
            class: "active".into(),
        });
        out.push_op(HostOp::ScrollLock(false));
        out.push_op(HostOp::MediaPause {
            element: self.player,
        });
        out.push_op(HostOp::MediaClearSource {
            element: self.player,
        });
        playback.release(self.player);
        self.state = ModalState::Closed;
        out.push_event(StageEvent::ModalClosed);
    }

    fn toggle_mute(&mut self, out: &mut Outputs) {
        let muted = match self.state {
            ModalState::OpenMuted => false,
            ModalState::OpenSound => true,
            ModalState::Closed => return,
        };
        self.state = if muted {
            ModalState::OpenMuted
        } else {
            ModalState::OpenSound
        };
        out.push_op(HostOp::MediaSetMuted {
            element: self.player,
            muted,
        });
        if let Some(btn) = self.mute_button {
            let op = if muted {
                HostOp::RemoveClass {
                    element: btn,
                    class: "sound-on".into(),
                }
            } else {
                HostOp::AddClass {
                    element: btn,
                    class: "sound-on".into(),
                }
            };
            out.push_op(op);
        }
        if let Some(label) = self.mute_label {
            out.push_op(HostOp::SetText {
                element: label,
                text: if muted { "Sound Off" } else { "Sound On" }.into(),
            });
        }
        out.push_event(StageEvent::MuteToggled { muted });
    }
}
