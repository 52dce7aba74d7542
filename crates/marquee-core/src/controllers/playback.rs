//! Exclusive playback: one video element is the active player across the
//! hover-preview set, the showreel and the modal. Starting any playback
//! stops the previous holder synchronously first; execution is
//! single-threaded, so a plain Option is the whole locking story.

use hashbrown::HashMap;

use crate::ids::ElementId;
use crate::manifest::{PreviewTarget, ShowreelTargets};
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};

/// Weak holder of the currently playing video element.
#[derive(Debug, Default)]
pub struct ActivePlayback {
    current: Option<ElementId>,
}

impl ActivePlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Take ownership for `next`, pausing and rewinding the previous holder
    /// before the caller starts the new playback.
    pub fn transfer(&mut self, next: ElementId, out: &mut Outputs) {
        let from = self.current;
        if let Some(prev) = from {
            if prev != next {
                out.push_op(HostOp::MediaPause { element: prev });
                out.push_op(HostOp::MediaResetTime { element: prev });
            }
        }
        self.current = Some(next);
        out.push_event(StageEvent::PlaybackTransferred { from, to: next });
    }

    /// Drop ownership if `element` still holds it.
    pub fn release(&mut self, element: ElementId) {
        if self.current == Some(element) {
            self.current = None;
        }
    }
}

/// Hover previews: play on card enter, pause and rewind on leave.
#[derive(Debug, Default)]
pub struct PreviewController {
    videos: HashMap<ElementId, ElementId>,
}

impl PreviewController {
    pub fn new(previews: &[PreviewTarget]) -> Self {
        Self {
            videos: previews.iter().map(|p| (p.card, p.video)).collect(),
        }
    }

    pub fn on_pointer_enter(
        &mut self,
        card: ElementId,
        playback: &mut ActivePlayback,
        out: &mut Outputs,
    ) {
        if let Some(&video) = self.videos.get(&card) {
            playback.transfer(video, out);
            out.push_op(HostOp::MediaPlay { element: video });
        }
    }

    pub fn on_pointer_leave(
        &mut self,
        card: ElementId,
        playback: &mut ActivePlayback,
        out: &mut Outputs,
    ) {
        if let Some(&video) = self.videos.get(&card) {
            out.push_op(HostOp::MediaPause { element: video });
            out.push_op(HostOp::MediaResetTime { element: video });
            playback.release(video);
        }
    }
}

/// Inline showreel: the play control unmutes and plays; clicking the playing
/// video pauses and re-mutes, restoring the overlay.
#[derive(Debug)]
pub struct ShowreelController {
    video: ElementId,
    play_button: ElementId,
    overlay: Option<ElementId>,
    playing: bool,
}

impl ShowreelController {
    pub fn new(targets: Option<&ShowreelTargets>) -> Option<Self> {
        let targets = targets?;
        Some(Self {
            video: targets.video,
            play_button: targets.play_button,
            overlay: targets.overlay,
            playing: false,
        })
    }

    pub fn on_click(
        &mut self,
        element: ElementId,
        playback: &mut ActivePlayback,
        out: &mut Outputs,
    ) {
        // A preview or the modal may have stolen playback since our last
        // interaction; the flag follows the actual holder.
        if self.playing && playback.current() != Some(self.video) {
            self.playing = false;
            self.set_overlay_opacity("1", out);
        }
        if element == self.play_button {
            if self.playing {
                self.pause(out);
                playback.release(self.video);
            } else {
                playback.transfer(self.video, out);
                self.playing = true;
                out.push_op(HostOp::MediaSetMuted {
                    element: self.video,
                    muted: false,
                });
                out.push_op(HostOp::MediaPlay {
                    element: self.video,
                });
                self.set_overlay_opacity("0", out);
            }
        } else if element == self.video && self.playing {
            self.pause(out);
            out.push_op(HostOp::MediaSetMuted {
                element: self.video,
                muted: true,
            });
            playback.release(self.video);
        }
    }

    fn pause(&mut self, out: &mut Outputs) {
        self.playing = false;
        out.push_op(HostOp::MediaPause {
            element: self.video,
        });
        self.set_overlay_opacity("1", out);
    }

    fn set_overlay_opacity(&self, value: &str, out: &mut Outputs) {
        if let Some(overlay) = self.overlay {
            out.push_op(HostOp::SetStyle {
                element: overlay,
                property: "opacity".into(),
                value: value.into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_pauses_previous_holder_first() {
        let mut playback = ActivePlayback::new();
        let mut out = Outputs::default();
        playback.transfer(ElementId(1), &mut out);
        out.clear();
        playback.transfer(ElementId(2), &mut out);
        let ops: Vec<_> = out.ops.iter().collect();
        assert!(matches!(
            ops[0],
            HostOp::MediaPause { element } if *element == ElementId(1)
        ));
        assert_eq!(playback.current(), Some(ElementId(2)));
    }

    #[test]
    fn showreel_restarts_after_playback_is_stolen() {
        let mut playback = ActivePlayback::new();
        let mut sr = ShowreelController::new(Some(&ShowreelTargets {
            video: ElementId(1),
            play_button: ElementId(2),
            overlay: Some(ElementId(3)),
        }))
        .unwrap();
        let mut out = Outputs::default();

        sr.on_click(ElementId(2), &mut playback, &mut out);
        assert_eq!(playback.current(), Some(ElementId(1)));

        // A hover preview takes over; the showreel video gets paused.
        playback.transfer(ElementId(9), &mut out);
        out.clear();

        // The next play click must restart the showreel, not "pause" an
        // already-paused video.
        sr.on_click(ElementId(2), &mut playback, &mut out);
        assert!(out.ops.iter().any(
            |op| matches!(op, HostOp::MediaPlay { element } if *element == ElementId(1))
        ));
        assert_eq!(playback.current(), Some(ElementId(1)));
    }

    #[test]
    fn release_only_drops_the_holder() {
        let mut playback = ActivePlayback::new();
        let mut out = Outputs::default();
        playback.transfer(ElementId(1), &mut out);
        playback.release(ElementId(9));
        assert_eq!(playback.current(), Some(ElementId(1)));
        playback.release(ElementId(1));
        assert_eq!(playback.current(), None);
    }
}
