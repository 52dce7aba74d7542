//! One controller per UI state slice. Each is independently constructible
//! from its manifest section and becomes a no-op when the section is absent.

pub mod accordion;
pub mod cursor;
pub mod filter;
pub mod form;
pub mod loader;
pub mod modal;
pub mod nav;
pub mod particles;
pub mod playback;
pub mod reveal;
pub mod scene;
pub mod slider;
pub mod transition;
