//! Event-to-visual state engine for the keylight piano overlay.
//!
//! Everything in here is platform-neutral: raw MIDI bytes go in, a list of
//! draw commands comes out each frame. The web front-end owns the canvas,
//! the MIDI ports and the network.

pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod keymap;
pub mod log_panel;
pub mod midi;
pub mod notes;
pub mod particles;
pub mod render;
pub mod state;

pub use color::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use keymap::*;
pub use log_panel::*;
pub use midi::*;
pub use notes::*;
pub use particles::*;
pub use render::*;
pub use state::*;
