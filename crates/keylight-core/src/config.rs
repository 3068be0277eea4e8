//! Overlay configuration document.
//!
//! The JSON shape is shared with the static page and the save endpoint, so
//! field names stay camelCase on the wire. Optional per-key fields are real
//! `Option`s in memory; the legacy "0 means inherit" rule only applies when a
//! document is read or written (see [`Config::normalize`]).

use crate::color::Rgb;
use crate::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};

/// Lowest and highest note on an 88-key piano (A0..C8).
pub const LOWEST_NOTE: u8 = 21;
pub const HIGHEST_NOTE: u8 = 108;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub canvas: CanvasSize,
    pub colors: Colors,
    pub key_bounds: KeyBounds,
    #[serde(default)]
    pub effects: Effects,
    pub keys: Vec<KeyRecord>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub edit_mode: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors {
    pub active: Rgb,
    /// Fraction in \[0, 1\] to blend sustained notes toward white.
    pub sustained_lighten: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyBounds {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    #[serde(default)]
    pub glow: GlowParams,
    #[serde(default)]
    pub particles: ParticleParams,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowParams {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "GlowParams::default_blur")]
    pub blur: f32,
    #[serde(default)]
    pub offset_y: f32,
}

impl GlowParams {
    fn default_blur() -> f32 {
        20.0
    }
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            enabled: false,
            blur: Self::default_blur(),
            offset_y: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleParams {
    pub enabled: bool,
    /// Multiplier on the base upward velocity (pixels per tick).
    pub speed: f32,
    /// Multiplier on the base particle radius.
    pub size: f32,
    /// Milliseconds.
    pub lifetime: f64,
    /// Upper bound of particles spawned per note-on.
    pub count: u32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 1.0,
            size: 1.0,
            lifetime: 1000.0,
            count: 3,
        }
    }
}

/// On-screen geometry for one playable note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    pub note: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub left: f32,
    pub width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressed_left_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressed_width_offset: Option<f32>,
}

impl KeyRecord {
    pub fn new(note: u8, left: f32, width: f32) -> Self {
        Self {
            note,
            name: None,
            left,
            width,
            offset: None,
            color: None,
            hidden: None,
            pressed_left_offset: None,
            pressed_width_offset: None,
        }
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| note_name(self.note))
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    #[inline]
    pub fn vertical_offset(&self) -> f32 {
        self.offset.unwrap_or(0.0)
    }

    /// Horizontal span `(left, width)`, with the pressed deltas applied when
    /// `pressed` is set.
    pub fn span(&self, pressed: bool) -> (f32, f32) {
        if pressed {
            (
                self.left + self.pressed_left_offset.unwrap_or(0.0),
                self.width + self.pressed_width_offset.unwrap_or(0.0),
            )
        } else {
            (self.left, self.width)
        }
    }
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scientific pitch name, middle C (60) is `C4`.
pub fn note_name(note: u8) -> String {
    let octave = note as i32 / 12 - 1;
    format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave)
}

fn zero_to_absent(v: &mut Option<f32>) {
    if *v == Some(0.0) {
        *v = None;
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        let mut cfg: Config = serde_json::from_str(text)?;
        cfg.validate()?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Full document as written back to the save endpoint.
    pub fn to_persisted_json(&self) -> Result<String> {
        let mut out = self.clone();
        out.normalize();
        Ok(serde_json::to_string_pretty(&out)?)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; 128];
        for key in &self.keys {
            if !(LOWEST_NOTE..=HIGHEST_NOTE).contains(&key.note) {
                return Err(OverlayError::NoteOutOfRange(key.note));
            }
            if std::mem::replace(&mut seen[key.note as usize], true) {
                return Err(OverlayError::DuplicateNote(key.note));
            }
        }
        Ok(())
    }

    /// Applies the storage convention: a zero offset and `hidden: false` are
    /// the same as leaving the field out.
    pub fn normalize(&mut self) {
        for key in &mut self.keys {
            zero_to_absent(&mut key.offset);
            zero_to_absent(&mut key.pressed_left_offset);
            zero_to_absent(&mut key.pressed_width_offset);
            if key.hidden == Some(false) {
                key.hidden = None;
            }
        }
    }
}
