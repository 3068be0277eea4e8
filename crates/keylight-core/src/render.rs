//! Per-frame draw list.
//!
//! `build_frame` only reads state; the front-end replays the commands onto
//! whatever 2D surface it has. Keys are filled with a vertical gradient from
//! the resolved color at the top edge to transparent at the bottom.

use crate::color::Rgb;
use crate::config::{Config, KeyRecord};
use crate::editor::Editor;
use crate::keymap::KeyMap;
use crate::notes::NoteStates;
use crate::particles::Particle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub offset_y: f32,
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLayer {
    Sustained,
    Held,
    /// Editor preview of a selected key that is neither held nor sustained.
    Selected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyQuad {
    pub note: u8,
    pub layer: KeyLayer,
    pub rect: Rect,
    pub color: Rgb,
    pub glow: Option<Glow>,
    pub outline: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: u32, height: u32 },
    Particle { x: f32, y: f32, radius: f32, color: Rgb, alpha: f32 },
    Key(KeyQuad),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn keys(&self) -> impl Iterator<Item = &KeyQuad> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Key(k) => Some(k),
            _ => None,
        })
    }

    pub fn key(&self, note: u8) -> Option<&KeyQuad> {
        self.keys().find(|k| k.note == note)
    }

    pub fn particle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Particle { .. }))
            .count()
    }
}

/// Geometry of a key in its up or pressed state.
pub fn key_rect(config: &Config, key: &KeyRecord, pressed: bool) -> Rect {
    let (left, width) = key.span(pressed);
    let offset = key.vertical_offset();
    Rect {
        left,
        top: config.key_bounds.top + offset,
        right: left + width,
        bottom: config.key_bounds.bottom + offset,
    }
}

/// Per-key override, else the global active color.
pub fn key_color(config: &Config, key: &KeyRecord) -> Rgb {
    key.color.unwrap_or(config.colors.active)
}

pub fn build_frame(
    config: &Config,
    keys: &KeyMap,
    notes: &NoteStates,
    particles: &[Particle],
    editor: Option<&Editor>,
) -> Frame {
    let mut commands = Vec::with_capacity(1 + particles.len() + keys.len());
    commands.push(DrawCommand::Clear {
        width: config.canvas.width,
        height: config.canvas.height,
    });

    for p in particles {
        if p.alpha <= 0.0 || !p.position.is_finite() {
            continue;
        }
        commands.push(DrawCommand::Particle {
            x: p.position.x,
            y: p.position.y,
            radius: p.size,
            color: p.color,
            alpha: p.alpha,
        });
    }

    let selected = editor.and_then(Editor::selected_note);
    let sustained_color = config.colors.active.lighten(config.colors.sustained_lighten);
    let mut push_key = |note: u8, layer: KeyLayer| {
        let Some(key) = keys.record(&config.keys, note) else {
            return;
        };
        if key.is_hidden() {
            return;
        }
        let rect = key_rect(config, key, layer == KeyLayer::Held);
        if !rect.is_finite() {
            log::debug!("[render] skipping note {} with non-finite geometry", note);
            return;
        }
        let color = match layer {
            KeyLayer::Sustained => sustained_color,
            KeyLayer::Held | KeyLayer::Selected => key_color(config, key),
        };
        let glow = config.effects.glow.enabled.then_some(Glow {
            blur: config.effects.glow.blur,
            offset_y: config.effects.glow.offset_y,
            color,
        });
        commands.push(DrawCommand::Key(KeyQuad {
            note,
            layer,
            rect,
            color,
            glow,
            outline: selected == Some(note),
        }));
    };

    for note in notes.sustained() {
        push_key(note, KeyLayer::Sustained);
    }
    for note in notes.held() {
        push_key(note, KeyLayer::Held);
    }
    if let Some(note) = selected {
        if !notes.is_audible(note) {
            push_key(note, KeyLayer::Selected);
        }
    }

    Frame { commands }
}
