//! Position editor.
//!
//! While edit mode is on, note events stop being a performance and become a
//! selection protocol: striking a key selects it and shows its pressed
//! geometry, releasing it shows the base geometry. Three sliders (and the
//! arrow keys) tune whichever geometry is currently shown.

use crate::config::{Config, KeyRecord};
use crate::keymap::KeyMap;
use crate::notes::NoteStates;

pub const WIDTH_RANGE: (f32, f32) = (0.0, 100.0);
pub const OFFSET_RANGE: (f32, f32) = (-25.0, 25.0);
pub const PRESSED_LEFT_RANGE: (f32, f32) = (-50.0, 50.0);
pub const PRESSED_WIDTH_RANGE: (f32, f32) = (-25.0, 25.0);

pub const NUDGE_STEP: i32 = 1;
pub const NUDGE_STEP_COARSE: i32 = 10;

/// Which slider an input targets. The field behind it depends on the phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditProperty {
    Left,
    Width,
    Offset,
}

impl EditProperty {
    pub const ALL: [EditProperty; 3] = [Self::Left, Self::Width, Self::Offset];
}

/// Which geometry of the selected key is bound to the sliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
    Up,
    Pressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub note: u8,
    pub phase: EditPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Data contract for one slider widget.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderBinding {
    pub property: EditProperty,
    pub label: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub enabled: bool,
}

/// Slider state shown when nothing is selected: base labels, all disabled.
pub fn idle_bindings() -> [SliderBinding; 3] {
    EditProperty::ALL.map(|property| {
        let (label, (min, max)) = match property {
            EditProperty::Left => ("Left", (0.0, 0.0)),
            EditProperty::Width => ("Width", WIDTH_RANGE),
            EditProperty::Offset => ("Offset", OFFSET_RANGE),
        };
        SliderBinding {
            property,
            label,
            value: 0.0,
            min,
            max,
            enabled: false,
        }
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditCommand {
    Nudge(i32),
    Navigate(Direction),
    SelectProperty(EditProperty),
    Deselect,
    Save,
    ToggleEditMode,
}

/// Keyboard shortcuts of the editor page.
pub fn command_for_key(key: &str, shift: bool) -> Option<EditCommand> {
    let step = if shift { NUDGE_STEP_COARSE } else { NUDGE_STEP };
    match key {
        "ArrowLeft" => Some(EditCommand::Nudge(-step)),
        "ArrowRight" => Some(EditCommand::Nudge(step)),
        "ArrowUp" => Some(EditCommand::Navigate(Direction::Previous)),
        "ArrowDown" => Some(EditCommand::Navigate(Direction::Next)),
        "1" => Some(EditCommand::SelectProperty(EditProperty::Left)),
        "2" => Some(EditCommand::SelectProperty(EditProperty::Width)),
        "3" => Some(EditCommand::SelectProperty(EditProperty::Offset)),
        "s" | "S" => Some(EditCommand::Save),
        "e" | "E" => Some(EditCommand::ToggleEditMode),
        "Escape" => Some(EditCommand::Deselect),
        _ => None,
    }
}

#[derive(Clone, Debug, Default)]
pub struct Editor {
    selection: Option<Selection>,
    property: Option<EditProperty>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    #[inline]
    pub fn selected_note(&self) -> Option<u8> {
        self.selection.map(|s| s.note)
    }

    #[inline]
    pub fn phase(&self) -> Option<EditPhase> {
        self.selection.map(|s| s.phase)
    }

    #[inline]
    pub fn property(&self) -> Option<EditProperty> {
        self.property
    }

    pub fn select_property(&mut self, property: EditProperty) {
        self.property = Some(property);
    }

    /// A strike selects the key (or re-selects it) in its pressed phase.
    /// Returns false for notes without a configured key.
    pub fn note_on(&mut self, note: u8, keys: &KeyMap, notes: &mut NoteStates) -> bool {
        if !keys.contains(note) {
            return false;
        }
        if let Some(prev) = self.selection {
            if prev.note != note {
                notes.clear_note(prev.note);
            }
        }
        self.selection = Some(Selection {
            note,
            phase: EditPhase::Pressed,
        });
        notes.note_on(note);
        true
    }

    /// Releasing the selected key flips it back to its up phase. Edit mode
    /// ignores the pedal, so released notes never linger.
    pub fn note_off(&mut self, note: u8, notes: &mut NoteStates) -> bool {
        notes.clear_note(note);
        match &mut self.selection {
            Some(sel) if sel.note == note && sel.phase == EditPhase::Pressed => {
                sel.phase = EditPhase::Up;
                true
            }
            _ => false,
        }
    }

    /// Moves to the neighbouring configured note. Stops at either end; with
    /// no selection, lands on the first or last key. Always resets to the up
    /// phase, even if the new key happens to be physically down.
    pub fn navigate(
        &mut self,
        direction: Direction,
        keys: &KeyMap,
        notes: &mut NoteStates,
    ) -> Option<u8> {
        let ordered = keys.notes();
        let target = match self.selection {
            None => match direction {
                Direction::Next => ordered.first().copied(),
                Direction::Previous => ordered.last().copied(),
            },
            Some(sel) => {
                let at = ordered.binary_search(&sel.note);
                let idx = match (at, direction) {
                    (Ok(i), Direction::Next) => i + 1,
                    (Ok(i), Direction::Previous) => i.checked_sub(1).unwrap_or(i),
                    // selected key vanished from config: nearest neighbour
                    (Err(i), Direction::Next) => i,
                    (Err(i), Direction::Previous) => i.saturating_sub(1),
                };
                ordered.get(idx).or(ordered.last()).copied()
            }
        }?;
        if let Some(prev) = self.selection {
            if prev.note != target {
                notes.clear_note(prev.note);
            }
        }
        self.selection = Some(Selection {
            note: target,
            phase: EditPhase::Up,
        });
        Some(target)
    }

    pub fn deselect(&mut self, notes: &mut NoteStates) {
        if let Some(sel) = self.selection.take() {
            notes.clear_note(sel.note);
        }
        self.property = None;
    }

    /// Slider state for the current selection, or `None` when idle.
    pub fn bindings(&self, config: &Config, keys: &KeyMap) -> Option<[SliderBinding; 3]> {
        let sel = self.selection?;
        let key = keys.record(&config.keys, sel.note)?;
        Some(EditProperty::ALL.map(|p| binding(p, sel.phase, key, config.canvas.width as f32)))
    }

    /// Writes a slider value into the field bound for the current phase,
    /// clamped to that slider's range. Returns the stored value, or `None`
    /// when nothing is selected or the slider is disabled.
    pub fn update_from_input(
        &mut self,
        property: EditProperty,
        value: f32,
        config: &mut Config,
        keys: &KeyMap,
    ) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let sel = self.selection?;
        let canvas_width = config.canvas.width as f32;
        let key = keys.record_mut(&mut config.keys, sel.note)?;
        let b = binding(property, sel.phase, key, canvas_width);
        if !b.enabled {
            return None;
        }
        let v = value.clamp(b.min, b.max);
        match (sel.phase, property) {
            (EditPhase::Up, EditProperty::Left) => key.left = v,
            (EditPhase::Up, EditProperty::Width) => key.width = v,
            (EditPhase::Up, EditProperty::Offset) => key.offset = Some(v),
            (EditPhase::Pressed, EditProperty::Left) => key.pressed_left_offset = Some(v),
            (EditPhase::Pressed, EditProperty::Width) => key.pressed_width_offset = Some(v),
            (EditPhase::Pressed, EditProperty::Offset) => return None,
        }
        Some(v)
    }

    /// Keyboard path into [`Editor::update_from_input`] for the selected
    /// property.
    pub fn nudge(&mut self, delta: i32, config: &mut Config, keys: &KeyMap) -> Option<f32> {
        let property = self.property?;
        let current = self
            .bindings(config, keys)?
            .into_iter()
            .find(|b| b.property == property)?;
        if !current.enabled {
            return None;
        }
        self.update_from_input(property, current.value + delta as f32, config, keys)
    }
}

fn binding(
    property: EditProperty,
    phase: EditPhase,
    key: &KeyRecord,
    canvas_width: f32,
) -> SliderBinding {
    let (label, value, (min, max), enabled) = match (phase, property) {
        (EditPhase::Up, EditProperty::Left) => ("Left", key.left, (0.0, canvas_width), true),
        (EditPhase::Up, EditProperty::Width) => ("Width", key.width, WIDTH_RANGE, true),
        (EditPhase::Up, EditProperty::Offset) => {
            ("Offset", key.vertical_offset(), OFFSET_RANGE, true)
        }
        (EditPhase::Pressed, EditProperty::Left) => (
            "Pressed left offset",
            key.pressed_left_offset.unwrap_or(0.0),
            PRESSED_LEFT_RANGE,
            true,
        ),
        (EditPhase::Pressed, EditProperty::Width) => (
            "Pressed width offset",
            key.pressed_width_offset.unwrap_or(0.0),
            PRESSED_WIDTH_RANGE,
            true,
        ),
        (EditPhase::Pressed, EditProperty::Offset) => ("Offset", 0.0, OFFSET_RANGE, false),
    };
    SliderBinding {
        property,
        label,
        value,
        min,
        max,
        enabled,
    }
}
