//! Application state shared by the MIDI callback and the frame loop.

use crate::config::{note_name, Config};
use crate::editor::{Direction, EditCommand, EditPhase, EditProperty, Editor, SliderBinding};
use crate::error::Result;
use crate::keymap::KeyMap;
use crate::log_panel::DebugLog;
use crate::midi::{decode_message, PerformanceEvent};
use crate::notes::NoteStates;
use crate::particles::ParticleEngine;
use crate::render::{build_frame, key_color, Frame};

pub struct Overlay {
    config: Config,
    keys: KeyMap,
    notes: NoteStates,
    particles: ParticleEngine,
    editor: Option<Editor>,
    log: DebugLog,
}

impl Overlay {
    pub fn new(config: Config, seed: u64) -> Self {
        let keys = KeyMap::build(&config.keys);
        let editor = config.edit_mode.then(Editor::new);
        log::info!(
            "[config] {} keys, canvas {}x{}, edit mode {}",
            keys.len(),
            config.canvas.width,
            config.canvas.height,
            if editor.is_some() { "on" } else { "off" }
        );
        Self {
            config,
            keys,
            notes: NoteStates::new(),
            particles: ParticleEngine::new(seed),
            editor,
            log: DebugLog::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    pub fn notes(&self) -> &NoteStates {
        &self.notes
    }

    pub fn particles(&self) -> &ParticleEngine {
        &self.particles
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.log
    }

    #[inline]
    pub fn edit_mode(&self) -> bool {
        self.editor.is_some()
    }

    /// Adds a line to the debug panel and mirrors it to the log facade.
    pub fn note_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.log.push(line);
    }

    /// Swaps in a freshly loaded config. Note state survives; a selection
    /// whose key disappeared is dropped. The runtime mode only follows the
    /// file when the file's `editMode` itself changed.
    pub fn reload_config(&mut self, config: Config) {
        self.keys = KeyMap::build(&config.keys);
        let mode_changed = config.edit_mode != self.config.edit_mode;
        let edit_mode = config.edit_mode;
        self.config = config;
        if let Some(editor) = &mut self.editor {
            if let Some(note) = editor.selected_note() {
                if !self.keys.contains(note) {
                    editor.deselect(&mut self.notes);
                }
            }
        }
        if mode_changed && edit_mode != self.edit_mode() {
            self.set_edit_mode(edit_mode);
        }
    }

    /// Session toggle. `config.edit_mode` keeps its loaded value, so a save
    /// never changes the mode the overlay starts in.
    pub fn set_edit_mode(&mut self, on: bool) {
        if let Some(mut editor) = self.editor.take() {
            editor.deselect(&mut self.notes);
        }
        if on {
            self.editor = Some(Editor::new());
        }
        self.note_line(format!("Edit mode {}", if on { "ON" } else { "OFF" }));
    }

    /// Raw device bytes in; malformed or unrelated messages are dropped.
    pub fn handle_message(&mut self, data: &[u8], now_ms: f64) {
        if let Some(event) = decode_message(data) {
            self.handle_event(event, now_ms);
        }
    }

    pub fn handle_event(&mut self, event: PerformanceEvent, now_ms: f64) {
        if self.config.debug {
            self.log.push(describe(&event));
        }
        match event {
            PerformanceEvent::Sustain { down, .. } => self.notes.set_sustain(down),
            PerformanceEvent::NoteOn { note, .. } => match self.editor.as_mut() {
                Some(editor) => {
                    if editor.note_on(note, &self.keys, &mut self.notes) {
                        self.note_line(format!(
                            "[editor] selected {} ({}), pressed",
                            note_name(note),
                            note
                        ));
                    }
                }
                None => {
                    self.notes.note_on(note);
                    self.spawn_particles(note, now_ms);
                }
            },
            PerformanceEvent::NoteOff { note, .. } => match self.editor.as_mut() {
                Some(editor) => {
                    editor.note_off(note, &mut self.notes);
                }
                None => self.notes.note_off(note),
            },
        }
    }

    fn spawn_particles(&mut self, note: u8, now_ms: f64) {
        let Some(key) = self.keys.record(&self.config.keys, note) else {
            return;
        };
        let color = key_color(&self.config, key);
        self.particles.spawn(
            key,
            &self.config.key_bounds,
            color,
            &self.config.effects.particles,
            now_ms,
        );
    }

    /// Ages particles, then builds this frame's draw list.
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        self.particles.tick(now_ms);
        build_frame(
            &self.config,
            &self.keys,
            &self.notes,
            self.particles.particles(),
            self.editor.as_ref(),
        )
    }

    pub fn slider_bindings(&self) -> Option<[SliderBinding; 3]> {
        self.editor.as_ref()?.bindings(&self.config, &self.keys)
    }

    pub fn edit_input(&mut self, property: EditProperty, value: f32) -> Option<f32> {
        let editor = self.editor.as_mut()?;
        editor.update_from_input(property, value, &mut self.config, &self.keys)
    }

    /// Applies a keyboard command. `Save` is left to the caller since it
    /// needs the network; returns true when a save was requested.
    pub fn apply_command(&mut self, command: EditCommand) -> bool {
        match command {
            EditCommand::ToggleEditMode => {
                let on = !self.edit_mode();
                self.set_edit_mode(on);
                return false;
            }
            EditCommand::Save => return self.edit_mode(),
            _ => {}
        }
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        match command {
            EditCommand::Nudge(delta) => {
                editor.nudge(delta, &mut self.config, &self.keys);
            }
            EditCommand::Navigate(direction) => {
                if let Some(note) = editor.navigate(direction, &self.keys, &mut self.notes) {
                    let arrow = match direction {
                        Direction::Next => "next",
                        Direction::Previous => "previous",
                    };
                    self.note_line(format!(
                        "[editor] {} key: {} ({})",
                        arrow,
                        note_name(note),
                        note
                    ));
                }
            }
            EditCommand::SelectProperty(property) => editor.select_property(property),
            EditCommand::Deselect => editor.deselect(&mut self.notes),
            EditCommand::Save | EditCommand::ToggleEditMode => {}
        }
        false
    }

    /// Document to hand to the save endpoint.
    pub fn persisted_json(&self) -> Result<String> {
        self.config.to_persisted_json()
    }

    /// Records how a save attempt ended; failures leave the editor usable.
    pub fn record_save_result(&mut self, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.note_line("Config saved"),
            Err(e) => {
                log::warn!("[save] {}", e);
                self.log.push(format!("[save] {}", e));
            }
        }
    }

    pub fn edit_phase(&self) -> Option<EditPhase> {
        self.editor.as_ref()?.phase()
    }
}

fn describe(event: &PerformanceEvent) -> String {
    match *event {
        PerformanceEvent::NoteOn {
            channel,
            note,
            velocity,
        } => format!(
            "Note ON: {} ({}) vel={} ch={}",
            note_name(note),
            note,
            velocity,
            channel
        ),
        PerformanceEvent::NoteOff { channel, note } => {
            format!("Note OFF: {} ({}) ch={}", note_name(note), note, channel)
        }
        PerformanceEvent::Sustain { channel, down } => format!(
            "Sustain {} ch={}",
            if down { "DOWN" } else { "UP" },
            channel
        ),
    }
}
