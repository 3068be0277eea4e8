//! Editor sliders and the debug log panel.

use crate::dom;
use keylight_core::{idle_bindings, note_name, EditPhase, EditProperty, Overlay, SliderBinding};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn slider_id(property: EditProperty) -> &'static str {
    match property {
        EditProperty::Left => "slider-left",
        EditProperty::Width => "slider-width",
        EditProperty::Offset => "slider-offset",
    }
}

fn label_id(property: EditProperty) -> &'static str {
    match property {
        EditProperty::Left => "slider-left-label",
        EditProperty::Width => "slider-width-label",
        EditProperty::Offset => "slider-offset-label",
    }
}

/// Routes slider `input` events into the editor.
pub fn wire_sliders(document: &web::Document, overlay: Rc<RefCell<Overlay>>) {
    for property in EditProperty::ALL {
        let Some(input) = dom::input_by_id(document, slider_id(property)) else {
            log::warn!("[editor] missing #{}", slider_id(property));
            continue;
        };
        let overlay = overlay.clone();
        let source = input.clone();
        let closure = Closure::wrap(Box::new(move || {
            let value = source.value_as_number();
            if value.is_finite() {
                overlay.borrow_mut().edit_input(property, value as f32);
            }
        }) as Box<dyn FnMut()>);
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Mirrors overlay state onto the page, touching the DOM only on change.
#[derive(Default)]
pub struct PanelSync {
    edit_mode: Option<bool>,
    selection: Option<(u8, EditPhase)>,
    bindings: Option<Option<[SliderBinding; 3]>>,
    log_revision: Option<u64>,
}

impl PanelSync {
    pub fn sync(&mut self, document: &web::Document, overlay: &Overlay) {
        let edit_mode = overlay.edit_mode();
        if self.edit_mode != Some(edit_mode) {
            dom::set_visible(document, "edit-panel", edit_mode);
            self.edit_mode = Some(edit_mode);
        }

        let selection = overlay
            .editor()
            .and_then(|e| e.selection())
            .map(|s| (s.note, s.phase));
        if selection != self.selection {
            let text = match selection {
                Some((note, EditPhase::Up)) => format!("{} ({}) up", note_name(note), note),
                Some((note, EditPhase::Pressed)) => {
                    format!("{} ({}) pressed", note_name(note), note)
                }
                None => "No key selected".to_string(),
            };
            dom::set_text(document, "selected-key", &text);
            self.selection = selection;
        }

        let bindings = overlay.slider_bindings();
        if self.bindings.as_ref() != Some(&bindings) {
            let shown = bindings.clone().unwrap_or_else(idle_bindings);
            for b in &shown {
                apply_binding(document, b);
            }
            self.bindings = Some(bindings);
        }

        let log = overlay.debug_log();
        if overlay.config().debug && self.log_revision != Some(log.revision()) {
            let text = log.lines().collect::<Vec<_>>().join("\n");
            dom::set_text(document, "debug-log", &text);
            self.log_revision = Some(log.revision());
        }
    }
}

fn apply_binding(document: &web::Document, b: &SliderBinding) {
    if let Some(input) = dom::input_by_id(document, slider_id(b.property)) {
        input.set_min(&b.min.to_string());
        input.set_max(&b.max.to_string());
        input.set_value(&b.value.to_string());
        input.set_disabled(!b.enabled);
    }
    let label = if b.enabled {
        format!("{}: {}", b.label, b.value)
    } else {
        format!("{}: n/a", b.label)
    };
    dom::set_text(document, label_id(b.property), &label);
}
