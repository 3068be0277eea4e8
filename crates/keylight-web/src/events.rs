use crate::net;
use keylight_core::{command_for_key, EditCommand, Overlay};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, overlay: &Rc<RefCell<Overlay>>) {
    // sliders handle their own arrow keys
    if ev
        .target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some()
    {
        return;
    }
    let Some(command) = command_for_key(&ev.key(), ev.shift_key()) else {
        return;
    };
    let editing = overlay.borrow().edit_mode();
    if !editing && command != EditCommand::ToggleEditMode {
        return;
    }
    ev.prevent_default();
    let save = overlay.borrow_mut().apply_command(command);
    if save {
        net::spawn_save(overlay.clone());
    }
}

pub fn wire_global_keydown(overlay: Rc<RefCell<Overlay>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &overlay);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
