//! Web MIDI routing: every input port feeds the same overlay.

use anyhow::anyhow;
use keylight_core::Overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn port_label(port: &web::MidiPort) -> String {
    port.name().unwrap_or_else(|| port.id())
}

/// Requests MIDI access and starts routing all current and future inputs.
/// An unsupported browser is a startup failure.
pub async fn connect(overlay: Rc<RefCell<Overlay>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let promise = window
        .navigator()
        .request_midi_access()
        .map_err(|_| anyhow!("Web MIDI is not supported in this browser"))?;
    let access: web::MidiAccess = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("MIDI access denied: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;

    let on_message = {
        let overlay = overlay.clone();
        Closure::wrap(Box::new(move |ev: web::MidiMessageEvent| {
            if let Ok(data) = ev.data() {
                overlay.borrow_mut().handle_message(&data, instant::now());
            }
        }) as Box<dyn FnMut(_)>)
    };
    let handler: js_sys::Function = on_message.as_ref().unchecked_ref::<js_sys::Function>().clone();
    on_message.forget();

    let inputs: js_sys::Map = access.inputs().unchecked_into();
    let mut attached = 0usize;
    inputs.for_each(&mut |value: JsValue, _key: JsValue| {
        if let Ok(input) = value.dyn_into::<web::MidiInput>() {
            input.set_onmidimessage(Some(&handler));
            overlay
                .borrow_mut()
                .note_line(format!("Listening to: {}", port_label(&input)));
            attached += 1;
        }
    });
    if attached == 0 {
        overlay
            .borrow_mut()
            .note_line("No MIDI inputs yet, waiting for a device");
    }

    let on_state = Closure::wrap(Box::new(move |ev: web::MidiConnectionEvent| {
        let Some(port) = ev.port() else {
            return;
        };
        if port.type_() != web::MidiPortType::Input {
            return;
        }
        let label = port_label(&port);
        let Ok(input) = port.dyn_into::<web::MidiInput>() else {
            return;
        };
        // note state is left alone on detach; held notes stay lit
        match input.state() {
            web::MidiPortDeviceState::Connected => {
                input.set_onmidimessage(Some(&handler));
                overlay
                    .borrow_mut()
                    .note_line(format!("Device connected: {}", label));
            }
            web::MidiPortDeviceState::Disconnected => {
                input.set_onmidimessage(None);
                overlay
                    .borrow_mut()
                    .note_line(format!("Device disconnected: {}", label));
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    access.set_onstatechange(Some(on_state.as_ref().unchecked_ref()));
    on_state.forget();

    Ok(())
}
