#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use keylight_core::Overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;
mod midi;
mod net;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("keylight-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            dom::set_status(&format!("Error: {:#}", e));
        }
    });
    Ok(())
}

fn canvas_context(
    document: &web::Document,
    width: u32,
    height: u32,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("overlay-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #overlay-canvas"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = net::load_config(net::CONFIG_URL)
        .await
        .context("failed to load config")?;
    let ctx = canvas_context(&document, config.canvas.width, config.canvas.height)?;

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let overlay = Rc::new(RefCell::new(Overlay::new(config, seed)));

    events::wire_global_keydown(overlay.clone());
    ui::wire_sliders(&document, overlay.clone());
    {
        let overlay = overlay.clone();
        dom::add_click_listener(&document, "save-config", move || {
            net::spawn_save(overlay.clone());
        });
    }

    midi::connect(overlay.clone())
        .await
        .context("MIDI unavailable")?;
    dom::set_status("MIDI ready");

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        overlay,
        ctx,
        document,
        panels: ui::PanelSync::default(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
