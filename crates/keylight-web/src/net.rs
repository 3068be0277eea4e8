//! Config fetch/save against the static page's server.

use anyhow::{anyhow, bail};
use keylight_core::{Config, Overlay, OverlayError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const CONFIG_URL: &str = "config.json";
pub const SAVE_URL: &str = "/save-config";

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

async fn fetch(window: &web::Window, request: &web::Request) -> anyhow::Result<web::Response> {
    let resp = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_err)?;
    resp.dyn_into::<web::Response>().map_err(js_err)
}

pub async fn load_config(url: &str) -> anyhow::Result<Config> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    // bypass the browser cache so edits saved a moment ago show up
    let busted = format!("{}?t={}", url, js_sys::Date::now() as u64);
    let request = web::Request::new_with_str(&busted).map_err(js_err)?;
    let resp = fetch(&window, &request).await?;
    if !resp.ok() {
        bail!("GET {} returned {}", url, resp.status());
    }
    let body = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| anyhow!("{} body is not text", url))?;
    Ok(Config::from_json(&body)?)
}

pub async fn save_config(body: &str) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));
    let headers = web::Headers::new().map_err(js_err)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_err)?;
    init.set_headers(&headers);
    let request = web::Request::new_with_str_and_init(SAVE_URL, &init).map_err(js_err)?;
    let resp = fetch(&window, &request).await?;
    if !resp.ok() {
        bail!("server returned {}", resp.status());
    }
    Ok(())
}

/// Fire-and-forget save of the whole config; the outcome lands in the
/// debug log.
pub fn spawn_save(overlay: Rc<RefCell<Overlay>>) {
    let body = overlay.borrow().persisted_json();
    let body = match body {
        Ok(b) => b,
        Err(e) => {
            overlay.borrow_mut().record_save_result(Err(e));
            return;
        }
    };
    spawn_local(async move {
        let outcome = save_config(&body)
            .await
            .map_err(|e| OverlayError::Persist(format!("{:#}", e)));
        overlay.borrow_mut().record_save_result(outcome);
    });
}
