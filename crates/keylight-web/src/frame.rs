use crate::canvas;
use crate::ui;
use keylight_core::Overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub overlay: Rc<RefCell<Overlay>>,
    pub ctx: web::CanvasRenderingContext2d,
    pub document: web::Document,
    pub panels: ui::PanelSync,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let frame = self.overlay.borrow_mut().frame(instant::now());
        canvas::paint(&self.ctx, &frame);
        self.panels.sync(&self.document, &self.overlay.borrow());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
