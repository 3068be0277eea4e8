//! Replays a core draw list onto a Canvas2D context.

use keylight_core::{DrawCommand, Frame, KeyQuad};
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

const OUTLINE_STYLE: &str = "rgba(255,255,255,0.9)";

pub fn paint(ctx: &web::CanvasRenderingContext2d, frame: &Frame) {
    for cmd in &frame.commands {
        match cmd {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::Particle {
                x,
                y,
                radius,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&color.css_rgba(*alpha));
                ctx.begin_path();
                if ctx
                    .arc(*x as f64, *y as f64, radius.max(0.0) as f64, 0.0, TAU)
                    .is_ok()
                {
                    ctx.fill();
                }
            }
            DrawCommand::Key(quad) => {
                ctx.save();
                // one bad key must not take the whole frame down
                if let Err(e) = paint_key(ctx, quad) {
                    log::warn!("[render] note {}: {:?}", quad.note, e);
                }
                ctx.restore();
            }
        }
    }
}

fn paint_key(ctx: &web::CanvasRenderingContext2d, quad: &KeyQuad) -> Result<(), JsValue> {
    let r = quad.rect;
    let (left, top, right, bottom) = (r.left as f64, r.top as f64, r.right as f64, r.bottom as f64);

    if let Some(glow) = quad.glow {
        ctx.set_shadow_blur(glow.blur as f64);
        ctx.set_shadow_offset_x(0.0);
        ctx.set_shadow_offset_y(glow.offset_y as f64);
        ctx.set_shadow_color(&glow.color.css_rgba(1.0));
    }

    let gradient = ctx.create_linear_gradient(0.0, top, 0.0, bottom);
    gradient.add_color_stop(0.0, &quad.color.css_rgba(1.0))?;
    gradient.add_color_stop(1.0, &quad.color.css_rgba(0.0))?;
    ctx.set_fill_style_canvas_gradient(&gradient);

    ctx.begin_path();
    ctx.move_to(left, top);
    ctx.line_to(right, top);
    ctx.line_to(right, bottom);
    ctx.line_to(left, bottom);
    ctx.close_path();
    ctx.fill();

    if quad.outline {
        ctx.set_shadow_blur(0.0);
        ctx.set_shadow_color("transparent");
        ctx.set_stroke_style_str(OUTLINE_STYLE);
        ctx.set_line_width(1.0);
        ctx.stroke();
    }
    Ok(())
}
