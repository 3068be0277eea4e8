// Shared fixtures for the host-side integration tests.

#![allow(dead_code)]

use keylight_core::*;

pub const ACTIVE: Rgb = Rgb::new(0, 128, 255);

/// Four keys, deliberately out of note order: 60 and 62 plain, 64 with
/// pressed deltas, 65 hidden.
pub fn config() -> Config {
    Config {
        canvas: CanvasSize {
            width: 800,
            height: 200,
        },
        colors: Colors {
            active: ACTIVE,
            sustained_lighten: 0.5,
        },
        key_bounds: KeyBounds {
            top: 20.0,
            bottom: 180.0,
        },
        effects: Effects {
            glow: GlowParams::default(),
            particles: ParticleParams {
                enabled: true,
                speed: 1.0,
                size: 1.0,
                lifetime: 1000.0,
                count: 3,
            },
        },
        keys: vec![
            KeyRecord::new(60, 100.0, 20.0),
            KeyRecord {
                pressed_left_offset: Some(2.0),
                pressed_width_offset: Some(-4.0),
                ..KeyRecord::new(64, 150.0, 20.0)
            },
            KeyRecord::new(62, 125.0, 20.0),
            KeyRecord {
                hidden: Some(true),
                ..KeyRecord::new(65, 175.0, 20.0)
            },
        ],
        debug: false,
        edit_mode: false,
    }
}

pub fn overlay() -> Overlay {
    Overlay::new(config(), 7)
}

pub fn editing_overlay() -> Overlay {
    let mut cfg = config();
    cfg.edit_mode = true;
    Overlay::new(cfg, 7)
}

pub fn note_on(o: &mut Overlay, note: u8, now_ms: f64) {
    o.handle_message(&[0x90, note, 100], now_ms);
}

pub fn note_off(o: &mut Overlay, note: u8, now_ms: f64) {
    o.handle_message(&[0x80, note, 0], now_ms);
}

pub fn pedal(o: &mut Overlay, value: u8, now_ms: f64) {
    o.handle_message(&[0xB0, 64, value], now_ms);
}
