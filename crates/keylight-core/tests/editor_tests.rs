// Host-side tests for the position editor state machine.

mod common;

use common::{editing_overlay, note_off, note_on};
use keylight_core::*;

fn binding(o: &Overlay, p: EditProperty) -> SliderBinding {
    o.slider_bindings()
        .expect("a key is selected")
        .into_iter()
        .find(|b| b.property == p)
        .unwrap()
}

fn key(o: &Overlay, note: u8) -> KeyRecord {
    o.keys().record(&o.config().keys, note).unwrap().clone()
}

#[test]
fn strike_selects_in_pressed_phase_and_release_returns_to_up() {
    let mut o = editing_overlay();
    assert_eq!(o.editor().unwrap().selection(), None);
    assert!(o.slider_bindings().is_none());

    note_on(&mut o, 60, 0.0);
    assert_eq!(
        o.editor().unwrap().selection(),
        Some(Selection {
            note: 60,
            phase: EditPhase::Pressed
        })
    );
    let left = binding(&o, EditProperty::Left);
    assert_eq!((left.min, left.max, left.value), (-50.0, 50.0, 0.0));
    let width = binding(&o, EditProperty::Width);
    assert_eq!((width.min, width.max), (-25.0, 25.0));
    assert!(!binding(&o, EditProperty::Offset).enabled);

    note_off(&mut o, 60, 10.0);
    assert_eq!(o.edit_phase(), Some(EditPhase::Up));
    let left = binding(&o, EditProperty::Left);
    assert_eq!((left.min, left.max, left.value), (0.0, 800.0, 100.0));
    assert_eq!(binding(&o, EditProperty::Width).value, 20.0);
    let offset = binding(&o, EditProperty::Offset);
    assert!(offset.enabled);
    assert_eq!((offset.min, offset.max, offset.value), (-25.0, 25.0, 0.0));
}

#[test]
fn restrike_of_selected_key_enters_pressed_again() {
    let mut o = editing_overlay();
    note_on(&mut o, 62, 0.0);
    note_off(&mut o, 62, 1.0);
    note_on(&mut o, 62, 2.0);
    assert_eq!(o.edit_phase(), Some(EditPhase::Pressed));
    assert!(o.notes().is_held(62));
}

#[test]
fn striking_another_key_moves_selection_pressed() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    note_off(&mut o, 60, 1.0);
    note_on(&mut o, 62, 2.0);
    let sel = o.editor().unwrap().selection().unwrap();
    assert_eq!((sel.note, sel.phase), (62, EditPhase::Pressed));
    assert!(!o.notes().is_audible(60));
    assert!(o.notes().is_held(62));
}

#[test]
fn other_key_strike_deselects_old_key_even_while_held() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    note_on(&mut o, 62, 1.0);
    assert!(!o.notes().is_audible(60));
    assert_eq!(o.editor().unwrap().selected_note(), Some(62));
}

#[test]
fn unknown_note_does_not_select_or_spawn() {
    let mut o = editing_overlay();
    note_on(&mut o, 30, 0.0);
    assert_eq!(o.editor().unwrap().selection(), None);
    assert!(!o.notes().is_audible(30));
    assert!(o.particles().is_empty());
}

#[test]
fn edit_mode_never_spawns_particles() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    assert!(o.particles().is_empty());
}

#[test]
fn pedal_does_not_keep_released_keys_in_edit_mode() {
    let mut o = editing_overlay();
    common::pedal(&mut o, 127, 0.0);
    note_on(&mut o, 60, 0.0);
    note_off(&mut o, 60, 1.0);
    assert!(!o.notes().is_audible(60));
    assert_eq!(o.edit_phase(), Some(EditPhase::Up));
}

#[test]
fn slider_writes_go_to_the_bound_geometry() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    assert_eq!(o.edit_input(EditProperty::Left, 5.0), Some(5.0));
    assert_eq!(o.edit_input(EditProperty::Width, -3.0), Some(-3.0));
    assert_eq!(o.edit_input(EditProperty::Offset, 7.0), None);
    let k = key(&o, 60);
    assert_eq!(k.pressed_left_offset, Some(5.0));
    assert_eq!(k.pressed_width_offset, Some(-3.0));
    assert_eq!((k.left, k.width, k.offset), (100.0, 20.0, None));

    note_off(&mut o, 60, 1.0);
    assert_eq!(o.edit_input(EditProperty::Left, 300.0), Some(300.0));
    assert_eq!(o.edit_input(EditProperty::Width, 30.0), Some(30.0));
    assert_eq!(o.edit_input(EditProperty::Offset, -8.0), Some(-8.0));
    let k = key(&o, 60);
    assert_eq!((k.left, k.width, k.offset), (300.0, 30.0, Some(-8.0)));
    assert_eq!(k.pressed_left_offset, Some(5.0));
}

#[test]
fn slider_writes_are_clamped_to_range() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    assert_eq!(o.edit_input(EditProperty::Left, 80.0), Some(50.0));
    assert_eq!(o.edit_input(EditProperty::Width, -99.0), Some(-25.0));
    note_off(&mut o, 60, 1.0);
    assert_eq!(o.edit_input(EditProperty::Left, 5000.0), Some(800.0));
    assert_eq!(o.edit_input(EditProperty::Offset, 40.0), Some(25.0));
    assert_eq!(o.edit_input(EditProperty::Width, f32::NAN), None);
}

#[test]
fn input_without_selection_is_ignored() {
    let mut o = editing_overlay();
    assert_eq!(o.edit_input(EditProperty::Left, 5.0), None);
    assert_eq!(key(&o, 60).left, 100.0);
}

#[test]
fn keyboard_nudge_uses_the_selected_property() {
    let mut o = editing_overlay();
    o.apply_command(EditCommand::Navigate(Direction::Next));
    // no property chosen yet
    o.apply_command(EditCommand::Nudge(1));
    assert_eq!(key(&o, 60).left, 100.0);

    o.apply_command(EditCommand::SelectProperty(EditProperty::Left));
    o.apply_command(command_for_key("ArrowRight", false).unwrap());
    assert_eq!(key(&o, 60).left, 101.0);
    o.apply_command(command_for_key("ArrowLeft", true).unwrap());
    assert_eq!(key(&o, 60).left, 91.0);

    o.apply_command(EditCommand::SelectProperty(EditProperty::Offset));
    o.apply_command(EditCommand::Nudge(-10));
    assert_eq!(key(&o, 60).offset, Some(-10.0));
}

#[test]
fn nudging_offset_while_pressed_is_a_no_op() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    o.apply_command(EditCommand::SelectProperty(EditProperty::Offset));
    o.apply_command(EditCommand::Nudge(1));
    assert_eq!(key(&o, 60).offset, None);
}

#[test]
fn navigate_walks_configured_notes_in_ascending_order_without_wrapping() {
    let mut o = editing_overlay();
    let mut visited = Vec::new();
    for _ in 0..6 {
        o.apply_command(EditCommand::Navigate(Direction::Next));
        visited.push(o.editor().unwrap().selected_note().unwrap());
    }
    assert_eq!(visited, vec![60, 62, 64, 65, 65, 65]);

    for _ in 0..5 {
        o.apply_command(EditCommand::Navigate(Direction::Previous));
    }
    assert_eq!(o.editor().unwrap().selected_note(), Some(60));
}

#[test]
fn navigate_from_idle_backwards_lands_on_last_key() {
    let mut o = editing_overlay();
    o.apply_command(EditCommand::Navigate(Direction::Previous));
    assert_eq!(o.editor().unwrap().selected_note(), Some(65));
}

#[test]
fn navigate_resets_to_up_and_clears_former_key() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    o.apply_command(EditCommand::Navigate(Direction::Next));
    let sel = o.editor().unwrap().selection().unwrap();
    assert_eq!((sel.note, sel.phase), (62, EditPhase::Up));
    assert!(!o.notes().is_audible(60));
}

#[test]
fn navigate_resets_to_up_even_if_key_is_physically_down() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    // already on the first key, so this lands on 60 again
    o.apply_command(EditCommand::Navigate(Direction::Previous));
    let sel = o.editor().unwrap().selection().unwrap();
    assert_eq!((sel.note, sel.phase), (60, EditPhase::Up));
    assert!(o.notes().is_held(60));
}

#[test]
fn navigate_with_no_keys_selects_nothing() {
    let mut cfg = common::config();
    cfg.keys.clear();
    cfg.edit_mode = true;
    let mut o = Overlay::new(cfg, 1);
    o.apply_command(EditCommand::Navigate(Direction::Next));
    assert_eq!(o.editor().unwrap().selection(), None);
}

#[test]
fn sliders_fall_back_to_disabled_idle_bindings() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    assert!(o.slider_bindings().is_some());
    o.apply_command(EditCommand::Deselect);
    assert_eq!(o.slider_bindings(), None);

    let idle = idle_bindings();
    assert!(idle.iter().all(|b| !b.enabled));
    let labels: Vec<_> = idle.iter().map(|b| b.label).collect();
    assert_eq!(labels, ["Left", "Width", "Offset"]);
    assert_eq!(o.edit_input(EditProperty::Left, 5.0), None);
}

#[test]
fn deselect_clears_selection_and_key() {
    let mut o = editing_overlay();
    note_on(&mut o, 60, 0.0);
    o.apply_command(EditCommand::SelectProperty(EditProperty::Width));
    o.apply_command(EditCommand::Deselect);
    assert_eq!(o.editor().unwrap().selection(), None);
    assert_eq!(o.editor().unwrap().property(), None);
    assert!(!o.notes().is_audible(60));
}

#[test]
fn toggling_edit_mode_starts_a_fresh_session() {
    let mut o = common::overlay();
    assert!(!o.edit_mode());
    // editor commands are ignored outside edit mode
    assert!(!o.apply_command(EditCommand::Save));
    o.apply_command(EditCommand::Navigate(Direction::Next));
    assert!(o.editor().is_none());

    o.apply_command(EditCommand::ToggleEditMode);
    assert!(o.edit_mode());
    assert!(!o.config().edit_mode);
    note_on(&mut o, 60, 0.0);
    o.apply_command(EditCommand::ToggleEditMode);
    assert!(!o.edit_mode());
    assert!(!o.notes().is_audible(60));
    o.apply_command(EditCommand::ToggleEditMode);
    assert_eq!(o.editor().unwrap().selection(), None);
}

#[test]
fn saving_after_toggling_keeps_the_loaded_start_mode() {
    let mut o = common::overlay();
    o.apply_command(EditCommand::ToggleEditMode);
    assert!(o.apply_command(EditCommand::Save));
    let json = o.persisted_json().unwrap();

    let mut reloaded = Overlay::new(Config::from_json(&json).unwrap(), 7);
    assert!(!reloaded.edit_mode());
    note_on(&mut reloaded, 62, 0.0);
    assert!(reloaded.notes().is_held(62));
    assert!(!reloaded.particles().is_empty());
}

#[test]
fn reload_keeps_session_mode_unless_the_file_changes_it() {
    let mut o = common::overlay();
    o.apply_command(EditCommand::ToggleEditMode);
    o.reload_config(common::config());
    assert!(o.edit_mode());

    let mut cfg = common::config();
    cfg.edit_mode = true;
    o.reload_config(cfg);
    assert!(o.edit_mode());
    o.reload_config(common::config());
    assert!(!o.edit_mode());
}

#[test]
fn save_is_requested_only_in_edit_mode() {
    let mut o = editing_overlay();
    assert!(o.apply_command(EditCommand::Save));
}

#[test]
fn keyboard_shortcuts() {
    assert_eq!(command_for_key("ArrowLeft", false), Some(EditCommand::Nudge(-1)));
    assert_eq!(command_for_key("ArrowRight", true), Some(EditCommand::Nudge(10)));
    assert_eq!(
        command_for_key("ArrowDown", false),
        Some(EditCommand::Navigate(Direction::Next))
    );
    assert_eq!(
        command_for_key("ArrowUp", false),
        Some(EditCommand::Navigate(Direction::Previous))
    );
    assert_eq!(
        command_for_key("3", false),
        Some(EditCommand::SelectProperty(EditProperty::Offset))
    );
    assert_eq!(command_for_key("s", false), Some(EditCommand::Save));
    assert_eq!(command_for_key("E", true), Some(EditCommand::ToggleEditMode));
    assert_eq!(command_for_key("Escape", false), Some(EditCommand::Deselect));
    assert_eq!(command_for_key("q", false), None);
}

#[test]
fn save_failure_is_logged_and_editor_stays_usable() {
    let mut o = editing_overlay();
    o.record_save_result(Err(OverlayError::Persist("server returned 500".into())));
    assert_eq!(
        o.debug_log().lines().next(),
        Some("[save] saving config failed: server returned 500")
    );
    note_on(&mut o, 60, 0.0);
    assert_eq!(o.edit_input(EditProperty::Left, 3.0), Some(3.0));
    o.record_save_result(Ok(()));
    assert_eq!(o.debug_log().lines().next(), Some("Config saved"));
}

#[test]
fn reload_drops_selection_of_removed_key() {
    let mut o = editing_overlay();
    note_on(&mut o, 64, 0.0);
    let mut cfg = common::config();
    cfg.edit_mode = true;
    cfg.keys.retain(|k| k.note != 64);
    o.reload_config(cfg);
    assert!(o.edit_mode());
    assert_eq!(o.editor().unwrap().selection(), None);
    assert!(!o.keys().contains(64));
}
