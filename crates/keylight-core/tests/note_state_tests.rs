// Host-side tests for the held/sustained note engine.

use keylight_core::*;

#[test]
fn release_without_pedal_clears_note() {
    let mut n = NoteStates::new();
    n.note_on(60);
    assert!(n.is_held(60));
    n.note_off(60);
    assert!(!n.is_audible(60));
}

#[test]
fn release_with_pedal_sustains_note() {
    let mut n = NoteStates::new();
    n.set_sustain(true);
    n.note_on(60);
    n.note_off(60);
    assert!(!n.is_held(60));
    assert!(n.is_sustained(60));
    assert!(n.is_audible(60));
}

#[test]
fn pedal_release_clears_all_sustained_at_once() {
    let mut n = NoteStates::new();
    n.set_sustain(true);
    for note in [60, 62, 64] {
        n.note_on(note);
        n.note_off(note);
    }
    n.note_on(67); // still physically down
    assert_eq!(n.sustained().as_slice(), &[60, 62, 64]);

    n.set_sustain(false);
    assert!(n.sustained().is_empty());
    assert_eq!(n.held().as_slice(), &[67]);
}

#[test]
fn held_note_survives_pedal_release() {
    let mut n = NoteStates::new();
    n.note_on(60);
    n.set_sustain(true);
    n.set_sustain(false);
    assert!(n.is_held(60));
    n.note_off(60);
    assert!(!n.is_audible(60));
}

#[test]
fn restrike_moves_sustained_note_back_to_held() {
    let mut n = NoteStates::new();
    n.set_sustain(true);
    n.note_on(60);
    n.note_off(60);
    n.note_on(60);
    assert!(n.is_held(60));
    assert!(!n.is_sustained(60));
    assert_eq!(n.held().len() + n.sustained().len(), 1);
}

#[test]
fn repeated_pedal_down_does_not_clear() {
    let mut n = NoteStates::new();
    n.set_sustain(true);
    n.note_on(60);
    n.note_off(60);
    n.set_sustain(true);
    assert!(n.is_sustained(60));
}

#[test]
fn stray_note_off_is_harmless() {
    let mut n = NoteStates::new();
    n.set_sustain(true);
    n.note_off(61);
    assert!(!n.is_audible(61));
    assert!(n.sustained().is_empty());
}

#[test]
fn held_and_sustained_stay_disjoint_over_a_random_walk() {
    use rand::prelude::*;
    let mut rng = StdRng::seed_from_u64(3);
    let mut n = NoteStates::new();
    // model: held set and a "released while pedal down" set
    let mut held = std::collections::BTreeSet::new();
    let mut sustained = std::collections::BTreeSet::new();
    let mut pedal = false;
    for _ in 0..2000 {
        let note = rng.gen_range(60..66u8);
        match rng.gen_range(0..3) {
            0 => {
                n.note_on(note);
                sustained.remove(&note);
                held.insert(note);
            }
            1 => {
                n.note_off(note);
                if held.remove(&note) && pedal {
                    sustained.insert(note);
                }
            }
            _ => {
                let down = rng.gen_bool(0.5);
                n.set_sustain(down);
                if pedal && !down {
                    sustained.clear();
                }
                pedal = down;
            }
        }
        for note in 60..66u8 {
            assert!(!(n.is_held(note) && n.is_sustained(note)));
            assert_eq!(n.is_held(note), held.contains(&note));
            assert_eq!(n.is_sustained(note), sustained.contains(&note));
            assert_eq!(
                n.is_audible(note),
                held.contains(&note) || sustained.contains(&note)
            );
        }
    }
}
