use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Visual status of one note. Idle notes are simply absent from the map, so
/// a note can never be held and sustained at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteStatus {
    Held,
    Sustained,
}

pub type NoteList = SmallVec<[u8; 16]>;

#[derive(Clone, Debug, Default)]
pub struct NoteStates {
    status: FnvHashMap<u8, NoteStatus>,
    pedal_down: bool,
}

impl NoteStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// A physical strike always wins over a pedal-held tail.
    pub fn note_on(&mut self, note: u8) {
        self.status.insert(note, NoteStatus::Held);
    }

    pub fn note_off(&mut self, note: u8) {
        if self.status.get(&note) != Some(&NoteStatus::Held) {
            return;
        }
        if self.pedal_down {
            self.status.insert(note, NoteStatus::Sustained);
        } else {
            self.status.remove(&note);
        }
    }

    /// Pedal release drops every sustained note at once.
    pub fn set_sustain(&mut self, down: bool) {
        let released = self.pedal_down && !down;
        self.pedal_down = down;
        if released {
            self.status.retain(|_, s| *s == NoteStatus::Held);
        }
    }

    /// Drops a note regardless of pedal state (editor deselection).
    pub fn clear_note(&mut self, note: u8) {
        self.status.remove(&note);
    }

    #[inline]
    pub fn pedal_down(&self) -> bool {
        self.pedal_down
    }

    #[inline]
    pub fn status(&self, note: u8) -> Option<NoteStatus> {
        self.status.get(&note).copied()
    }

    #[inline]
    pub fn is_held(&self, note: u8) -> bool {
        self.status(note) == Some(NoteStatus::Held)
    }

    #[inline]
    pub fn is_sustained(&self, note: u8) -> bool {
        self.status(note) == Some(NoteStatus::Sustained)
    }

    #[inline]
    pub fn is_audible(&self, note: u8) -> bool {
        self.status.contains_key(&note)
    }

    pub fn held(&self) -> NoteList {
        self.collect(NoteStatus::Held)
    }

    pub fn sustained(&self) -> NoteList {
        self.collect(NoteStatus::Sustained)
    }

    fn collect(&self, wanted: NoteStatus) -> NoteList {
        let mut out: NoteList = self
            .status
            .iter()
            .filter(|(_, s)| **s == wanted)
            .map(|(n, _)| *n)
            .collect();
        out.sort_unstable();
        out
    }
}
