use crate::config::KeyRecord;
use fnv::FnvHashMap;

/// Note number -> position in `Config::keys`, plus the configured notes in
/// ascending order for editor navigation. Rebuilt whenever config is loaded.
#[derive(Clone, Debug, Default)]
pub struct KeyMap {
    index: FnvHashMap<u8, usize>,
    ordered: Vec<u8>,
}

impl KeyMap {
    pub fn build(keys: &[KeyRecord]) -> Self {
        let index: FnvHashMap<u8, usize> =
            keys.iter().enumerate().map(|(i, k)| (k.note, i)).collect();
        let mut ordered: Vec<u8> = index.keys().copied().collect();
        ordered.sort_unstable();
        Self { index, ordered }
    }

    #[inline]
    pub fn contains(&self, note: u8) -> bool {
        self.index.contains_key(&note)
    }

    #[inline]
    pub fn position(&self, note: u8) -> Option<usize> {
        self.index.get(&note).copied()
    }

    pub fn record<'a>(&self, keys: &'a [KeyRecord], note: u8) -> Option<&'a KeyRecord> {
        self.position(note).and_then(|i| keys.get(i))
    }

    pub fn record_mut<'a>(&self, keys: &'a mut [KeyRecord], note: u8) -> Option<&'a mut KeyRecord> {
        self.position(note).and_then(move |i| keys.get_mut(i))
    }

    /// Configured notes, ascending.
    pub fn notes(&self) -> &[u8] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
