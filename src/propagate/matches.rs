use std::collections::BTreeMap;

/// Unresolved slots of a puzzle, each with the candidates that are still possible.
///
/// Slots are kept in key order so that every scan over them is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matches<K: Ord, C> {
    slots: BTreeMap<K, Vec<C>>,
}

/// The result of filtering every slot once
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scan<K, C> {
    /// This slot has no candidates left
    Empty(K),
    /// This slot has exactly one candidate left (and no slot is empty)
    Forced(K, C),
    /// Every slot has at least two candidates
    Settled,
}

impl<K: Ord, C> Default for Matches<K, C> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone, C: Clone> Matches<K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: K, candidates: Vec<C>) {
        self.slots.insert(slot, candidates);
    }

    pub fn remove(&mut self, slot: &K) -> Option<Vec<C>> {
        self.slots.remove(slot)
    }

    pub fn get(&self, slot: &K) -> Option<&[C]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    pub fn contains_slot(&self, slot: &K) -> bool {
        self.slots.contains_key(slot)
    }

    /// The number of unresolved slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[C])> {
        self.slots.iter().map(|(k, c)| (k, c.as_slice()))
    }

    pub fn slots(&self) -> impl Iterator<Item = &K> {
        self.slots.keys()
    }

    /// The total number of candidates over all slots
    pub fn candidate_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Removes every candidate for which `keep` returns false, in every slot
    pub fn retain_candidates<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &C) -> bool,
    {
        for (slot, candidates) in &mut self.slots {
            candidates.retain(|c| keep(slot, c));
        }
    }

    /// Removes inconsistent candidates from every slot, then reports the first empty slot,
    /// or else the first slot with a single candidate.
    pub fn filter<F>(&mut self, keep: F) -> Scan<K, C>
    where
        F: FnMut(&K, &C) -> bool,
    {
        self.retain_candidates(keep);
        if let Some((slot, _)) = self.slots.iter().find(|(_, c)| c.is_empty()) {
            return Scan::Empty(slot.clone());
        }
        match self.slots.iter().find(|(_, c)| c.len() == 1) {
            Some((slot, candidates)) => Scan::Forced(slot.clone(), candidates[0].clone()),
            None => Scan::Settled,
        }
    }

    /// The slot with the fewest candidates, the lowest key winning ties
    pub fn min_slot(&self) -> Option<(&K, &[C])> {
        self.iter().min_by_key(|(_, candidates)| candidates.len())
    }
}
