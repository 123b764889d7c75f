//! Note patterns and the beat grid they are laid on

/// Ordered notes, each held for a whole number of grid slots
///
/// Patterns repeat cyclically: slot `n` plays the note active at
/// `n % len_slots()`.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// One slot per note
    Even(&'static [&'static str]),
    /// `(note, slots)` pairs
    Held(&'static [(&'static str, usize)]),
}

impl Pattern {
    /// Slots in one pass of the pattern
    pub fn len_slots(&self) -> usize {
        match self {
            Pattern::Even(notes) => notes.len(),
            Pattern::Held(steps) => steps.iter().map(|&(_, slots)| slots).sum(),
        }
    }

    /// Note playing in `slot`, or `None` for an empty pattern
    pub fn note_at(&self, slot: usize) -> Option<&'static str> {
        let len = self.len_slots();
        if len == 0 {
            return None;
        }
        let pos = slot % len;

        match self {
            Pattern::Even(notes) => notes.get(pos).copied(),
            Pattern::Held(steps) => {
                let mut end = 0;
                steps.iter().find_map(|&(note, slots)| {
                    end += slots;
                    (pos < end).then_some(note)
                })
            }
        }
    }
}

/// Fixed-length slots laid from time zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatGrid {
    /// Slot length in seconds
    pub slot: f64,
    /// Number of slots
    pub count: usize,
}

impl BeatGrid {
    /// Slots that end within `duration`: `floor(duration / slot)` of them
    ///
    /// Empty unless `slot` is positive and both values are finite.
    pub fn fitted(slot: f64, duration: f64) -> Self {
        if !Self::is_usable(slot, duration) {
            return Self { slot, count: 0 };
        }
        Self {
            slot,
            count: (duration / slot) as usize,
        }
    }

    /// Every slot that starts before `duration`, including a trailing
    /// partial one
    ///
    /// Empty unless `slot` is positive and both values are finite.
    pub fn covering(slot: f64, duration: f64) -> Self {
        if !Self::is_usable(slot, duration) {
            return Self { slot, count: 0 };
        }
        let mut count = 0;
        while (count as f64) * slot < duration {
            count += 1;
        }
        Self { slot, count }
    }

    fn is_usable(slot: f64, duration: f64) -> bool {
        slot.is_finite() && slot > 0.0 && duration.is_finite()
    }

    /// `(index, start time)` of every slot
    pub fn slots(&self) -> impl Iterator<Item = (usize, f64)> {
        let slot = self.slot;
        (0..self.count).map(move |i| (i, i as f64 * slot))
    }
}
