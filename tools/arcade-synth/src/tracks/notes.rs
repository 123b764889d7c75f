//! Note-name to frequency tables, one per key

/// Immutable map from note name (`"E2"`, `"Bb3"`) to Hz
#[derive(Debug, Clone, Copy)]
pub struct NoteTable {
    pub name: &'static str,
    notes: &'static [(&'static str, f64)],
}

impl NoteTable {
    pub const fn new(name: &'static str, notes: &'static [(&'static str, f64)]) -> Self {
        Self { name, notes }
    }

    /// Frequency of `note`, if the table has it
    pub fn get(&self, note: &str) -> Option<f64> {
        self.notes
            .iter()
            .find(|(name, _)| *name == note)
            .map(|&(_, hz)| hz)
    }

    /// Frequency of `note`, or of `default` when `note` is missing
    ///
    /// A missing note is not an error: patterns fall back to the layer's
    /// root. A misspelled note therefore plays the root silently, so every
    /// fallback is logged.
    pub fn frequency_or(&self, note: &str, default: &str) -> f64 {
        match self.get(note) {
            Some(hz) => hz,
            None => {
                tracing::warn!(table = self.name, note, default, "note not in table, using default");
                self.get(default).unwrap_or(0.0)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// E minor pentatonic / blues, for the action loop
pub const E_MINOR_BLUES: NoteTable = NoteTable::new(
    "E minor blues",
    &[
        ("E2", 82.41),
        ("G2", 98.00),
        ("A2", 110.00),
        ("Bb2", 116.54),
        ("B2", 123.47),
        ("D3", 146.83),
        ("E3", 164.81),
        ("G3", 196.00),
        ("A3", 220.00),
        ("Bb3", 233.08),
        ("B3", 246.94),
        ("D4", 293.66),
        ("E4", 329.63),
        ("G4", 392.00),
        ("A4", 440.00),
        ("B4", 493.88),
    ],
);

/// A natural minor
pub const A_MINOR: NoteTable = NoteTable::new(
    "A minor",
    &[
        ("A2", 110.00),
        ("B2", 123.47),
        ("C3", 130.81),
        ("D3", 146.83),
        ("E3", 164.81),
        ("F3", 174.61),
        ("G3", 196.00),
        ("A3", 220.00),
        ("B3", 246.94),
        ("C4", 261.63),
        ("D4", 293.66),
        ("E4", 329.63),
        ("F4", 349.23),
        ("G4", 392.00),
        ("A4", 440.00),
        ("B4", 493.88),
        ("C5", 523.25),
        ("D5", 587.33),
        ("E5", 659.25),
    ],
);

/// D natural minor
pub const D_MINOR: NoteTable = NoteTable::new(
    "D minor",
    &[
        ("D3", 146.83),
        ("E3", 164.81),
        ("F3", 174.61),
        ("G3", 196.00),
        ("A3", 220.00),
        ("Bb3", 233.08),
        ("C4", 261.63),
        ("D4", 293.66),
        ("E4", 329.63),
        ("F4", 349.23),
        ("G4", 392.00),
        ("A4", 440.00),
        ("Bb4", 466.16),
        ("C5", 523.25),
        ("D5", 587.33),
    ],
);

/// C major
pub const C_MAJOR: NoteTable = NoteTable::new(
    "C major",
    &[
        ("C4", 261.63),
        ("D4", 293.66),
        ("E4", 329.63),
        ("F4", 349.23),
        ("G4", 392.00),
        ("A4", 440.00),
        ("B4", 493.88),
        ("C5", 523.25),
        ("D5", 587.33),
        ("E5", 659.25),
        ("F5", 698.46),
        ("G5", 783.99),
    ],
);
