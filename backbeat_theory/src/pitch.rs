// Note-name resolution: spelled pitches -> MIDI numbers.
//
// A pitch is written `<Letter><Accidental?><OctaveDigit>` ("C4", "F#3",
// "Db2"). The letter + accidental portion is looked up in a fixed enharmonic
// table; the octave digit places it. The numbering follows the generator's
// original convention: octave digit 0 sits at MIDI offset 24, so "C4"
// resolves to 72 (not the common 60). Every consumer of these numbers uses
// the same convention, so only relative placement matters.
//
// The table is deliberately enharmonic-complete: "C#4" and "Db4" resolve to
// the same number, and the edge spellings ("E#", "Cb", "B#") are included.
// Note that "B#" maps to class 12 — one step past "B", wrapping into the
// next octave — which keeps B# a semitone above B as spelled.

use serde::{Deserialize, Serialize};

use crate::TheoryError;

/// Semitones per octave.
pub const OCTAVE: u8 = 12;

/// Octave digit 0 of the note-name convention starts at this MIDI offset.
const OCTAVE_BASE: u8 = 24;

/// The enharmonic spelling table: letter + accidental -> semitone class.
const NOTE_CLASSES: &[(&str, u8)] = &[
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("E#", 5),
    ("Fb", 4),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    ("B#", 12),
    ("Cb", 11),
];

/// A pitch given either as a raw MIDI number or as a spelled note name.
///
/// Generators hand both forms to the chord builders: drum hits arrive as raw
/// General MIDI keys, chord roots and melody notes as spelled names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchSpec {
    /// An absolute MIDI note number, used verbatim.
    Midi(u8),
    /// A spelled note name like "G3" or "F#4", resolved via the table.
    Name(String),
}

impl PitchSpec {
    /// Resolve to a MIDI note number.
    ///
    /// Pure and total over the table: an unknown spelling is an error,
    /// never a default.
    pub fn resolve(&self) -> Result<u8, TheoryError> {
        match self {
            PitchSpec::Midi(n) => Ok(*n),
            PitchSpec::Name(name) => resolve_name(name),
        }
    }
}

impl From<u8> for PitchSpec {
    fn from(n: u8) -> Self {
        PitchSpec::Midi(n)
    }
}

impl From<&str> for PitchSpec {
    fn from(name: &str) -> Self {
        PitchSpec::Name(name.to_string())
    }
}

impl From<String> for PitchSpec {
    fn from(name: String) -> Self {
        PitchSpec::Name(name)
    }
}

/// Resolve a spelled note name ("C4", "Bb2") to a MIDI number.
fn resolve_name(name: &str) -> Result<u8, TheoryError> {
    let (class_part, octave_part) = match name.char_indices().last() {
        Some((idx, ch)) if ch.is_ascii_digit() && idx > 0 => {
            (&name[..idx], ch as u8 - b'0')
        }
        _ => return Err(TheoryError::UnknownNoteName(name.to_string())),
    };

    let class = NOTE_CLASSES
        .iter()
        .find(|(spelling, _)| *spelling == class_part)
        .map(|(_, class)| *class)
        .ok_or_else(|| TheoryError::UnknownNoteName(name.to_string()))?;

    Ok(octave_part * OCTAVE + OCTAVE_BASE + class)
}

/// The sharp-preferring name for each semitone class, used when spelling
/// scale degrees.
pub fn class_name(class: u8) -> &'static str {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    NAMES[(class % 12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_anchor() {
        // Octave digit 4 => 4*12 + 24 + 0 under this numbering.
        assert_eq!(PitchSpec::from("C4").resolve(), Ok(72));
        assert_eq!(PitchSpec::from("C0").resolve(), Ok(24));
        assert_eq!(PitchSpec::from("A3").resolve(), Ok(69));
    }

    #[test]
    fn test_midi_passthrough() {
        assert_eq!(PitchSpec::from(42u8).resolve(), Ok(42));
    }

    #[test]
    fn test_enharmonic_equivalents() {
        let pairs = [
            ("C#4", "Db4"),
            ("D#4", "Eb4"),
            ("F#4", "Gb4"),
            ("G#4", "Ab4"),
            ("A#4", "Bb4"),
            ("E#4", "F4"),
            ("Fb4", "E4"),
            ("Cb4", "B4"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                PitchSpec::from(a).resolve(),
                PitchSpec::from(b).resolve(),
                "{a} and {b} should resolve identically"
            );
        }
    }

    #[test]
    fn test_b_sharp_wraps_upward() {
        // B#4 is spelled a semitone above B4, landing on the next octave's C.
        let b4 = PitchSpec::from("B4").resolve().unwrap();
        let b_sharp4 = PitchSpec::from("B#4").resolve().unwrap();
        assert_eq!(b_sharp4, b4 + 1);
    }

    #[test]
    fn test_unknown_spellings_fail() {
        for bad in ["H4", "C##4", "C", "4", "", "Cx4"] {
            assert!(
                matches!(
                    PitchSpec::from(bad).resolve(),
                    Err(TheoryError::UnknownNoteName(_))
                ),
                "'{bad}' should not resolve"
            );
        }
    }

    #[test]
    fn test_class_names_round_trip() {
        for class in 0..12u8 {
            let name = format!("{}4", class_name(class));
            let resolved = PitchSpec::from(name.as_str()).resolve().unwrap();
            assert_eq!(resolved % 12, class % 12);
        }
    }
}
