// Diatonic scale tables: key name -> seven degrees with harmonic qualities.
//
// Keys are named by a natural letter plus an optional minor marker ("C",
// "Am"). Each key yields its seven diatonic triads in scale order, spelled
// sharp-preferring ("D" major contains "F#m", not "Gbm"). The quality rows
// are fixed:
//
//   major key:         I    ii   iii  IV   V    vi   vii(b5)
//   natural minor key: i    ii(b5) III iv   v    VI   VII
//
// The diminished degree is tagged so generators can exclude it; its label
// renders with the "mb5" suffix the rest of the system expects.

use serde::{Deserialize, Serialize};

use crate::TheoryError;
use crate::pitch::class_name;

/// The natural key letters the metadata generator samples from.
pub const KEY_LETTERS: [&str; 7] = ["C", "D", "E", "F", "G", "A", "B"];

/// The mode suffixes the metadata generator samples from.
pub const MODE_SUFFIXES: [&str; 2] = ["", "m"];

/// Semitone offsets of the seven degrees from the tonic.
const MAJOR_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Triad quality of each degree, in scale order.
const MAJOR_QUALITIES: [Quality; 7] = [
    Quality::Major,
    Quality::Minor,
    Quality::Minor,
    Quality::Major,
    Quality::Major,
    Quality::Minor,
    Quality::Diminished,
];
const MINOR_QUALITIES: [Quality; 7] = [
    Quality::Minor,
    Quality::Diminished,
    Quality::Major,
    Quality::Minor,
    Quality::Minor,
    Quality::Major,
    Quality::Major,
];

/// Harmonic quality of a diatonic triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Major,
    Minor,
    /// The flattened-fifth degree — categorically excluded by the
    /// progression generator.
    Diminished,
}

impl Quality {
    /// The label suffix for this quality ("", "m", "mb5").
    pub fn suffix(self) -> &'static str {
        match self {
            Quality::Major => "",
            Quality::Minor => "m",
            Quality::Diminished => "mb5",
        }
    }
}

/// One degree of a diatonic scale: a spelled root plus its triad quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDegree {
    /// The spelled root, without octave ("C", "F#").
    pub name: String,
    /// Triad quality of the degree.
    pub quality: Quality,
}

impl ScaleDegree {
    /// The chord label as the generators spell it ("C", "Am", "Bmb5").
    pub fn label(&self) -> String {
        format!("{}{}", self.name, self.quality.suffix())
    }
}

/// Look up the seven diatonic degrees of a key.
///
/// Accepts a natural-letter tonic with an optional trailing "m" for natural
/// minor. Pure mapping; unknown names are an error.
pub fn scale(key: &str) -> Result<Vec<ScaleDegree>, TheoryError> {
    let (letter, minor) = match key.strip_suffix('m') {
        Some(rest) => (rest, true),
        None => (key, false),
    };

    let tonic_class = match letter {
        "C" => 0,
        "D" => 2,
        "E" => 4,
        "F" => 5,
        "G" => 7,
        "A" => 9,
        "B" => 11,
        _ => return Err(TheoryError::UnknownKey(key.to_string())),
    };

    let (intervals, qualities) = if minor {
        (&MINOR_INTERVALS, &MINOR_QUALITIES)
    } else {
        (&MAJOR_INTERVALS, &MAJOR_QUALITIES)
    };

    Ok(intervals
        .iter()
        .zip(qualities.iter())
        .map(|(&interval, &quality)| ScaleDegree {
            name: class_name((tonic_class + interval) % 12).to_string(),
            quality,
        })
        .collect())
}
