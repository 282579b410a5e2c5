// Simple melody generation: one quarter note per beat, tracking the chords.
//
// The melody walks the same tick budget as the other generators, and at
// every beat plays the root of whichever chord is active at the cursor.
// "Active" means the chord with the latest start tick at or before the
// cursor — the scan runs most-recent-first, so a chord starting exactly on
// the cursor wins over the one it replaces. The degree's minor marker never
// reaches the pitch spelling (the melody plays the plain root), and the
// note always sits in a fixed octave.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::QUARTER_NOTE;
use crate::meta::PieceMeta;
use crate::progression::ProgressionEntry;
use crate::tick_budget;

/// The octave suffix every melody note is spelled with.
const MELODY_OCTAVE: char = '3';

/// One melody note: a spelled pitch and its length in ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MelodyNote {
    /// Spelled pitch with octave ("C3", "F#3").
    pub pitch: String,
    pub duration: u32,
}

/// Derive a quarter-note melody from a chord progression.
pub fn generate_melody(
    progression: &[ProgressionEntry],
    meta: &PieceMeta,
    bars: u32,
) -> Vec<MelodyNote> {
    // Cumulative start tick of each chord; the first starts at tick 0.
    let mut starts: Vec<(u32, &str)> = Vec::with_capacity(progression.len());
    let mut tick = 0u32;
    for entry in progression {
        starts.push((tick, entry.degree.name.as_str()));
        tick += entry.duration;
    }

    let mut melody = Vec::new();
    let mut cursor = 0u32;
    let mut ticks_left = tick_budget(meta.time_signature.0, bars) as i64;

    while ticks_left > 0 {
        let Some(root) = chord_at(&starts, cursor) else {
            break; // empty progression: nothing to track
        };
        melody.push(MelodyNote {
            pitch: format!("{root}{MELODY_OCTAVE}"),
            duration: QUARTER_NOTE,
        });
        cursor += QUARTER_NOTE;
        ticks_left -= QUARTER_NOTE as i64;
    }

    debug!("melody: {} quarter notes", melody.len());
    melody
}

/// The root of the most recently started chord at or before `cursor`.
fn chord_at<'a>(starts: &[(u32, &'a str)], cursor: u32) -> Option<&'a str> {
    starts
        .iter()
        .rev()
        .find(|(start, _)| cursor >= *start)
        .map(|(_, root)| *root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backbeat_theory::{Quality, ScaleDegree};

    fn entry(name: &str, quality: Quality, duration: u32) -> ProgressionEntry {
        ProgressionEntry {
            degree: ScaleDegree {
                name: name.to_string(),
                quality,
            },
            duration,
        }
    }

    fn meta() -> PieceMeta {
        PieceMeta {
            key: "C".to_string(),
            tempo: 120,
            time_signature: (4, 4),
        }
    }

    #[test]
    fn test_boundary_favors_most_recent_chord() {
        let starts = [(0u32, "A"), (240u32, "C")];
        // At the exact boundary tick the chord starting there wins.
        assert_eq!(chord_at(&starts, 240), Some("C"));
        assert_eq!(chord_at(&starts, 239), Some("A"));
        assert_eq!(chord_at(&starts, 0), Some("A"));
    }

    #[test]
    fn test_minor_marker_stripped_from_pitch() {
        let progression = [entry("A", Quality::Minor, 7680)];
        let melody = generate_melody(&progression, &meta(), 4);
        assert!(melody.iter().all(|n| n.pitch == "A3"));
    }

    #[test]
    fn test_quarter_note_pulse_fills_budget() {
        let progression = [
            entry("C", Quality::Major, 3840),
            entry("G", Quality::Major, 3840),
        ];
        let melody = generate_melody(&progression, &meta(), 4);
        // 4 bars of 4/4 = 16 quarter notes.
        assert_eq!(melody.len(), 16);
        assert!(melody.iter().all(|n| n.duration == QUARTER_NOTE));
    }

    #[test]
    fn test_melody_switches_with_the_progression() {
        let progression = [
            entry("C", Quality::Major, 1920),
            entry("F", Quality::Major, 1920),
            entry("G", Quality::Major, 3840),
        ];
        let melody = generate_melody(&progression, &meta(), 4);
        let pitches: Vec<&str> = melody.iter().map(|n| n.pitch.as_str()).collect();
        assert_eq!(
            pitches,
            [
                "C3", "C3", "C3", "C3", "F3", "F3", "F3", "F3", "G3", "G3", "G3", "G3",
                "G3", "G3", "G3", "G3",
            ]
        );
    }

    #[test]
    fn test_sharp_roots_keep_their_spelling() {
        let progression = [entry("F#", Quality::Minor, 7680)];
        let melody = generate_melody(&progression, &meta(), 4);
        assert_eq!(melody[0].pitch, "F#3");
    }

    #[test]
    fn test_empty_progression_yields_empty_melody() {
        let melody = generate_melody(&[], &meta(), 4);
        assert!(melody.is_empty());
    }
}
