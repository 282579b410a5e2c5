// Chord progression generation over a shrinking tick budget.
//
// Each iteration appends exactly one entry and pays its duration out of the
// budget; the final entry is clipped to whatever remains, never skipped.
// Degree choice is rejection sampling under two constraints: the
// flattened-fifth (diminished) degree is categorically forbidden, and no
// degree may immediately repeat. The first entry is always the tonic.
//
// The rejection loop terminates almost surely as long as the scale offers
// enough eligible degrees; that precondition is validated up front and
// surfaced as an error instead of letting a degenerate table spin forever.
//
// After the loop, one cadence fix-up: a piece must not end on a minor
// dominant, so a final minor 5th degree is forced to its major form.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use backbeat_theory::{Quality, ScaleDegree, scale};

use crate::error::MusicError;
use crate::meta::PieceMeta;
use crate::{HALF_NOTE, WHOLE_NOTE, tick_budget};

/// Durations a chord may take, before clipping to the remaining budget.
const CHORD_LENGTHS: [u32; 2] = [HALF_NOTE, WHOLE_NOTE];

/// One chord of a progression: a scale degree and its length in ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    pub degree: ScaleDegree,
    pub duration: u32,
}

/// Fill `bars` bars with a chord progression in the piece's key.
pub fn generate_progression(
    meta: &PieceMeta,
    bars: u32,
    rng: &mut impl Rng,
) -> Result<Vec<ProgressionEntry>, MusicError> {
    let degrees = scale(&meta.key)?;

    // Termination guard for the rejection sampling below: with the previous
    // degree excluded there must still be at least two eligible picks.
    let eligible = degrees
        .iter()
        .filter(|d| d.quality != Quality::Diminished)
        .count();
    if eligible < 3 {
        return Err(MusicError::DegenerateScale {
            key: meta.key.clone(),
        });
    }

    let mut entries: Vec<ProgressionEntry> = Vec::new();
    let mut previous: Option<usize> = None;
    let mut ticks_left = tick_budget(meta.time_signature.0, bars) as i64;

    while ticks_left > 0 {
        let index = if entries.is_empty() {
            0 // the tonic opens every progression
        } else {
            loop {
                let candidate = rng.random_range(0..degrees.len());
                if degrees[candidate].quality == Quality::Diminished {
                    continue;
                }
                if previous == Some(candidate) {
                    continue;
                }
                break candidate;
            }
        };
        previous = Some(index);

        let duration = CHORD_LENGTHS[rng.random_range(0..CHORD_LENGTHS.len())]
            .min(ticks_left as u32);
        ticks_left -= duration as i64;

        entries.push(ProgressionEntry {
            degree: degrees[index].clone(),
            duration,
        });
    }

    // Cadence fix-up: never end on a minor dominant.
    let dominant = &degrees[4];
    if let Some(last) = entries.last_mut() {
        if last.degree.name == dominant.name && last.degree.quality == Quality::Minor {
            last.degree.quality = Quality::Major;
        }
    }

    debug!(
        "progression in {}: {}",
        meta.key,
        entries
            .iter()
            .map(|e| e.degree.label())
            .collect::<Vec<_>>()
            .join("-")
    );
    Ok(entries)
}
