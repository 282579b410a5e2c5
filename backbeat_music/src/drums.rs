// Drum pattern generation: a deterministic kick/snare/hat grid.
//
// The subdivision is decided once from the tempo: at 100 BPM and above the
// pattern moves in eighth notes (simple time); below that, in sixteenths
// (double time), doubling the hit count while keeping the kick and snare on
// the same musical positions. The closed hi-hat plays on every hit; kick
// and snare placement is a modulo test against the running position, so the
// whole pattern is a pure function of tempo and bar count — no randomness.

use serde::{Deserialize, Serialize};

use crate::meta::PieceMeta;
use crate::{EIGHTH_NOTE, SIXTEENTH_NOTE, tick_budget};

/// The drum voices of the pattern, with their General MIDI keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrumVoice {
    Kick,
    Snare,
    ClosedHat,
}

impl DrumVoice {
    /// General MIDI percussion key for this voice.
    pub fn midi_key(self) -> u8 {
        match self {
            DrumVoice::Kick => 36,
            DrumVoice::Snare => 38,
            DrumVoice::ClosedHat => 42,
        }
    }
}

/// One hit of the pattern: which voices strike, and for how many ticks the
/// hit lasts before the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumHit {
    pub voices: Vec<DrumVoice>,
    pub duration: u32,
}

/// Modulo placement parameters for one subdivision level.
struct HitPlacement {
    /// Subdivision units per placement cycle (one beat's worth of cycle).
    base_multiplier: u32,
    /// Kick lands on this unit offset within the cycle.
    kick_offset: u32,
    /// Snare lands on this unit offset within the cycle (the backbeat).
    snare_offset: u32,
}

const SIMPLE_TIME: HitPlacement = HitPlacement {
    base_multiplier: 4,
    kick_offset: 0,
    snare_offset: 2,
};

const DOUBLE_TIME: HitPlacement = HitPlacement {
    base_multiplier: 8,
    kick_offset: 0,
    snare_offset: 4,
};

/// Fill `bars` bars with a drum pattern for the piece's tempo.
pub fn generate_drum_pattern(meta: &PieceMeta, bars: u32) -> Vec<DrumHit> {
    let (subdivision, placement) = if meta.tempo >= 100 {
        (EIGHTH_NOTE, SIMPLE_TIME)
    } else {
        (SIXTEENTH_NOTE, DOUBLE_TIME)
    };

    let mut pattern = Vec::new();
    let mut position: u32 = 0;
    let mut ticks_left = tick_budget(meta.time_signature.0, bars) as i64;

    while ticks_left > 0 {
        pattern.push(DrumHit {
            voices: hit_at(position, subdivision, &placement),
            duration: subdivision,
        });
        position += subdivision;
        ticks_left -= subdivision as i64;
    }

    pattern
}

/// Which voices strike at an absolute subdivision-aligned position.
fn hit_at(position: u32, subdivision: u32, placement: &HitPlacement) -> Vec<DrumVoice> {
    let cycle = subdivision * placement.base_multiplier;
    let mut voices = Vec::new();

    if position % cycle == subdivision * placement.kick_offset {
        voices.push(DrumVoice::Kick);
    }
    if position % cycle == subdivision * placement.snare_offset {
        voices.push(DrumVoice::Snare);
    }
    voices.push(DrumVoice::ClosedHat);

    voices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(tempo: u16) -> PieceMeta {
        PieceMeta {
            key: "C".to_string(),
            tempo,
            time_signature: (4, 4),
        }
    }

    #[test]
    fn test_simple_time_entry_count() {
        // 4 bars of 4/4 at 480 PPQ = 7680 ticks / 240-tick eighths = 32 hits.
        let pattern = generate_drum_pattern(&meta(120), 4);
        assert_eq!(pattern.len(), 32);
        assert!(pattern.iter().all(|h| h.duration == EIGHTH_NOTE));
    }

    #[test]
    fn test_double_time_entry_count() {
        let pattern = generate_drum_pattern(&meta(80), 4);
        assert_eq!(pattern.len(), 64);
        assert!(pattern.iter().all(|h| h.duration == SIXTEENTH_NOTE));
    }

    #[test]
    fn test_hat_on_every_hit() {
        for tempo in [70, 99, 100, 135] {
            let pattern = generate_drum_pattern(&meta(tempo), 4);
            assert!(
                pattern
                    .iter()
                    .all(|h| h.voices.contains(&DrumVoice::ClosedHat)),
                "tempo {tempo}"
            );
        }
    }

    #[test]
    fn test_simple_time_backbeat_placement() {
        let pattern = generate_drum_pattern(&meta(120), 1);
        // One bar of eighths: positions 0..8.
        let kicks: Vec<usize> = pattern
            .iter()
            .enumerate()
            .filter(|(_, h)| h.voices.contains(&DrumVoice::Kick))
            .map(|(i, _)| i)
            .collect();
        let snares: Vec<usize> = pattern
            .iter()
            .enumerate()
            .filter(|(_, h)| h.voices.contains(&DrumVoice::Snare))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(kicks, [0, 4]);
        assert_eq!(snares, [2, 6]);
    }

    #[test]
    fn test_double_time_keeps_musical_placement() {
        // At sixteenth subdivision the cycle doubles, so kick and snare land
        // on the same absolute ticks as in simple time.
        let pattern = generate_drum_pattern(&meta(80), 1);
        let kick_ticks: Vec<u32> = pattern
            .iter()
            .enumerate()
            .filter(|(_, h)| h.voices.contains(&DrumVoice::Kick))
            .map(|(i, _)| i as u32 * SIXTEENTH_NOTE)
            .collect();
        let snare_ticks: Vec<u32> = pattern
            .iter()
            .enumerate()
            .filter(|(_, h)| h.voices.contains(&DrumVoice::Snare))
            .map(|(i, _)| i as u32 * SIXTEENTH_NOTE)
            .collect();
        assert_eq!(kick_ticks, [0, 960]);
        assert_eq!(snare_ticks, [480, 1440]);
    }

    #[test]
    fn test_first_hit_has_kick_and_hat() {
        let pattern = generate_drum_pattern(&meta(120), 4);
        let first = &pattern[0].voices;
        assert!(first.contains(&DrumVoice::Kick));
        assert!(first.contains(&DrumVoice::ClosedHat));
        assert!(!first.contains(&DrumVoice::Snare));
    }

    #[test]
    fn test_pattern_is_deterministic() {
        assert_eq!(
            generate_drum_pattern(&meta(110), 4),
            generate_drum_pattern(&meta(110), 4)
        );
    }

    #[test]
    fn test_voice_cardinality() {
        let pattern = generate_drum_pattern(&meta(120), 4);
        assert!(
            pattern
                .iter()
                .all(|h| (1..=2).contains(&h.voices.len())),
            "kick and snare never coincide at these offsets"
        );
    }
}
