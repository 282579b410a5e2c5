// Chord construction: triad shapes, inversions, and explicit pitch groups.
//
// The original generator expressed chord shapes as a class hierarchy; here a
// triad shape is just its two stacked intervals, with the four named shapes
// as preset constants. An inversion reorders the same three pitch classes so
// a non-root tone sounds lowest: the dropped tones move down an octave, so
// the pitch multiset is preserved up to octave placement.

use backbeat_theory::{PitchSpec, Quality};

use crate::error::MusicError;
use crate::event::ChordGroup;

/// A three-note chord shape: two stacked intervals above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriadShape {
    pub first_interval: u8,
    pub second_interval: u8,
}

/// The named shapes.
pub const MAJOR: TriadShape = TriadShape { first_interval: 4, second_interval: 3 };
pub const MINOR: TriadShape = TriadShape { first_interval: 3, second_interval: 4 };
pub const DIMINISHED: TriadShape = TriadShape { first_interval: 3, second_interval: 3 };
pub const AUGMENTED: TriadShape = TriadShape { first_interval: 4, second_interval: 4 };

impl TriadShape {
    /// The shape for a diatonic degree quality.
    pub fn of(quality: Quality) -> TriadShape {
        match quality {
            Quality::Major => MAJOR,
            Quality::Minor => MINOR,
            Quality::Diminished => DIMINISHED,
        }
    }
}

/// Which chord tone sounds lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inversion {
    /// Root position: root in the bass.
    Root,
    /// First inversion: the third, dropped an octave, in the bass.
    First,
    /// Second inversion: the fifth, dropped an octave, in the bass.
    Second,
}

/// Build a triad as a chord group.
///
/// Pitch arithmetic is unchecked beyond i16 intermediate math; callers
/// supply roots at octave 2 or higher, where dropping a tone an octave
/// cannot underflow.
pub fn triad(
    shape: TriadShape,
    root: u8,
    inversion: Inversion,
    velocity: u8,
    lead_in: u32,
) -> Result<ChordGroup, MusicError> {
    let root = root as i16;
    let third = root + shape.first_interval as i16;
    let fifth = third + shape.second_interval as i16;

    let pitches: [i16; 3] = match inversion {
        Inversion::Root => [root, third, fifth],
        Inversion::First => [fifth - 12, root, third],
        Inversion::Second => [third - 12, fifth - 12, root],
    };

    let pitches: Vec<u8> = pitches.iter().map(|&p| p as u8).collect();
    ChordGroup::new(&pitches, velocity, lead_in)
}

/// Build a group from a caller-supplied ordered pitch list, resolving each
/// spec. Used for drum-style simultaneous hits and fixed melody pitches.
pub fn from_pitches(
    specs: &[PitchSpec],
    velocity: u8,
    lead_in: u32,
) -> Result<ChordGroup, MusicError> {
    let pitches = specs
        .iter()
        .map(|spec| spec.resolve())
        .collect::<Result<Vec<u8>, _>>()?;
    ChordGroup::new(&pitches, velocity, lead_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(group: &ChordGroup) -> Vec<u8> {
        group.sounds().iter().map(|s| s.pitch).collect()
    }

    #[test]
    fn test_major_root_position() {
        let group = triad(MAJOR, 72, Inversion::Root, 90, 0).unwrap();
        assert_eq!(pitches(&group), [72, 76, 79]);
    }

    #[test]
    fn test_first_inversion_drops_fifth_spot() {
        // G3 major, first inversion: the fifth (D) drops an octave into the bass.
        let root = PitchSpec::from("G3").resolve().unwrap();
        let group = triad(MAJOR, root, Inversion::First, 90, 0).unwrap();
        assert_eq!(pitches(&group), [root + 7 - 12, root, root + 4]);
    }

    #[test]
    fn test_second_inversion_bass_below_root() {
        let group = triad(MINOR, 72, Inversion::Second, 90, 0).unwrap();
        assert_eq!(pitches(&group), [72 + 3 - 12, 72 + 7 - 12, 72]);
    }

    #[test]
    fn test_inversions_share_pitch_classes() {
        for inversion in [Inversion::Root, Inversion::First, Inversion::Second] {
            let group = triad(MINOR, 72, inversion, 90, 0).unwrap();
            let mut classes: Vec<u8> = pitches(&group).iter().map(|p| p % 12).collect();
            classes.sort_unstable();
            assert_eq!(classes, [0, 3, 7], "inversion {inversion:?}");
        }
    }

    #[test]
    fn test_named_shapes() {
        assert_eq!(TriadShape::of(Quality::Major), MAJOR);
        assert_eq!(TriadShape::of(Quality::Minor), MINOR);
        assert_eq!(TriadShape::of(Quality::Diminished), DIMINISHED);
        assert_eq!(AUGMENTED.second_interval, 4);
    }

    #[test]
    fn test_from_pitches_mixed_specs() {
        let specs = [PitchSpec::from(36u8), PitchSpec::from("C3")];
        let group = from_pitches(&specs, 120, 0).unwrap();
        assert_eq!(pitches(&group), [36, 60]);
        assert_eq!(group.sounds()[0].start_delta, 0);
    }

    #[test]
    fn test_from_pitches_bad_name_propagates() {
        let specs = [PitchSpec::from("H2")];
        assert!(matches!(
            from_pitches(&specs, 120, 0),
            Err(MusicError::Theory(_))
        ));
    }
}
