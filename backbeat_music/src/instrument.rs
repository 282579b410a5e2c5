// Orchestration: binding generator output to song tracks.
//
// Each instrument is a thin function that expands one generator's entries
// into chord groups and appends them to a fresh track. The chord track
// voices each progression entry as a triad at octave 3, with the inversion
// chosen per root letter so adjacent chords sit close together on the
// keyboard instead of jumping in root position.
//
// `compose` runs the whole pipeline for one piece: metadata, then drums,
// chords, and the chord-tracking melody, each on its own track.

use log::info;
use rand::Rng;

use backbeat_theory::PitchSpec;

use crate::chord::{self, Inversion, TriadShape};
use crate::drums::{DrumHit, generate_drum_pattern};
use crate::error::MusicError;
use crate::melody::{MelodyNote, generate_melody};
use crate::meta::{PieceMeta, generate_meta};
use crate::progression::{ProgressionEntry, generate_progression};
use crate::timeline::{Song, TrackId};

/// Velocity for block chords.
const CHORD_VELOCITY: u8 = 64;
/// Velocity for drum hits and melody notes.
const HIT_VELOCITY: u8 = 120;

/// The chord track plays everything at this octave.
const CHORD_OCTAVE: char = '3';

/// General MIDI percussion channel.
pub const DRUM_CHANNEL: u8 = 9;

/// A fully generated piece: the sampled metadata, the progression it was
/// built on, and the song document ready for MIDI output.
#[derive(Debug)]
pub struct Composition {
    pub meta: PieceMeta,
    pub progression: Vec<ProgressionEntry>,
    pub song: Song,
}

/// Inversion to voice a chord in, by root letter. Roots high in the octave
/// (A, B) invert twice to bring the bass down; roots in the middle (F, G)
/// once; low roots (C, D, E) stay in root position.
fn inversion_for(root: &str) -> Inversion {
    match root.chars().next() {
        Some('A' | 'B') => Inversion::Second,
        Some('F' | 'G') => Inversion::First,
        _ => Inversion::Root,
    }
}

/// Append the drum pattern to a new percussion-channel track.
pub fn add_drum_track(song: &mut Song, pattern: &[DrumHit]) -> Result<TrackId, MusicError> {
    let track = song.new_track(0, DRUM_CHANNEL)?;
    for hit in pattern {
        let keys: Vec<PitchSpec> = hit
            .voices
            .iter()
            .map(|v| PitchSpec::Midi(v.midi_key()))
            .collect();
        let group = chord::from_pitches(&keys, HIT_VELOCITY, 0)?;
        song.append_chord_group(track, group, hit.duration)?;
    }
    Ok(track)
}

/// Append the chord progression to a new track, voiced as triads.
pub fn add_chord_track(
    song: &mut Song,
    progression: &[ProgressionEntry],
) -> Result<TrackId, MusicError> {
    let track = song.new_track(0, 0)?;
    for entry in progression {
        let root_spec = PitchSpec::from(format!("{}{}", entry.degree.name, CHORD_OCTAVE));
        let root = root_spec.resolve()?;
        let group = chord::triad(
            TriadShape::of(entry.degree.quality),
            root,
            inversion_for(&entry.degree.name),
            CHORD_VELOCITY,
            0,
        )?;
        song.append_chord_group(track, group, entry.duration)?;
    }
    Ok(track)
}

/// Append the melody to a new track, one single-note group per beat.
pub fn add_melody_track(song: &mut Song, melody: &[MelodyNote]) -> Result<TrackId, MusicError> {
    let track = song.new_track(0, 0)?;
    for note in melody {
        let spec = PitchSpec::from(note.pitch.as_str());
        let group = chord::from_pitches(&[spec], HIT_VELOCITY, 0)?;
        song.append_chord_group(track, group, note.duration)?;
    }
    Ok(track)
}

/// Generate a complete piece: metadata, three generators, three tracks.
pub fn compose(bars: u32, rng: &mut impl Rng) -> Result<Composition, MusicError> {
    let meta = generate_meta(rng);
    info!(
        "composing {} bars in {} at {} BPM",
        bars, meta.key, meta.tempo
    );

    let pattern = generate_drum_pattern(&meta, bars);
    let progression = generate_progression(&meta, bars, rng)?;
    let melody = generate_melody(&progression, &meta, bars);

    let mut song = Song::new(meta.tempo, meta.time_signature, &meta.key);
    add_drum_track(&mut song, &pattern)?;
    add_chord_track(&mut song, &progression)?;
    add_melody_track(&mut song, &melody)?;

    Ok(Composition {
        meta,
        progression,
        song,
    })
}
