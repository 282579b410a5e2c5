// MIDI output: serializing a Song to a Standard MIDI File.
//
// Each Track maps to one SMF track; the song's delta-encoded messages map
// one-to-one onto midly track events, so the on/off ordering and delta
// collapsing established upstream arrive in the file bit-exact.
//
// Uses the `midly` crate for MIDI writing. Output is SMF Format 1
// (multi-track), 480 ticks per quarter note.

use midly::{
    Format, Header, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

use crate::error::MusicError;
use crate::timeline::{MessageKind, Song, Track};
use crate::TICKS_PER_BEAT;

/// Convert a Song to MIDI and write it to a file.
pub fn write_midi(song: &Song, path: &Path) -> Result<(), MusicError> {
    let smf = song_to_smf(song);
    smf.save(path)?;
    Ok(())
}

/// Convert a Song to an in-memory SMF.
pub fn song_to_smf(song: &Song) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT as u16)),
    ));

    for track in song.tracks() {
        smf.tracks.push(track_events(track));
    }

    smf
}

fn track_events(track: &Track) -> Vec<TrackEvent<'static>> {
    let channel = u4::new(track.channel);
    let mut events: Vec<TrackEvent<'static>> = Vec::with_capacity(track.messages().len() + 1);

    for message in track.messages() {
        let kind = match message.kind {
            MessageKind::ProgramChange { program } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange {
                    program: u7::new(program),
                },
            },
            MessageKind::Tempo { bpm } => {
                // Microseconds per quarter note.
                let microseconds = 60_000_000 / bpm as u32;
                TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(microseconds)))
            }
            MessageKind::TimeSignature {
                numerator,
                denominator,
            } => TrackEventKind::Meta(midly::MetaMessage::TimeSignature(
                numerator,
                // SMF stores the denominator as a power of two.
                denominator.trailing_zeros() as u8,
                24,
                8,
            )),
            MessageKind::NoteOn { pitch, velocity } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(pitch),
                    vel: u7::new(velocity),
                },
            },
            MessageKind::NoteOff { pitch, velocity } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(pitch),
                    vel: u7::new(velocity),
                },
            },
        };
        events.push(TrackEvent {
            delta: u28::new(message.delta),
            kind,
        });
    }

    events.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });

    events
}
