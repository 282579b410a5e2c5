// Tracks and the song document: append-only delta-encoded message lists.
//
// A Song owns its tracks plus the identity allocator for both track and
// message identities. Identities are monotonic and never reused within a
// Song; the duplicate checks on insertion are defensive — they can only
// trip on misuse of the API, since callers never mint identities themselves.
//
// Header events (program change, tempo, time signature) must land on a
// track before any chord group does; the song applies its tempo and time
// signature uniformly to every track it creates.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::MusicError;
use crate::event::ChordGroup;

/// Identity of a track within a song. Monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u64);

/// Identity of a message within a song. Monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// The identity counters for one song. Owned by the `Song`, threaded
/// through track and message creation — never process-global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next_track: u64,
    next_message: u64,
}

impl IdAllocator {
    fn track_id(&mut self) -> TrackId {
        let id = TrackId(self.next_track);
        self.next_track += 1;
        id
    }

    fn message_id(&mut self) -> MessageId {
        let id = MessageId(self.next_message);
        self.next_message += 1;
        id
    }
}

/// What a timed message says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    ProgramChange { program: u8 },
    Tempo { bpm: u16 },
    TimeSignature { numerator: u8, denominator: u8 },
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff { pitch: u8, velocity: u8 },
}

/// A header-only meta event. Restricting the type here keeps program
/// changes and note events out of `Track::add_header` entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEvent {
    Tempo { bpm: u16 },
    TimeSignature { numerator: u8, denominator: u8 },
}

/// One message on a track: identity, delta ticks, payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedMessage {
    pub id: MessageId,
    /// Ticks since the previous message on the same track.
    pub delta: u32,
    pub kind: MessageKind,
}

/// An append-only ordered message list with a fixed identity and channel.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    /// MIDI channel the track's note and program events play on.
    pub channel: u8,
    messages: Vec<TimedMessage>,
    seen: HashSet<MessageId>,
    has_notes: bool,
}

impl Track {
    /// Create a track with a fresh identity and its program-change header.
    fn new(ids: &mut IdAllocator, program: u8, channel: u8) -> Result<Self, MusicError> {
        let mut track = Track {
            id: ids.track_id(),
            channel,
            messages: Vec::new(),
            seen: HashSet::new(),
            has_notes: false,
        };
        track.push(TimedMessage {
            id: ids.message_id(),
            delta: 0,
            kind: MessageKind::ProgramChange { program },
        })?;
        Ok(track)
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    /// The track's messages in append order.
    pub fn messages(&self) -> &[TimedMessage] {
        &self.messages
    }

    /// Add a tempo or time-signature header. Rejected once any chord group
    /// has been appended: headers are immutable after notes begin.
    pub fn add_header(
        &mut self,
        ids: &mut IdAllocator,
        header: HeaderEvent,
    ) -> Result<(), MusicError> {
        if self.has_notes {
            return Err(MusicError::HeaderAfterNotes);
        }
        let kind = match header {
            HeaderEvent::Tempo { bpm } => MessageKind::Tempo { bpm },
            HeaderEvent::TimeSignature {
                numerator,
                denominator,
            } => MessageKind::TimeSignature {
                numerator,
                denominator,
            },
        };
        self.push(TimedMessage {
            id: ids.message_id(),
            delta: 0,
            kind,
        })
    }

    /// Attach the group's release and append it: all on-events first, then
    /// all off-events, each in group order.
    pub fn append_chord_group(
        &mut self,
        ids: &mut IdAllocator,
        mut group: ChordGroup,
        length: u32,
    ) -> Result<(), MusicError> {
        group.attach_release(length)?;

        for sound in group.sounds() {
            self.push(TimedMessage {
                id: ids.message_id(),
                delta: sound.start_delta,
                kind: MessageKind::NoteOn {
                    pitch: sound.pitch,
                    velocity: sound.velocity,
                },
            })?;
        }
        for sound in group.sounds() {
            // attach_release filled every off-half above.
            let delta = sound.release_delta().unwrap_or(0);
            self.push(TimedMessage {
                id: ids.message_id(),
                delta,
                kind: MessageKind::NoteOff {
                    pitch: sound.pitch,
                    velocity: sound.velocity,
                },
            })?;
        }
        self.has_notes = true;
        Ok(())
    }

    fn push(&mut self, message: TimedMessage) -> Result<(), MusicError> {
        if !self.seen.insert(message.id) {
            return Err(MusicError::DuplicateMessage(message.id.0));
        }
        self.messages.push(message);
        Ok(())
    }
}

/// The song document: tracks keyed by identity plus the metadata applied
/// uniformly to every track's header.
#[derive(Debug, Clone)]
pub struct Song {
    pub tempo: u16,
    pub time_signature: (u8, u8),
    pub key: String,
    tracks: Vec<Track>,
    ids: IdAllocator,
}

impl Song {
    pub fn new(tempo: u16, time_signature: (u8, u8), key: &str) -> Self {
        Song {
            tempo,
            time_signature,
            key: key.to_string(),
            tracks: Vec::new(),
            ids: IdAllocator::default(),
        }
    }

    /// Create and register a track. Its header is written up front:
    /// program change, then the song's tempo and time signature.
    pub fn new_track(&mut self, program: u8, channel: u8) -> Result<TrackId, MusicError> {
        let mut track = Track::new(&mut self.ids, program, channel)?;
        track.add_header(&mut self.ids, HeaderEvent::Tempo { bpm: self.tempo })?;
        track.add_header(
            &mut self.ids,
            HeaderEvent::TimeSignature {
                numerator: self.time_signature.0,
                denominator: self.time_signature.1,
            },
        )?;

        let id = track.id();
        if self.tracks.iter().any(|t| t.id() == id) {
            return Err(MusicError::DuplicateTrack(id.0));
        }
        self.tracks.push(track);
        Ok(id)
    }

    /// Append a chord group to the identified track with the given sounding
    /// length in ticks.
    pub fn append_chord_group(
        &mut self,
        track_id: TrackId,
        group: ChordGroup,
        length: u32,
    ) -> Result<(), MusicError> {
        let ids = &mut self.ids;
        let track = self
            .tracks
            .iter_mut()
            .find(|t| t.id() == track_id)
            .ok_or(MusicError::UnknownTrack(track_id.0))?;
        track.append_chord_group(ids, group, length)
    }

    /// The song's tracks in creation order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
