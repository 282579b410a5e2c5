// Error types for the music crate.
//
// Every failure here is synchronous and surfaced to the immediate caller;
// there is no retry or partial-result salvage anywhere in the pipeline — a
// failed build yields no output file. The identity errors exist as checks on
// programmer misuse of the track/song API: identities are allocated
// internally, so hitting one indicates a counter bug, not bad input.

use backbeat_theory::TheoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MusicError {
    /// A chord group was built from zero pitches. An empty chord has no
    /// defined event ordering, so it is rejected rather than silently
    /// producing a degenerate group.
    #[error("chord group has no pitches")]
    EmptyChord,

    /// A release was attached to a sound that already has one.
    #[error("release already attached to this sound")]
    ReleaseAlreadyAttached,

    /// A track with this identity is already registered in the song.
    #[error("duplicate track identity {0}")]
    DuplicateTrack(u64),

    /// A message with this identity is already on the track.
    #[error("duplicate message identity {0}")]
    DuplicateMessage(u64),

    /// No track with this identity exists in the song.
    #[error("no track with identity {0}")]
    UnknownTrack(u64),

    /// A header event (tempo/time signature) arrived after note events.
    #[error("header events must precede note events")]
    HeaderAfterNotes,

    /// The key's scale has too few non-diminished degrees for the
    /// progression's rejection sampling to terminate.
    #[error("scale for key '{key}' has fewer than three usable degrees")]
    DegenerateScale { key: String },

    /// A note name or key name failed to resolve.
    #[error(transparent)]
    Theory(#[from] TheoryError),

    /// MIDI file output failed.
    #[error("failed to write MIDI file: {0}")]
    Io(#[from] std::io::Error),
}
