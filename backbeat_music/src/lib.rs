// Backbeat Music Generator
//
// A procedural song generator that produces short pieces — a drum pattern,
// a diatonic chord progression, and a one-note-per-beat melody — and writes
// them as a multi-track Standard MIDI File. Everything is driven by a single
// seeded RNG, so the same seed always yields the same song.
//
// Architecture:
// - event.rs: SoundEvent/ChordGroup — the delta-time event model; a chord is
//   a group of sounds whose on-events all fire together and whose off-events
//   all fire together, collapsed onto one linear delta-encoded stream
// - chord.rs: Triad shapes (parameterized interval pairs) with inversions,
//   plus explicit pitch-list groups for drum hits and melody notes
// - timeline.rs: Track and Song — append-only message lists with monotonic
//   identities and header-before-notes ordering
// - meta.rs: Piece metadata sampling (key, tempo, time signature)
// - progression.rs: Tick-budgeted chord progression under adjacency and
//   quality constraints
// - drums.rs: Tempo-subdivided kick/snare/hat pattern
// - melody.rs: Chord-tracking quarter-note melody
// - instrument.rs: Orchestration — generator output -> chord groups -> tracks
// - midi.rs: Song -> Standard MIDI File via `midly`
//
// The generator is deterministic given a seed, supporting reproducible output.

pub mod chord;
pub mod drums;
pub mod error;
pub mod event;
pub mod instrument;
pub mod melody;
pub mod meta;
pub mod midi;
pub mod progression;
pub mod timeline;

pub use error::MusicError;

/// MIDI ticks per quarter-note beat (PPQ).
pub const TICKS_PER_BEAT: u32 = 480;

/// Note lengths in ticks.
pub const WHOLE_NOTE: u32 = TICKS_PER_BEAT * 4;
pub const HALF_NOTE: u32 = TICKS_PER_BEAT * 2;
pub const QUARTER_NOTE: u32 = TICKS_PER_BEAT;
pub const EIGHTH_NOTE: u32 = TICKS_PER_BEAT / 2;
pub const SIXTEENTH_NOTE: u32 = TICKS_PER_BEAT / 4;

/// The shared tick budget every generator fills: one piece is
/// `beats_per_bar * bar_count` beats long.
pub fn tick_budget(beats_per_bar: u8, bar_count: u32) -> u32 {
    TICKS_PER_BEAT * beats_per_bar as u32 * bar_count
}
