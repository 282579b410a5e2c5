// Shared music-theory lookup crate for the backbeat generator.
//
// Provides the two pure, table-driven collaborators the music crate leans on:
// note-name resolution (spelled pitch -> MIDI number) and diatonic scale
// lookup (key name -> seven scale degrees with harmonic qualities).
//
// Architecture:
// - `pitch.rs`: `PitchSpec` and the enharmonic spelling table
// - `scale.rs`: `Quality`, `ScaleDegree`, and the key -> degrees mapping
// - `lib.rs` (this file): crate-root re-exports
//
// Determinism constraint: this crate is pure lookup. No randomness, no
// system state — every function returns the same output for the same input.

pub mod pitch;
pub mod scale;

// Re-export key types at crate root for convenience.
pub use pitch::{OCTAVE, PitchSpec};
pub use scale::{KEY_LETTERS, MODE_SUFFIXES, Quality, ScaleDegree, scale};

use thiserror::Error;

/// Errors from the pitch and scale lookup tables.
///
/// Both lookups are total over their fixed tables; anything outside the
/// table is an error, never a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// A note string whose letter/accidental portion is not in the
    /// enharmonic table, or whose octave digit is missing.
    #[error("unrecognized note name '{0}'")]
    UnknownNoteName(String),

    /// A key name that does not parse as natural letter + optional 'm'.
    #[error("unrecognized key '{0}'")]
    UnknownKey(String),
}
