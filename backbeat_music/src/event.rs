// The delta-time event model: sounds and chord groups.
//
// A SoundEvent is one pitched sound, carried as a start half (delta since
// the previous event on the track) and a release half attached later once
// the sounding length is known. A ChordGroup is an ordered set of sounds
// that attack together and release together.
//
// The collapsing rule is the contract everything downstream depends on:
// when a group is expanded onto a track, all on-events precede all
// off-events, only the first on-event carries the caller's lead-in delta
// (the rest carry 0, true simultaneity), and only the first off-event
// carries the sounding length (the rest carry 0). That keeps musically
// simultaneous attacks and releases representable on a single linear
// delta-encoded stream.

use crate::error::MusicError;

/// One pitched sound: an on-event plus an optionally attached off-event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundEvent {
    /// MIDI note number.
    pub pitch: u8,
    /// Attack velocity (0-127).
    pub velocity: u8,
    /// Ticks since the previous event on the track (the on-half's delta).
    pub start_delta: u32,
    release_delta: Option<u32>,
}

impl SoundEvent {
    pub fn new(pitch: u8, velocity: u8, start_delta: u32) -> Self {
        SoundEvent {
            pitch,
            velocity,
            start_delta,
            release_delta: None,
        }
    }

    /// Attach the release half with the given delta. Exactly one release
    /// may be attached per sound.
    pub fn attach_release(&mut self, delta: u32) -> Result<(), MusicError> {
        if self.release_delta.is_some() {
            return Err(MusicError::ReleaseAlreadyAttached);
        }
        self.release_delta = Some(delta);
        Ok(())
    }

    /// The off-half's delta, if a release has been attached.
    pub fn release_delta(&self) -> Option<u32> {
        self.release_delta
    }
}

/// An ordered group of sounds that start together and end together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordGroup {
    sounds: Vec<SoundEvent>,
}

impl ChordGroup {
    /// Build a group from resolved pitches in order. Only the first sound
    /// carries `lead_in` as its start delta; the rest carry 0.
    pub fn new(pitches: &[u8], velocity: u8, lead_in: u32) -> Result<Self, MusicError> {
        if pitches.is_empty() {
            return Err(MusicError::EmptyChord);
        }
        let sounds = pitches
            .iter()
            .enumerate()
            .map(|(i, &pitch)| {
                let delta = if i == 0 { lead_in } else { 0 };
                SoundEvent::new(pitch, velocity, delta)
            })
            .collect();
        Ok(ChordGroup { sounds })
    }

    /// Attach the group's release: the first sound's off-event carries the
    /// sounding length, the rest carry 0. Fails if any sound already has a
    /// release attached.
    pub fn attach_release(&mut self, length: u32) -> Result<(), MusicError> {
        for (i, sound) in self.sounds.iter_mut().enumerate() {
            let delta = if i == 0 { length } else { 0 };
            sound.attach_release(delta)?;
        }
        Ok(())
    }

    /// The group's sounds in order.
    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    /// Number of sounds in the group.
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// Always false: empty groups are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}
