//! Input Capture and Recording
//!
//! One `InputFrame` per tick is everything the player contributes to the
//! simulation. Frames are recorded delta-compressed so a session can be
//! replayed from its seed.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Raw input state for a single frame.
///
/// Direction bits are level-triggered (held keys). `FIRE` is
/// edge-triggered: set only on the frame the fire key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InputFrame {
    /// Packed flag bits (see the `UP`..`FIRE` constants)
    pub flags: u8,
}

impl InputFrame {
    /// Size in bytes
    pub const SIZE: usize = 1;

    /// Move up (towards y = 0)
    pub const UP: u8 = 0x01;
    /// Move down
    pub const DOWN: u8 = 0x02;
    /// Move left
    pub const LEFT: u8 = 0x04;
    /// Move right
    pub const RIGHT: u8 = 0x08;
    /// Fire pressed this frame
    pub const FIRE: u8 = 0x10;

    const DIRECTIONS: u8 = Self::UP | Self::DOWN | Self::LEFT | Self::RIGHT;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flag bits.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Check a single flag.
    #[inline]
    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, pressed: bool) {
        if pressed {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Builder form of `set`.
    #[inline]
    pub fn with(mut self, flag: u8) -> Self {
        self.set(flag, true);
        self
    }

    #[inline]
    pub fn up(&self) -> bool {
        self.has(Self::UP)
    }

    #[inline]
    pub fn down(&self) -> bool {
        self.has(Self::DOWN)
    }

    #[inline]
    pub fn left(&self) -> bool {
        self.has(Self::LEFT)
    }

    #[inline]
    pub fn right(&self) -> bool {
        self.has(Self::RIGHT)
    }

    /// Check if fire was pressed this frame.
    #[inline]
    pub fn fire_pressed(&self) -> bool {
        self.has(Self::FIRE)
    }

    /// Check if any direction is held.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.flags & Self::DIRECTIONS != 0
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }
}

/// Delta-compressed input entry.
///
/// Only stored when input CHANGES (not every tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Frame when this input state began
    pub frame: u64,
    /// The new input state
    pub input: InputFrame,
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Complete input recording for one session.
///
/// Together with the seed this is enough to reproduce the session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed used for this session
    pub seed: u64,

    /// Number of recorded frames
    pub frame_count: u64,

    deltas: Vec<InputDelta>,

    #[serde(skip)]
    last_input: InputFrame,
}

impl InputRecording {
    /// Create an empty recording for a session seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frame_count: 0,
            deltas: Vec::with_capacity(256),
            last_input: InputFrame::new(),
        }
    }

    /// Append the input for the next frame.
    ///
    /// Only stored if input changed from previous frame.
    pub fn record(&mut self, input: InputFrame) {
        if input != self.last_input {
            self.deltas.push(InputDelta {
                frame: self.frame_count,
                input,
            });
            self.last_input = input;
        }
        self.frame_count += 1;
    }

    /// Get input at a specific frame.
    pub fn input_at(&self, frame: u64) -> InputFrame {
        // Last delta at or before this frame
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// Get all deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Iterate every recorded frame in order.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            frame: 0,
            delta_idx: 0,
            current: InputFrame::new(),
        }
    }

    /// Digest of the seed and every recorded frame.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_log();
        hasher.update_u64(self.seed);
        hasher.update_u64(self.frame_count);
        for (_, input) in self.replay_iter() {
            hasher.update_u8(input.flags);
        }
        hasher.finalize()
    }
}

/// Iterator for replaying inputs frame-by-frame.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    frame: u64,
    delta_idx: usize,
    current: InputFrame,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u64, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.recording.frame_count {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.frame > self.frame {
                break;
            }
            self.current = delta.input;
            self.delta_idx += 1;
        }

        let result = (self.frame, self.current);
        self.frame += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut input = InputFrame::new();
        assert!(input.is_idle());
        assert!(!input.is_moving());

        input.set(InputFrame::UP, true);
        input.set(InputFrame::FIRE, true);
        assert!(input.up());
        assert!(input.fire_pressed());
        assert!(input.is_moving());
        assert!(!input.down());

        input.set(InputFrame::UP, false);
        assert!(!input.is_moving());
        assert!(!input.is_idle());
    }

    #[test]
    fn test_fire_alone_is_not_moving() {
        let input = InputFrame::new().with(InputFrame::FIRE);
        assert!(!input.is_moving());
        assert!(input.fire_pressed());
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut rec = InputRecording::new(7);
        let right = InputFrame::new().with(InputFrame::RIGHT);

        for _ in 0..10 {
            rec.record(right);
        }
        rec.record(InputFrame::new());

        // Only two changes stored
        assert_eq!(rec.deltas().len(), 2);
        assert_eq!(rec.frame_count, 11);
        assert_eq!(rec.input_at(0), right);
        assert_eq!(rec.input_at(9), right);
        assert_eq!(rec.input_at(10), InputFrame::new());
    }

    #[test]
    fn test_replay_iter_matches_recorded() {
        let frames = [
            InputFrame::new(),
            InputFrame::new().with(InputFrame::UP),
            InputFrame::new().with(InputFrame::UP).with(InputFrame::FIRE),
            InputFrame::new().with(InputFrame::UP),
            InputFrame::new(),
        ];

        let mut rec = InputRecording::new(1);
        for f in frames {
            rec.record(f);
        }

        let replayed: Vec<InputFrame> = rec.replay_iter().map(|(_, f)| f).collect();
        assert_eq!(replayed, frames.to_vec());
    }

    #[test]
    fn test_recording_hash() {
        let mut a = InputRecording::new(99);
        let mut b = InputRecording::new(99);
        for i in 0..30u8 {
            a.record(InputFrame::from_flags(i % 4));
            b.record(InputFrame::from_flags(i % 4));
        }
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.record(InputFrame::new());
        assert_ne!(a.compute_hash(), b.compute_hash());
    }
}
