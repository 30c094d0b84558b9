//! One-shot cues raised during an update pass.
//!
//! Entities push events into the context; the driver drains them after the
//! update and hands them to a [`CueSink`]. Playback is fire-and-forget.

/// Something noteworthy that happened this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Collided,
    /// Score crossed another multiple of 100 (the milestone index).
    Milestone(u32),
    NewHighScore(u64),
    Restarted,
}

/// Plays audible (or otherwise) cues. Implementations swallow their failures.
pub trait CueSink {
    fn play(&mut self, event: GameEvent);
}

