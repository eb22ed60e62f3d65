// ABOUTME: Enter/leave transitions and the completion events that drive toast removal
// A player runs one transition at a time and reports which one finished

use std::time::{Duration, Instant};

/// Which visual transition is (or was) playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Enter,
    Leave,
}

impl Transition {
    /// Class name the render layer applies while this transition plays.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Enter => "toast-enter",
            Self::Leave => "toast-leave",
        }
    }

    /// Ease-out for entry, ease-in for exit.
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Enter => 1.0 - (1.0 - t).powi(3),
            Self::Leave => t.powi(3),
        }
    }

    /// Horizontal offset in cells for a toast `width` wide, at `progress`.
    /// Entry slides in from off-screen left; exit slides past it.
    pub fn offset(self, width: u16, progress: f64) -> i32 {
        let width = f64::from(width);
        let eased = self.ease(progress);
        let offset = match self {
            Self::Enter => -width * (1.0 - eased),
            Self::Leave => -(width * 1.15) * eased,
        };
        offset.round() as i32
    }
}

/// Origin of an animation-completion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSource {
    Toast(Transition),
    /// Some other animation inside the toast region (e.g. a spinner).
    Other,
}

/// Fired by the render layer when an animation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationEnd {
    pub source: AnimationSource,
}

impl AnimationEnd {
    pub const fn of(transition: Transition) -> Self {
        Self {
            source: AnimationSource::Toast(transition),
        }
    }

    pub const fn unrelated() -> Self {
        Self {
            source: AnimationSource::Other,
        }
    }

    pub fn is(&self, transition: Transition) -> bool {
        self.source == AnimationSource::Toast(transition)
    }
}

/// Plays one transition for a fixed duration and yields its completion
/// event exactly once.
#[derive(Debug, Clone)]
pub struct TransitionPlayer {
    transition: Transition,
    started_at: Instant,
    duration: Duration,
    finished: bool,
}

impl TransitionPlayer {
    pub fn start(transition: Transition, duration: Duration, now: Instant) -> Self {
        Self {
            transition,
            started_at: now,
            duration,
            finished: false,
        }
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the completion event the first time `now` reaches the end.
    pub fn poll(&mut self, now: Instant) -> Option<AnimationEnd> {
        if self.finished || self.progress(now) < 1.0 {
            return None;
        }
        self.finished = true;
        Some(AnimationEnd::of(self.transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_fires_once_after_duration() {
        let start = Instant::now();
        let mut player = TransitionPlayer::start(Transition::Leave, Duration::from_millis(300), start);

        assert_eq!(player.poll(start + Duration::from_millis(100)), None);
        assert_eq!(
            player.poll(start + Duration::from_millis(300)),
            Some(AnimationEnd::of(Transition::Leave))
        );
        assert_eq!(player.poll(start + Duration::from_millis(600)), None);
        assert!(player.is_finished());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let start = Instant::now();
        let mut player = TransitionPlayer::start(Transition::Enter, Duration::ZERO, start);
        assert!(player.poll(start).is_some_and(|end| end.is(Transition::Enter)));
    }

    #[test]
    fn test_offsets_at_endpoints() {
        assert_eq!(Transition::Enter.offset(40, 0.0), -40);
        assert_eq!(Transition::Enter.offset(40, 1.0), 0);
        assert_eq!(Transition::Leave.offset(40, 0.0), 0);
        assert_eq!(Transition::Leave.offset(40, 1.0), -46);
    }

    #[test]
    fn test_unrelated_end_matches_no_transition() {
        let end = AnimationEnd::unrelated();
        assert!(!end.is(Transition::Enter));
        assert!(!end.is(Transition::Leave));
    }
}
