//! Goal dwell detection: the ball must stay in the cup for a continuous
//! stretch before the level counts as complete.

use glam::Vec2;
use putt_engine::Countdown;

use crate::level::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalState {
    Watching,
    Armed(Countdown),
    Complete,
}

/// What changed during a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSignal {
    None,
    Armed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone)]
pub struct GoalDwell {
    area: Rect,
    dwell_secs: f32,
    state: GoalState,
}

impl GoalDwell {
    pub fn new(area: Rect, dwell_secs: f32) -> Self {
        Self {
            area,
            dwell_secs,
            state: GoalState::Watching,
        }
    }

    pub fn state(&self) -> GoalState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == GoalState::Complete
    }

    /// Ball overlaps the sensor. Starts a fresh dwell unless one is
    /// already running or the goal is done.
    pub fn arm(&mut self) -> GoalSignal {
        match self.state {
            GoalState::Watching => {
                self.state = GoalState::Armed(Countdown::new(self.dwell_secs));
                GoalSignal::Armed
            }
            GoalState::Armed(_) | GoalState::Complete => GoalSignal::None,
        }
    }

    /// Once per tick. Leaving the area drops the dwell entirely; staying
    /// advances it until it completes, exactly once.
    pub fn poll(&mut self, ball: Vec2, dt: f32) -> GoalSignal {
        let GoalState::Armed(mut countdown) = self.state else {
            return GoalSignal::None;
        };
        if !self.area.contains(ball) {
            self.state = GoalState::Watching;
            return GoalSignal::Cancelled;
        }
        if countdown.tick(dt) {
            self.state = GoalState::Complete;
            return GoalSignal::Completed;
        }
        self.state = GoalState::Armed(countdown);
        GoalSignal::None
    }
}
