//! Gameplay constants, overridable from the host as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("tuning data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning field `{field}` is out of range: {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Every number that shapes how a shot feels.
/// Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal deceleration while rolling (units/s²).
    pub ground_drag: f32,
    /// Deceleration on both axes while airborne.
    pub air_drag: f32,
    /// Horizontal deceleration on a bouncing contact.
    pub bounce_drag: f32,
    /// Vertical speed above which a ground contact counts as a bounce.
    pub bounce_threshold: f32,
    /// Launch speed per unit of pull-back distance.
    pub power_multiplier: f32,
    pub max_power: f32,
    /// Seconds the ball must stay inside the cup.
    pub goal_dwell_secs: f32,
    /// World gravity (Y down).
    pub gravity: f32,
    /// Extra gravity on the ball, as a multiple of world gravity.
    pub ball_gravity_scale: f32,
    pub ball_radius: f32,
    pub ball_restitution: f32,
    /// Chosen so a default ball weighs about 1.2.
    pub ball_density: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_drag: 200.0,
            air_drag: 10.0,
            bounce_drag: 500.0,
            bounce_threshold: 5.0,
            power_multiplier: 1.8,
            max_power: 1000.0,
            goal_dwell_secs: 0.7,
            gravity: 500.0,
            ball_gravity_scale: 2.0,
            ball_radius: 10.0,
            ball_restitution: 0.4,
            ball_density: 1.2 / (std::f32::consts::PI * 100.0),
        }
    }
}

impl Tuning {
    /// Parse and validate. Fields left out keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Every field finite; rates, limits and times never negative; the ball
    /// has a real size and mass.
    pub fn validate(&self) -> Result<(), TuningError> {
        let non_negative = [
            ("ground_drag", self.ground_drag),
            ("air_drag", self.air_drag),
            ("bounce_drag", self.bounce_drag),
            ("bounce_threshold", self.bounce_threshold),
            ("power_multiplier", self.power_multiplier),
            ("max_power", self.max_power),
            ("goal_dwell_secs", self.goal_dwell_secs),
            ("ball_restitution", self.ball_restitution),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid { field, value });
            }
        }
        let positive = [
            ("ball_radius", self.ball_radius),
            ("ball_density", self.ball_density),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid { field, value });
            }
        }
        // Gravity may point either way
        let finite = [
            ("gravity", self.gravity),
            ("ball_gravity_scale", self.ball_gravity_scale),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"max_power": 600, "goal_dwell_secs": 1.0}"#).unwrap();
        assert_eq!(tuning.max_power, 600.0);
        assert_eq!(tuning.goal_dwell_secs, 1.0);
        assert_eq!(tuning.ground_drag, 200.0);
        assert_eq!(tuning.bounce_threshold, 5.0);
    }

    #[test]
    fn default_ball_mass_is_about_1_2() {
        let t = Tuning::default();
        let mass = t.ball_density * std::f32::consts::PI * t.ball_radius * t.ball_radius;
        assert!((mass - 1.2).abs() < 1e-4, "mass={}", mass);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let wrong_type = Tuning::from_json(r#"{"max_power": "lots"}"#);
        assert!(matches!(wrong_type, Err(TuningError::Parse(_))));
        assert!(matches!(Tuning::from_json("not json"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn negative_max_power_is_rejected() {
        match Tuning::from_json(r#"{"max_power": -1}"#) {
            Err(TuningError::Invalid { field, value }) => {
                assert_eq!(field, "max_power");
                assert_eq!(value, -1.0);
            }
            other => panic!("expected max_power rejection, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        assert!(Tuning::default().validate().is_ok());
        let bad = [
            Tuning { max_power: f32::NAN, ..Tuning::default() },
            Tuning { ground_drag: -200.0, ..Tuning::default() },
            Tuning { goal_dwell_secs: -0.1, ..Tuning::default() },
            Tuning { ball_radius: 0.0, ..Tuning::default() },
            Tuning { ball_density: -1.0, ..Tuning::default() },
            Tuning { gravity: f32::INFINITY, ..Tuning::default() },
        ];
        for tuning in bad {
            assert!(tuning.validate().is_err(), "accepted {:?}", tuning);
        }
    }

    #[test]
    fn zero_limits_are_allowed() {
        let json = r#"{"max_power": 0, "goal_dwell_secs": 0, "gravity": -500}"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.max_power, 0.0);
    }
}
