//! Locomotion states and their capabilities

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CharacterError;

/// Movement speeds per state, in world units per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionSpeeds {
    pub walk: f32,
    pub run: f32,
    pub crouch: f32,
}

impl Default for LocomotionSpeeds {
    fn default() -> Self {
        Self {
            walk: 3.0,
            run: 6.0,
            crouch: 1.5,
        }
    }
}

impl LocomotionSpeeds {
    /// All speeds must be non-negative and running must beat walking
    pub fn validate(&self) -> Result<(), CharacterError> {
        let speeds = [self.walk, self.run, self.crouch];
        if speeds.iter().any(|s| s.is_nan() || *s < 0.0) {
            return Err(CharacterError::InvalidSpeeds(format!(
                "speeds must be non-negative, got {self:?}"
            )));
        }
        if self.run <= self.walk {
            return Err(CharacterError::InvalidSpeeds(format!(
                "run speed {} must exceed walk speed {}",
                self.run, self.walk
            )));
        }
        Ok(())
    }
}

/// The active movement mode of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocomotionState {
    #[default]
    Idle,
    Walk,
    Run,
    Crouch,
}

impl LocomotionState {
    pub const fn can_move(self) -> bool {
        true
    }

    pub const fn can_jump(self) -> bool {
        !matches!(self, LocomotionState::Crouch)
    }

    pub const fn can_crouch(self) -> bool {
        true
    }

    pub fn move_speed(self, speeds: &LocomotionSpeeds) -> f32 {
        match self {
            LocomotionState::Idle => 0.0,
            LocomotionState::Walk => speeds.walk,
            LocomotionState::Run => speeds.run,
            LocomotionState::Crouch => speeds.crouch,
        }
    }

    /// State picked from movement input alone
    pub fn from_input(horizontal: f32, sprint: bool) -> Self {
        if horizontal == 0.0 {
            LocomotionState::Idle
        } else if sprint {
            LocomotionState::Run
        } else {
            LocomotionState::Walk
        }
    }
}

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocomotionState::Idle => "idle",
            LocomotionState::Walk => "walk",
            LocomotionState::Run => "run",
            LocomotionState::Crouch => "crouch",
        };
        f.write_str(name)
    }
}

/// Current state plus the speeds it resolves against
#[derive(Debug, Clone)]
pub struct Locomotion {
    state: LocomotionState,
    speeds: LocomotionSpeeds,
}

impl Locomotion {
    pub fn new(speeds: LocomotionSpeeds) -> Result<Self, CharacterError> {
        speeds.validate()?;
        Ok(Self {
            state: LocomotionState::Idle,
            speeds,
        })
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn move_speed(&self) -> f32 {
        self.state.move_speed(&self.speeds)
    }

    /// Pick Idle/Walk/Run from input. Crouch is only left through [`Self::stand`].
    pub fn select(&mut self, horizontal: f32, sprint: bool) -> LocomotionState {
        if self.state != LocomotionState::Crouch {
            self.set(LocomotionState::from_input(horizontal, sprint));
        }
        self.state
    }

    pub fn enter_crouch(&mut self) {
        self.set(LocomotionState::Crouch);
    }

    pub fn stand(&mut self) {
        self.set(LocomotionState::Idle);
    }

    fn set(&mut self, next: LocomotionState) {
        if next != self.state {
            debug!("Locomotion {} -> {}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_can_move() {
        for state in [
            LocomotionState::Idle,
            LocomotionState::Walk,
            LocomotionState::Run,
            LocomotionState::Crouch,
        ] {
            assert!(state.can_move());
            assert!(state.can_crouch());
        }
        assert!(LocomotionState::Run.can_jump());
        assert!(!LocomotionState::Crouch.can_jump());
    }

    #[test]
    fn test_speed_ordering() {
        let speeds = LocomotionSpeeds::default();
        assert_eq!(LocomotionState::Idle.move_speed(&speeds), 0.0);
        assert!(LocomotionState::Run.move_speed(&speeds) > LocomotionState::Walk.move_speed(&speeds));
        assert!(LocomotionState::Crouch.move_speed(&speeds) > 0.0);
    }

    #[test]
    fn test_select_from_input() {
        let mut loco = Locomotion::new(LocomotionSpeeds::default()).unwrap();
        assert_eq!(loco.select(1.0, false), LocomotionState::Walk);
        assert_eq!(loco.select(-1.0, true), LocomotionState::Run);
        assert_eq!(loco.select(0.0, true), LocomotionState::Idle);
    }

    #[test]
    fn test_crouch_survives_selection() {
        let mut loco = Locomotion::new(LocomotionSpeeds::default()).unwrap();
        loco.enter_crouch();
        assert_eq!(loco.select(1.0, true), LocomotionState::Crouch);
        assert_eq!(loco.move_speed(), 1.5);

        loco.stand();
        assert_eq!(loco.select(1.0, true), LocomotionState::Run);
    }

    #[test]
    fn test_invalid_speeds() {
        let slow_run = LocomotionSpeeds {
            walk: 4.0,
            run: 3.0,
            crouch: 1.0,
        };
        assert!(Locomotion::new(slow_run).is_err());

        let negative = LocomotionSpeeds {
            crouch: -1.0,
            ..LocomotionSpeeds::default()
        };
        assert!(matches!(negative.validate(), Err(CharacterError::InvalidSpeeds(_))));
    }
}
