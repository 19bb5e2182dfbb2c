//! HonorRoll: champion, runner-up and third place of a tournament.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HonorRoll {
    pub champion: Option<TeamId>,
    pub runner_up: Option<TeamId>,
    pub third_place: Option<TeamId>,
}

/// One podium position.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HonorPosition {
    Champion,
    RunnerUp,
    ThirdPlace,
}

impl HonorRoll {
    pub const POSITIONS: [HonorPosition; 3] = [
        HonorPosition::Champion,
        HonorPosition::RunnerUp,
        HonorPosition::ThirdPlace,
    ];

    pub fn get(&self, position: HonorPosition) -> Option<TeamId> {
        match position {
            HonorPosition::Champion => self.champion,
            HonorPosition::RunnerUp => self.runner_up,
            HonorPosition::ThirdPlace => self.third_place,
        }
    }

    pub fn set(&mut self, position: HonorPosition, team: Option<TeamId>) {
        match position {
            HonorPosition::Champion => self.champion = team,
            HonorPosition::RunnerUp => self.runner_up = team,
            HonorPosition::ThirdPlace => self.third_place = team,
        }
    }
}
