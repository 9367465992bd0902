//=========================================================================
// Launch Plan
//=========================================================================
//
// Decides how the session starts, from the parameters and the resolved
// variant.
//
// Start path precedence:
//   1. --playdemo      single demo, then quit
//   2. --timedemo      timed demo
//   3. --loadgame      saved game
//   4. autostart       any of --skill/--episode/--warp/--record, or a
//                      network game: straight into a level
//   5. otherwise       title / attract mode
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::StartupParams;
use crate::core::variant::{GameMode, GameVariant};

//=== Skill ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Skill {
    Baby,
    Easy,
    #[default]
    Medium,
    Hard,
    Nightmare,
}

impl Skill {
    /// Maps the 1-based command-line number to a skill.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Baby),
            2 => Some(Self::Easy),
            3 => Some(Self::Medium),
            4 => Some(Self::Hard),
            5 => Some(Self::Nightmare),
            _ => None,
        }
    }
}

//=== StartPath ===========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPath {
    PlayDemo(String),
    TimeDemo(String),
    LoadGame(u8),
    NewGame { skill: Skill, episode: u8, map: u8 },
    Title,
}

//=== LaunchPlan ==========================================================

/// Everything the startup path needs to enter the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub start: StartPath,
    /// Demo to record, started before the first tic.
    pub record: Option<String>,
    /// Level time limit in minutes.
    pub time_limit: Option<u32>,
}

impl LaunchPlan {
    /// Builds the plan. Selectors the variant cannot honor are ignored.
    pub fn new(params: &StartupParams, variant: &GameVariant, netgame: bool) -> Self {
        let mut skill = Skill::default();
        let mut episode = 1;
        let mut map = 1;
        let mut autostart = false;

        //--- Skill --------------------------------------------------------
        if let Some(n) = params.skill {
            match Skill::from_number(n) {
                Some(s) => {
                    skill = s;
                    autostart = true;
                }
                None => warn!(target: "session::loop", "Ignoring invalid skill {}", n),
            }
        }

        //--- Episode ------------------------------------------------------
        if let Some(e) = params.episode {
            if variant.is_valid_episode(e) {
                episode = e;
                map = 1;
                autostart = true;
            } else {
                warn!(target: "session::loop", "Episode {} not available in {:?}", e, variant.mode);
            }
        }

        //--- Warp ---------------------------------------------------------
        if let Some(&first) = params.warp.first() {
            let (e, m) = if variant.mode == GameMode::Commercial {
                (1, first)
            } else {
                (first, params.warp.get(1).copied().unwrap_or(1))
            };

            if variant.is_valid_level(e, m) {
                episode = e;
                map = m;
                autostart = true;
            } else {
                warn!(target: "session::loop", "Ignoring warp to {:?}: no such level", params.warp);
            }
        }

        if params.record.is_some() {
            autostart = true;
        }

        //--- Start path ---------------------------------------------------
        let start = if let Some(name) = &params.playdemo {
            StartPath::PlayDemo(name.clone())
        } else if let Some(name) = &params.timedemo {
            StartPath::TimeDemo(name.clone())
        } else if let Some(slot) = params.loadgame {
            StartPath::LoadGame(slot)
        } else if autostart || netgame {
            StartPath::NewGame { skill, episode, map }
        } else {
            StartPath::Title
        };

        info!(target: "session::loop", "Start path: {:?}", start);

        Self {
            start,
            record: params.record.clone(),
            time_limit: params.time_limit(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
