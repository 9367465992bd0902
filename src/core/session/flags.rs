//=========================================================================
// Session Flags
//=========================================================================
//
// Process-wide switches set once from the startup parameters.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::StartupParams;

//=== Constants ===========================================================

/// Accepted turbo range in percent, inclusive.
pub const TURBO_MIN: i32 = 10;
pub const TURBO_MAX: i32 = 400;

/// Base forward speeds (walk, run).
pub const FORWARD_MOVE: [i32; 2] = [0x19, 0x32];

/// Base strafe speeds (walk, run).
pub const SIDE_MOVE: [i32; 2] = [0x18, 0x28];

//=== Deathmatch ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deathmatch {
    #[default]
    Off,
    /// Items stay taken.
    Classic,
    /// Items respawn.
    AltDeath,
}

//=== SessionFlags ========================================================

/// Switches read throughout the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    pub devparm: bool,
    pub nomonsters: bool,
    pub respawn: bool,
    pub fast: bool,
    /// Quit once the single requested demo ends.
    pub singledemo: bool,
    /// Clamped turbo percentage, `None` when not requested.
    pub turbo: Option<i32>,
    pub deathmatch: Deathmatch,
}

impl SessionFlags {
    pub fn from_params(params: &StartupParams) -> Self {
        let deathmatch = if params.altdeath {
            Deathmatch::AltDeath
        } else if params.deathmatch {
            Deathmatch::Classic
        } else {
            Deathmatch::Off
        };

        let turbo = params.turbo.map(clamp_turbo);
        if let Some(scale) = turbo {
            info!(target: "session::loop", "turbo scale: {}%", scale);
        }

        Self {
            devparm: params.devparm,
            nomonsters: params.nomonsters,
            respawn: params.respawn,
            fast: params.fast,
            singledemo: params.playdemo.is_some(),
            turbo,
            deathmatch,
        }
    }

    /// Movement speeds with the turbo scale applied.
    pub fn move_speeds(&self) -> MoveSpeeds {
        match self.turbo {
            Some(scale) => MoveSpeeds::BASE.scaled(scale),
            None => MoveSpeeds::BASE,
        }
    }
}

//=== Turbo ===============================================================

/// Clamps a requested turbo percentage into `[10, 400]`.
pub fn clamp_turbo(scale: i32) -> i32 {
    scale.clamp(TURBO_MIN, TURBO_MAX)
}

//=== MoveSpeeds ==========================================================

/// Player movement multipliers handed to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSpeeds {
    pub forward: [i32; 2],
    pub side: [i32; 2],
}

impl MoveSpeeds {
    pub const BASE: Self = Self {
        forward: FORWARD_MOVE,
        side: SIDE_MOVE,
    };

    /// Scales by a percentage, clamping it first.
    pub fn scaled(self, scale: i32) -> Self {
        let scale = clamp_turbo(scale);
        Self {
            forward: self.forward.map(|v| v * scale / 100),
            side: self.side.map(|v| v * scale / 100),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
