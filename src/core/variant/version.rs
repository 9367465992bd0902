//=========================================================================
// Compatibility Class
//=========================================================================
//
// Chooses the executable-compatibility class and settles it against the
// inferred tier and mission.
//
// Resolution order:
//   1. explicit override, validated against GAME_VERSIONS (fatal on miss)
//   2. otherwise the first INFERENCE_RULES entry matching (mode, mission)
//
// Reconciliation then runs RECONCILE_RULES in order. The class always
// stands; only inferred facts move. A mission pinned by `--pack` is
// explicit and is left alone.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{GameMission, GameMode, GameVersion, MissionSource};
use crate::error::EngineError;

//=== Version Table =======================================================

/// One row of the compatibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionEntry {
    pub description: &'static str,
    pub cmdline: &'static str,
    pub version: GameVersion,
}

/// Every class `--gameversion` accepts, oldest first.
pub const GAME_VERSIONS: [VersionEntry; 9] = [
    VersionEntry { description: "Doom 1.666", cmdline: "1.666", version: GameVersion::Doom1666 },
    VersionEntry { description: "Doom 1.7/1.7a", cmdline: "1.7", version: GameVersion::Doom17 },
    VersionEntry { description: "Doom 1.8", cmdline: "1.8", version: GameVersion::Doom18 },
    VersionEntry { description: "Doom 1.9", cmdline: "1.9", version: GameVersion::Doom19 },
    VersionEntry { description: "Hacx", cmdline: "hacx", version: GameVersion::Hacx },
    VersionEntry { description: "Ultimate Doom", cmdline: "ultimate", version: GameVersion::Ultimate },
    VersionEntry { description: "Final Doom", cmdline: "final", version: GameVersion::Final },
    VersionEntry { description: "Final Doom (alt)", cmdline: "final2", version: GameVersion::Final2 },
    VersionEntry { description: "Chex Quest", cmdline: "chex", version: GameVersion::Chex },
];

//=== Inference Rules =====================================================

type InferenceRule = (fn(GameMode, GameMission) -> bool, GameVersion);

fn is_chex(_: GameMode, mission: GameMission) -> bool {
    mission == GameMission::Chex
}

fn is_hacx(_: GameMode, mission: GameMission) -> bool {
    mission == GameMission::Hacx
}

fn is_pre_retail(mode: GameMode, _: GameMission) -> bool {
    matches!(mode, GameMode::Shareware | GameMode::Registered)
}

fn is_retail(mode: GameMode, _: GameMission) -> bool {
    mode == GameMode::Retail
}

fn is_doom2(mode: GameMode, mission: GameMission) -> bool {
    mode == GameMode::Commercial && mission == GameMission::Doom2
}

fn is_commercial(mode: GameMode, _: GameMission) -> bool {
    mode == GameMode::Commercial
}

/// Priority table for inferring the class; first match wins.
const INFERENCE_RULES: [InferenceRule; 6] = [
    (is_chex, GameVersion::Chex),
    (is_hacx, GameVersion::Hacx),
    (is_pre_retail, GameVersion::Doom19),
    (is_retail, GameVersion::Ultimate),
    (is_doom2, GameVersion::Doom19),
    // Defaults to the first Final Doom executable, demo-loop crash included.
    (is_commercial, GameVersion::Final),
];

/// Infers the class from tier and mission.
pub fn infer_version(mode: GameMode, mission: GameMission) -> GameVersion {
    INFERENCE_RULES
        .iter()
        .find(|(applies, _)| applies(mode, mission))
        .map(|&(_, version)| version)
        .unwrap_or(GameVersion::Doom19)
}

/// Honors an explicit override or falls back to inference.
///
/// # Errors
///
/// [`EngineError::UnknownGameVersion`] if the override is not in the table.
pub fn resolve_version(
    requested: Option<&str>,
    mode: GameMode,
    mission: GameMission,
) -> Result<GameVersion, EngineError> {
    match requested {
        Some(given) => {
            let entry = GAME_VERSIONS
                .iter()
                .find(|entry| entry.cmdline.eq_ignore_ascii_case(given))
                .ok_or_else(|| EngineError::UnknownGameVersion {
                    given: given.to_string(),
                    valid: GAME_VERSIONS
                        .iter()
                        .map(|entry| entry.cmdline)
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;
            info!(target: "session::variant", "Emulating {}", entry.description);
            Ok(entry.version)
        }
        None => {
            let version = infer_version(mode, mission);
            debug!(target: "session::variant", "Inferred class {:?} for {:?}/{:?}", version, mode, mission);
            Ok(version)
        }
    }
}

//=== Reconciliation ======================================================

/// The three facts reconciliation settles against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub mode: GameMode,
    pub mission: GameMission,
    pub version: GameVersion,
}

type ReconcileRule = fn(Reconciled, MissionSource) -> Reconciled;

/// Executables before Ultimate have no fourth episode.
fn cap_episodic_tier(facts: Reconciled, _: MissionSource) -> Reconciled {
    if facts.version < GameVersion::Ultimate && facts.mode == GameMode::Retail {
        Reconciled { mode: GameMode::Registered, ..facts }
    } else {
        facts
    }
}

/// Executables before Final do not know the Final Doom packs.
fn cap_mission_pack(facts: Reconciled, source: MissionSource) -> Reconciled {
    if facts.version < GameVersion::Final
        && facts.mode == GameMode::Commercial
        && facts.mission.is_final_pack()
        && source != MissionSource::PackOverride
    {
        Reconciled { mission: GameMission::Doom2, ..facts }
    } else {
        facts
    }
}

/// Adjustments applied in order after the class is fixed.
const RECONCILE_RULES: [ReconcileRule; 2] = [cap_episodic_tier, cap_mission_pack];

/// Settles tier and mission against the compatibility class.
pub fn reconcile(facts: Reconciled, source: MissionSource) -> Reconciled {
    let settled = RECONCILE_RULES
        .iter()
        .fold(facts, |current, rule| rule(current, source));

    if settled != facts {
        info!(target: "session::variant", "Reconciled {:?} -> {:?}", facts, settled);
    }
    settled
}

//=========================================================================
// Unit Tests
//=========================================================================
