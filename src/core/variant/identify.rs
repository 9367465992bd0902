//=========================================================================
// Mission and Tier Identification
//=========================================================================
//
// Ordered rule tables for the first two resolution stages.
//
// Mission: a known IWAD file name pins it; otherwise the catalog is
// scanned in directory order and the first generation marker decides.
// Tier: episodic content is probed for the highest episode marker,
// highest first; mapped content is always commercial.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{GameMission, GameMode, Generation, MissionSource};
use crate::core::catalog::{lump_names_equal, AssetCatalog};
use crate::error::EngineError;

//=== Rule Tables =========================================================

/// Known IWAD file names and the mission each one pins.
const IWAD_FILENAMES: [(&str, GameMission); 10] = [
    ("doom2.wad", GameMission::Doom2),
    ("plutonia.wad", GameMission::Plutonia),
    ("tnt.wad", GameMission::Tnt),
    ("doom.wad", GameMission::Doom),
    ("doom1.wad", GameMission::Doom),
    ("chex.wad", GameMission::Chex),
    ("hacx.wad", GameMission::Hacx),
    ("freedm.wad", GameMission::Doom2),
    ("freedoom2.wad", GameMission::Doom2),
    ("freedoom1.wad", GameMission::Doom),
];

/// Level names whose presence reveals the engine generation.
const GENERATION_MARKERS: [(&str, GameMission); 2] = [
    ("MAP01", GameMission::Doom2),
    ("E1M1", GameMission::Doom),
];

/// Episodic tier probes, most content first. `None` always matches.
const EPISODIC_TIERS: [(Option<&str>, GameMode); 3] = [
    (Some("E4M1"), GameMode::Retail),
    (Some("E3M1"), GameMode::Registered),
    (None, GameMode::Shareware),
];

/// Names accepted by `--pack`.
const MISSION_PACKS: [(&str, GameMission); 3] = [
    ("doom2", GameMission::Doom2),
    ("tnt", GameMission::Tnt),
    ("plutonia", GameMission::Plutonia),
];

//=== Mission =============================================================

/// Matches an IWAD path against the known file names (case-insensitive).
pub fn mission_for_iwad_filename(path: &str) -> Option<GameMission> {
    let file_name = Path::new(path).file_name()?.to_str()?;
    IWAD_FILENAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(file_name))
        .map(|&(_, mission)| mission)
}

/// Maps a `--pack` name to its mission.
///
/// # Errors
///
/// [`EngineError::UnknownMissionPack`] if the name is not in the table.
pub fn mission_for_pack_name(name: &str) -> Result<GameMission, EngineError> {
    MISSION_PACKS
        .iter()
        .find(|(pack, _)| pack.eq_ignore_ascii_case(name))
        .map(|&(_, mission)| mission)
        .ok_or_else(|| EngineError::UnknownMissionPack(name.to_string()))
}

/// Determines the mission, honoring a pinned value first.
///
/// # Errors
///
/// [`EngineError::UnrecognizedContent`] if nothing is pinned and the
/// catalog holds no generation marker.
pub fn identify_mission(
    catalog: &dyn AssetCatalog,
    pinned: Option<GameMission>,
) -> Result<(GameMission, MissionSource), EngineError> {
    if let Some(mission) = pinned {
        debug!(target: "session::variant", "Mission {:?} pinned by IWAD file name", mission);
        return Ok((mission, MissionSource::Filename));
    }

    for name in catalog.names() {
        let hit = GENERATION_MARKERS
            .iter()
            .find(|(marker, _)| lump_names_equal(name, marker));

        if let Some(&(marker, mission)) = hit {
            debug!(target: "session::variant", "Found generation marker {} -> {:?}", marker, mission);
            return Ok((mission, MissionSource::Content));
        }
    }

    Err(EngineError::UnrecognizedContent)
}

//=== Tier ================================================================

/// Determines the content tier for a mission.
pub fn identify_mode(catalog: &dyn AssetCatalog, mission: GameMission) -> GameMode {
    if mission.generation() == Generation::Mapped {
        return GameMode::Commercial;
    }

    EPISODIC_TIERS
        .iter()
        .find(|(marker, _)| marker.map_or(true, |m| catalog.contains(m)))
        .map(|&(_, mode)| mode)
        .unwrap_or(GameMode::Shareware)
}

//=========================================================================
// Unit Tests
//=========================================================================
