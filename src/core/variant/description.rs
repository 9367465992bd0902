//=========================================================================
// Game Description and Banner
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{GameMission, GameMode, GameVersion};
use crate::core::catalog::AssetCatalog;

//=== Description =========================================================

/// Human-readable title of the content.
///
/// Freedoom content is detected by its marker lumps and named as such;
/// everything else is named by tier (episodic) or mission (mapped).
pub fn describe(catalog: &dyn AssetCatalog, mode: GameMode, mission: GameMission) -> String {
    let is_freedoom = catalog.contains("FREEDOOM");
    let is_freedm = catalog.contains("FREEDM");

    let name = match mission {
        GameMission::Chex => "Chex Quest",
        GameMission::Hacx => "HACX",
        GameMission::Doom if is_freedoom => "Freedoom: Phase 1",
        GameMission::Doom => match mode {
            GameMode::Retail => "The Ultimate DOOM",
            GameMode::Registered => "DOOM Registered",
            GameMode::Shareware => "DOOM Shareware",
            GameMode::Commercial => "Unknown",
        },
        _ if is_freedoom && is_freedm => "FreeDM",
        _ if is_freedoom => "Freedoom: Phase 2",
        GameMission::Doom2 => "DOOM 2: Hell on Earth",
        GameMission::Plutonia => "DOOM 2: Plutonia Experiment",
        GameMission::Tnt => "DOOM 2: TNT - Evilution",
    };

    name.to_string()
}

//=== Banner ==============================================================

/// Startup banner line, e.g. "DOOM Registered Startup v1.9".
pub fn banner(mode: GameMode, mission: GameMission, version: GameVersion) -> String {
    let code = version.version_code();
    let number = format!("v{}.{}", code / 100, code % 100);

    let title = match (mission, mode) {
        (GameMission::Tnt, _) => "DOOM 2: TNT - Evilution",
        (GameMission::Plutonia, _) => "DOOM 2: Plutonia Experiment",
        (GameMission::Chex, _) => "Chex Quest Startup",
        (GameMission::Hacx, _) => "HACX Startup",
        (_, GameMode::Commercial) => "DOOM 2: Hell on Earth",
        (_, GameMode::Retail) => "The Ultimate DOOM Startup",
        (_, GameMode::Registered) => "DOOM Registered Startup",
        (_, GameMode::Shareware) => "DOOM Shareware Startup",
    };

    format!("{} {}", title, number)
}

//=========================================================================
// Unit Tests
//=========================================================================
