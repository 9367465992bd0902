//=========================================================================
// Variant Resolver
//=========================================================================
//
// Works out which game the loaded content is, once, at startup.
//
// Architecture:
// ```text
//   VariantHints ─┐
//                 ├─► identify_mission() ─► identify_mode() ─► apply_pack_override()
//   AssetCatalog ─┘                                                  │
//                                                                    ▼
//            GameVariant ◄── describe() ◄── reconcile() ◄── resolve_version()
// ```
//
// Every stage is an ordered rule table evaluated top to bottom (see
// `identify` and `version`). The result is immutable for the rest of the
// process and bounds the legal episode/map selectors.
//
//=========================================================================

//=== Module Declarations =================================================

mod description;
mod identify;
mod version;

//=== External Dependencies ===============================================

use std::fmt;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::catalog::AssetCatalog;
use crate::error::EngineError;

//=== Public API ==========================================================

pub use description::{banner, describe};
pub use identify::{identify_mission, identify_mode, mission_for_iwad_filename, mission_for_pack_name};
pub use version::{
    infer_version, reconcile, resolve_version, Reconciled, VersionEntry, GAME_VERSIONS,
};

//=== Generation ==========================================================

/// Engine generation, distinguished by how levels are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Levels named `ExMy`, grouped in episodes.
    Episodic,
    /// Levels named `MAPxx`, a single flat list.
    Mapped,
}

//=== GameMode ============================================================

/// Content completeness tier, ordered from least to most content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameMode {
    /// First episode only.
    Shareware,
    /// Three episodes.
    Registered,
    /// Four episodes.
    Retail,
    /// Mapped generation, 32 levels.
    Commercial,
}

//=== GameMission =========================================================

/// Mission identity of the content set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMission {
    Doom,
    Doom2,
    Tnt,
    Plutonia,
    Chex,
    Hacx,
}

impl GameMission {
    /// Level naming scheme of the mission.
    pub fn generation(self) -> Generation {
        match self {
            Self::Doom | Self::Chex => Generation::Episodic,
            Self::Doom2 | Self::Tnt | Self::Plutonia | Self::Hacx => Generation::Mapped,
        }
    }

    /// True for the two Final Doom mission packs.
    pub fn is_final_pack(self) -> bool {
        matches!(self, Self::Tnt | Self::Plutonia)
    }
}

//=== GameVersion =========================================================

/// Executable-compatibility class, ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameVersion {
    Doom1666,
    Doom17,
    Doom18,
    Doom19,
    Hacx,
    Ultimate,
    Final,
    Final2,
    Chex,
}

impl GameVersion {
    /// Version number as printed in startup banners (`109` is v1.9).
    pub fn version_code(self) -> u32 {
        match self {
            Self::Doom1666 => 106,
            Self::Doom17 => 107,
            Self::Doom18 => 108,
            _ => 109,
        }
    }

    /// Command-line spelling of the class.
    pub fn cmdline(self) -> &'static str {
        GAME_VERSIONS
            .iter()
            .find(|entry| entry.version == self)
            .map(|entry| entry.cmdline)
            .unwrap_or("1.9")
    }
}

//=== MissionSource =======================================================

/// Where the mission identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionSource {
    /// Matched against a known IWAD file name.
    Filename,
    /// Found by scanning the catalog for level markers.
    Content,
    /// Pinned by an explicit `--pack` selection.
    PackOverride,
}

//=== VariantHints ========================================================

/// Caller-supplied inputs that can pin or override parts of the variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantHints {
    /// File name (or path) of the main content archive.
    pub iwad_filename: Option<String>,
    /// Explicit mission pack (`doom2`, `tnt`, `plutonia`).
    pub mission_pack: Option<String>,
    /// Explicit compatibility class (`1.9`, `ultimate`, ...).
    pub game_version: Option<String>,
}

//=== GameVariant =========================================================

/// The resolved identity of the running content.
///
/// Built once by [`resolve`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameVariant {
    pub mission: GameMission,
    pub mode: GameMode,
    pub version: GameVersion,
    pub mission_source: MissionSource,
    /// Human-readable title, e.g. "DOOM 2: Hell on Earth".
    pub description: String,
    /// Content is the BFG Edition repackaging.
    pub bfg_edition: bool,
    /// Commercial content without a first level: demos only.
    pub store_demo: bool,
}

impl GameVariant {
    /// Engine generation of the mission.
    pub fn generation(&self) -> Generation {
        self.mission.generation()
    }

    /// Highest episode the tier provides (1 for mapped content).
    pub fn max_episode(&self) -> u8 {
        match self.mode {
            GameMode::Shareware => 1,
            GameMode::Registered => 3,
            GameMode::Retail => 4,
            GameMode::Commercial => 1,
        }
    }

    /// Highest map number inside one episode.
    pub fn max_map(&self) -> u8 {
        match self.mode {
            GameMode::Commercial => 32,
            _ => 9,
        }
    }

    /// Returns true if `--episode` may select this episode.
    pub fn is_valid_episode(&self, episode: u8) -> bool {
        self.mode != GameMode::Commercial && (1..=self.max_episode()).contains(&episode)
    }

    /// Returns true if the level selector addresses a level this tier holds.
    pub fn is_valid_level(&self, episode: u8, map: u8) -> bool {
        let episode_ok = match self.mode {
            GameMode::Commercial => episode == 1,
            _ => self.is_valid_episode(episode),
        };
        episode_ok && (1..=self.max_map()).contains(&map)
    }

    /// Startup banner for the variant.
    pub fn banner(&self) -> String {
        banner(self.mode, self.mission, self.version)
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?}/{:?}, {})",
            self.description,
            self.mode,
            self.mission,
            self.version.cmdline()
        )
    }
}

//=== Resolution ==========================================================

/// Lump names that mark the BFG Edition repackaging.
const BFG_MARKERS: [&str; 2] = ["DMENUPIC", "M_ACPT"];

/// Resolves the game variant from the catalog and caller hints.
///
/// # Errors
///
/// - [`EngineError::UnrecognizedContent`] if no generation marker exists
/// - [`EngineError::UnknownMissionPack`] for an unknown `--pack`
/// - [`EngineError::UnknownGameVersion`] for an unknown `--gameversion`
pub fn resolve(catalog: &dyn AssetCatalog, hints: &VariantHints) -> Result<GameVariant, EngineError> {
    //--- 1. Mission identity ----------------------------------------------
    let pinned = hints
        .iwad_filename
        .as_deref()
        .and_then(mission_for_iwad_filename);
    let (mut mission, mut source) = identify_mission(catalog, pinned)?;

    //--- 2. Content tier --------------------------------------------------
    let mode = identify_mode(catalog, mission);

    //--- 3. Explicit mission pack ----------------------------------------
    if let Some(pack) = hints.mission_pack.as_deref() {
        if mission.generation() == Generation::Mapped {
            mission = mission_for_pack_name(pack)?;
            source = MissionSource::PackOverride;
        } else {
            warn!(target: "session::variant", "Ignoring mission pack '{}' for episodic content", pack);
        }
    }

    //--- 4. Compatibility class + reconciliation -------------------------
    let version = resolve_version(hints.game_version.as_deref(), mode, mission)?;
    let settled = reconcile(Reconciled { mode, mission, version }, source);

    //--- 5. Description and content flags --------------------------------
    let description = describe(catalog, settled.mode, settled.mission);
    let bfg_edition = BFG_MARKERS.iter().all(|marker| catalog.contains(marker));
    let store_demo = settled.mode == GameMode::Commercial && !catalog.contains("MAP01");

    let variant = GameVariant {
        mission: settled.mission,
        mode: settled.mode,
        version: settled.version,
        mission_source: source,
        description,
        bfg_edition,
        store_demo,
    };

    info!(target: "session::variant", "Identified content: {}", variant);
    Ok(variant)
}

//=== Modified-Content Checks =============================================

/// Lumps every genuine registered IWAD carries.
const REGISTERED_LUMPS: [&str; 23] = [
    "E2M1", "E2M2", "E2M3", "E2M4", "E2M5", "E2M6", "E2M7", "E2M8", "E2M9",
    "E3M1", "E3M2", "E3M3", "E3M4", "E3M5", "E3M6", "E3M7", "E3M8", "E3M9",
    "DPHOOF", "BFGGA0", "HEADA1", "CYBRA1", "SPIDA1D1",
];

/// Rejects add-on content the tier does not permit.
///
/// Only applies when extra content files were merged (`modified`).
///
/// # Errors
///
/// - [`EngineError::SharewareModified`] for any add-on on shareware
/// - [`EngineError::NotRegistered`] when the registered tier lacks a lump
pub fn check_modified_content(
    variant: &GameVariant,
    catalog: &dyn AssetCatalog,
    modified: bool,
) -> Result<(), EngineError> {
    if !modified {
        return Ok(());
    }

    match variant.mode {
        GameMode::Shareware => Err(EngineError::SharewareModified),
        GameMode::Registered => match REGISTERED_LUMPS.iter().find(|lump| !catalog.contains(lump)) {
            Some(missing) => Err(EngineError::NotRegistered((*missing).to_string())),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
