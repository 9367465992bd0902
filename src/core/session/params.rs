//=========================================================================
// Startup Parameters
//=========================================================================
//
// Fixed-shape command-line surface read once before the loop starts.
//
// Values are kept raw here. Range checks that depend on the resolved
// variant (episode, warp target) happen when the launch plan is built,
// where an out-of-range selector is ignored with a warning instead of
// aborting.
//
//=========================================================================

//=== External Dependencies ===============================================

use clap::Parser;

//=== Internal Dependencies ===============================================

use crate::core::variant::VariantHints;
use crate::error::EngineError;

//=== Constants ===========================================================

/// Turbo scale used when `--turbo` is given without a value.
pub const DEFAULT_TURBO: i32 = 200;

//=== StartupParams =======================================================

/// Command-line arguments the session's startup path reacts to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "session_engine", version, about, long_about = None)]
pub struct StartupParams {
    /// Difficulty 1-5; starts a game directly.
    #[arg(long, value_name = "LEVEL")]
    pub skill: Option<u8>,

    /// Episode to start on (episodic content only).
    #[arg(long, value_name = "N")]
    pub episode: Option<u8>,

    /// Level to warp to: MAP for mapped content, EPISODE [MAP] otherwise.
    #[arg(long, num_args = 1..=2, value_name = "LEVEL")]
    pub warp: Vec<u8>,

    /// Deathmatch time limit in minutes.
    #[arg(long, value_name = "MINUTES")]
    pub timer: Option<u32>,

    /// Austin Virtual Gaming: end levels after 20 minutes.
    #[arg(long)]
    pub avg: bool,

    /// Emulate a specific executable version.
    #[arg(long = "gameversion", value_name = "VERSION")]
    pub game_version: Option<String>,

    /// Mission pack for mapped content: doom2, tnt or plutonia.
    #[arg(long, value_name = "PACK")]
    pub pack: Option<String>,

    /// Movement speed percentage, clamped to 10-400.
    #[arg(
        long,
        value_name = "PERCENT",
        num_args = 0..=1,
        default_missing_value = "200",
        allow_negative_numbers = true
    )]
    pub turbo: Option<i32>,

    /// Record a demo with this name.
    #[arg(long, value_name = "NAME")]
    pub record: Option<String>,

    /// Play back a single demo and quit.
    #[arg(long, value_name = "NAME")]
    pub playdemo: Option<String>,

    /// Play back a demo as fast as possible and report timing.
    #[arg(long, value_name = "NAME")]
    pub timedemo: Option<String>,

    /// Load a saved game from this slot.
    #[arg(long, value_name = "SLOT")]
    pub loadgame: Option<u8>,

    /// Disable monsters.
    #[arg(long)]
    pub nomonsters: bool,

    /// Monsters respawn after being killed.
    #[arg(long)]
    pub respawn: bool,

    /// Monsters move and attack faster.
    #[arg(long)]
    pub fast: bool,

    /// Developer mode.
    #[arg(long)]
    pub devparm: bool,

    /// Deathmatch with non-respawning items.
    #[arg(long)]
    pub deathmatch: bool,

    /// Deathmatch with respawning items.
    #[arg(long)]
    pub altdeath: bool,

    /// Main content archive.
    #[arg(long, value_name = "PATH")]
    pub iwad: Option<String>,

    /// Extra content archives merged over the main one.
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub file: Vec<String>,
}

impl StartupParams {
    /// Parses an argument list (first item is the program name).
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidArguments`] with clap's rendered message.
    pub fn from_args<I, T>(args: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| EngineError::InvalidArguments(e.to_string()))
    }

    /// Hints for the variant resolver.
    pub fn variant_hints(&self) -> VariantHints {
        VariantHints {
            iwad_filename: self.iwad.clone(),
            mission_pack: self.pack.clone(),
            game_version: self.game_version.clone(),
        }
    }

    /// Extra content files were requested on top of the main archive.
    pub fn is_modified(&self) -> bool {
        !self.file.is_empty()
    }

    /// Time limit in minutes; `--avg` overrides `--timer`.
    pub fn time_limit(&self) -> Option<u32> {
        if self.avg {
            Some(20)
        } else {
            self.timer
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
