//=========================================================================
// Engine Errors
//=========================================================================
//
// Fatal conditions detected on the startup path.
//
// Every variant aborts startup with a diagnostic before the main loop is
// entered. Once the loop runs there is no error path: lower-level
// failures belong to the collaborator that produced them.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== EngineError =========================================================

/// Unrecoverable startup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The catalog holds neither a mapped nor an episodic first level.
    #[error("Unknown or invalid IWAD file: no MAP01 or E1M1 lump found")]
    UnrecognizedContent,

    /// `--gameversion` named a class missing from the compatibility table.
    #[error("Unknown game version '{given}' (valid: {valid})")]
    UnknownGameVersion { given: String, valid: String },

    /// `--pack` named an unknown mission pack.
    #[error("Unknown mission pack name: {0}")]
    UnknownMissionPack(String),

    /// Extra content files were loaded on top of the shareware tier.
    #[error("You cannot use -file with the shareware version. Register!")]
    SharewareModified,

    /// The registered tier is missing a lump every registered IWAD has.
    #[error("This is not the registered version (missing lump {0})")]
    NotRegistered(String),

    /// A lump the session cannot start without is absent.
    #[error("Required asset '{0}' not found in the loaded content")]
    MissingAsset(String),

    /// The command line could not be parsed.
    #[error("Invalid startup arguments: {0}")]
    InvalidArguments(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
