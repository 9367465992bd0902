//=========================================================================
// Session Engine — Library Root
//
// Session orchestrator for a tic-driven game engine: the main loop,
// presentation modes and screen wipes, the attract-mode demo loop, and
// identification of the loaded content.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the collaborator traits applications implement
// - Keep the platform layer (winit) hidden from end users
//
// Typical usage:
// ```no_run
// use session_engine::prelude::*;
//
// fn start(catalog: NameCatalog, collaborators: Collaborators) -> Result<(), EngineError> {
//     let params = StartupParams::from_args(std::env::args())?;
//     EngineBuilder::new().build(&params, &catalog, collaborators)?.run();
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs on the session thread. It is public
// so applications can implement collaborators and drive the pieces on
// their own; most code only needs the prelude.
//
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the winit event loop and is not part of
// the public API. `engine` holds the startup path and the runtime.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, PALETTE_LUMP};
pub use error::EngineError;
