//=========================================================================
// Attract Loop Steps
//=========================================================================
//
// The fixed step table, built once from the variant and the catalog.
//
// ```text
//   0  page  TITLEPIC  385 + dm2int (commercial) | 170 + intro
//   1  demo  demo1
//   2  page  CREDIT    200
//   3  demo  demo2
//   4  page  TITLEPIC  385 + dm2ttl (commercial)
//            CREDIT    200          (retail)
//            HELP2     200          (otherwise)
//   5  demo  demo3
//   6  demo  demo4                  (ultimate and final only)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::catalog::AssetCatalog;
use crate::core::presentation::TITLE_PAGE;
use crate::core::timing::TICRATE;
use crate::core::variant::{GameMode, GameVariant, GameVersion};

//=== Constants ===========================================================

/// Stand-in when a content set ships without a title page.
pub const TITLE_FALLBACK: &str = "INTERPIC";
pub const CREDIT_PAGE: &str = "CREDIT";
pub const HELP_PAGE: &str = "HELP2";

/// Page time in tics for the commercial title.
pub const COMMERCIAL_TITLE_TICS: i32 = TICRATE as i32 * 11;
pub const TITLE_TICS: i32 = 170;
pub const PAGE_TICS: i32 = 200;

//=== DemoActivity ========================================================

/// What one step of the attract loop does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoActivity {
    /// Show a full-screen page for `tics`, optionally starting music.
    Page {
        name: String,
        tics: i32,
        music: Option<&'static str>,
    },
    /// Play a recorded demo; its end advances the loop.
    Demo { lump: String },
}

//=== Table Construction ==================================================

/// Builds the step table for a content set.
///
/// Demo steps whose lump is absent are left out with a warning.
pub fn build_steps(variant: &GameVariant, catalog: &dyn AssetCatalog) -> Vec<DemoActivity> {
    let commercial = variant.mode == GameMode::Commercial;
    let title = if catalog.contains(TITLE_PAGE) {
        TITLE_PAGE
    } else {
        warn!(target: "session::demo", "{} missing, using {}", TITLE_PAGE, TITLE_FALLBACK);
        TITLE_FALLBACK
    };

    let page = |name: &str, tics: i32, music: Option<&'static str>| DemoActivity::Page {
        name: name.to_string(),
        tics,
        music,
    };

    let opening = if commercial {
        page(title, COMMERCIAL_TITLE_TICS, Some("dm2int"))
    } else {
        page(title, TITLE_TICS, Some("intro"))
    };
    let interlude = if commercial {
        page(title, COMMERCIAL_TITLE_TICS, Some("dm2ttl"))
    } else if variant.mode == GameMode::Retail {
        page(CREDIT_PAGE, PAGE_TICS, None)
    } else {
        page(HELP_PAGE, PAGE_TICS, None)
    };

    let mut table = vec![
        Some(opening),
        demo(catalog, "demo1"),
        Some(page(CREDIT_PAGE, PAGE_TICS, None)),
        demo(catalog, "demo2"),
        Some(interlude),
        demo(catalog, "demo3"),
    ];
    if has_fourth_demo(variant.version) {
        table.push(demo(catalog, "demo4"));
    }

    table.into_iter().flatten().collect()
}

fn demo(catalog: &dyn AssetCatalog, lump: &str) -> Option<DemoActivity> {
    if catalog.contains(lump) {
        Some(DemoActivity::Demo { lump: lump.to_string() })
    } else {
        warn!(target: "session::demo", "Demo lump {} missing, step skipped", lump);
        None
    }
}

/// Only the Ultimate and Final executables cycle a fourth demo.
fn has_fourth_demo(version: GameVersion) -> bool {
    matches!(version, GameVersion::Ultimate | GameVersion::Final)
}
