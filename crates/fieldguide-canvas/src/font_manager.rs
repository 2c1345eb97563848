//! System font lookup for HUD text.
//!
//! No font is bundled: the compass readout uses the first monospace face
//! fontdb finds. Headless machines may have none, in which case text is
//! simply not drawn.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{fs, sync::OnceLock};
use tracing::{debug, warn};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// Font used for the heading readout, if the system has one.
pub fn hud_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = load_font_from_system(&[Family::Monospace, Family::SansSerif]);
        if font.is_none() {
            warn!("No system font found; HUD text will not be drawn");
        }
        font
    })
    .as_ref()
}

fn load_font_from_system(families: &[Family<'_>]) -> Option<Font<'static>> {
    let query = Query {
        families,
        weight: Weight::BOLD,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}
