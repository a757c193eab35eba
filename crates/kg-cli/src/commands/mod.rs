pub mod doors;
pub mod granted;
pub mod inventory;
pub mod map;
pub mod room;
pub mod whoami;

use kg_core::palette::strip_directives;
use kg_core::{Document, Player};

use crate::GlobalArgs;

/// Load the map named by the global options.
fn load_document(global: &GlobalArgs) -> Result<Document, String> {
    Document::load(&global.map).map_err(|e| e.to_string())
}

/// Load the map and locate the player owned by `id`.
fn load_player(global: &GlobalArgs, name: &str, id: &str) -> Result<(Document, Player), String> {
    let doc = load_document(global)?;
    let player = doc.locate_player(name, id).map_err(|e| e.to_string())?;
    Ok((doc, player))
}

/// Print rendered text, without color directives under `--plain`.
fn emit(global: &GlobalArgs, text: &str) {
    if global.plain {
        println!("{}", strip_directives(text));
    } else {
        println!("{text}");
    }
}
