use colored::Colorize;

use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, name: &str, id: &str, level: u8) -> Result<(), String> {
    let (doc, player) = super::load_player(global, name, id)?;
    let rendered = kg_render::render_floor(&doc, &player, level).map_err(|e| e.to_string())?;

    match rendered {
        Some(map) => {
            if let (Some(floor), Some(at)) = (doc.floor_of(&player), doc.floor_coords(&player)) {
                println!("  {} ({}, {})", floor.name.bold(), at.x, at.y);
                println!();
            }
            super::emit(global, &map);
        }
        None => println!("  {} is not on any floor.", player.name),
    }
    Ok(())
}
