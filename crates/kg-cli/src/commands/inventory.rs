use colored::Colorize;

use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, name: &str) -> Result<(), String> {
    let doc = super::load_document(global)?;
    let lines = doc.inventory_of(name).map_err(|e| e.to_string())?;

    if lines.iter().all(|l| l.is_empty()) {
        println!("  {} (empty)", name.bold());
        return Ok(());
    }
    super::emit(global, &lines.join("\n"));
    Ok(())
}
