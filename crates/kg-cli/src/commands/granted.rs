use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, name: &str, id: &str) -> Result<(), String> {
    let (_, player) = super::load_player(global, name, id)?;
    let granted = player.inventory_commands(&global.prefix);

    if granted.is_empty() {
        println!("  No commands granted.");
        return Ok(());
    }
    for command in &granted {
        println!("{}{command}", global.prefix);
    }
    Ok(())
}
