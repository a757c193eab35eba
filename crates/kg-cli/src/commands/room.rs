use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, name: &str, id: &str) -> Result<(), String> {
    let (doc, player) = super::load_player(global, name, id)?;
    let view = kg_render::render_room(&doc, &player).map_err(|e| e.to_string())?;
    super::emit(global, &view);
    Ok(())
}
