use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, name: &str, id: &str) -> Result<(), String> {
    let (doc, player) = super::load_player(global, name, id)?;
    let sentence = kg_render::describe_doors(&doc, &player).map_err(|e| e.to_string())?;
    println!("{sentence}");
    Ok(())
}
