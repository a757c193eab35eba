use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::GlobalArgs;

pub fn run(global: &GlobalArgs, name: &str, id: &str, json: bool) -> Result<(), String> {
    let (doc, player) = super::load_player(global, name, id)?;

    if json {
        let out = serde_json::to_string_pretty(&player).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let status = if player.dead {
        "dead".red().to_string()
    } else if player.blind {
        "blind".yellow().to_string()
    } else {
        "alive".green().to_string()
    };
    println!("  {} [{status}]", player.name.bold());
    if let Some(stamp) = doc.modified() {
        println!("  {}", format!("map as of {stamp}").dimmed());
    }
    println!();

    let floor = match (doc.floor_of(&player), doc.floor_coords(&player)) {
        (Some(floor), Some(at)) => format!("{} ({}, {})", floor.name, at.x, at.y),
        _ => "—".to_string(),
    };
    let list = |items: &[String]| {
        let items: Vec<&str> = items
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if items.is_empty() {
            "—".to_string()
        } else {
            items.join("\n")
        }
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec!["HP".to_string(), player.format_hp()]);
    table.add_row(vec!["MP".to_string(), player.format_mp()]);
    table.add_row(vec!["SP".to_string(), player.sp.to_string()]);
    table.add_row(vec!["Level".to_string(), player.level.to_string()]);
    table.add_row(vec!["Frags".to_string(), player.frags.clone()]);
    table.add_row(vec!["Rerolls".to_string(), player.rerolls.to_string()]);
    table.add_row(vec!["Group".to_string(), list(std::slice::from_ref(&player.group))]);
    table.add_row(vec!["Floor".to_string(), floor]);
    table.add_row(vec!["Active".to_string(), list(&player.active_abilities)]);
    table.add_row(vec!["Passive".to_string(), list(&player.passive_abilities)]);

    println!("{table}");
    Ok(())
}
