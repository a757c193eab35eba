//! CLI frontend for inspecting Kartograf maps.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kg",
    about = "Kartograf: player views of a Tiled dungeon map",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Map file to read
    #[arg(short, long, env = "KG_MAP", default_value = "map.tmx", global = true)]
    pub map: PathBuf,

    /// Prefix of inventory-granted commands
    #[arg(long, env = "KG_PREFIX", default_value = "!", global = true)]
    pub prefix: String,

    /// Strip color directives from the output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// A player name together with the external identity that must own it.
#[derive(Args)]
struct Identity {
    /// Player object name on the map
    name: String,

    /// External identity stored on the player object
    id: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a player's stats
    Whoami {
        #[command(flatten)]
        who: Identity,

        /// Print the player record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Draw the player's current room
    Room {
        #[command(flatten)]
        who: Identity,
    },

    /// Draw the player's floor
    Map {
        #[command(flatten)]
        who: Identity,

        /// Detail level: 0 rooms only, 1 with the player, 2 with room kinds
        #[arg(short, long, default_value = "2")]
        level: u8,
    },

    /// Describe the doors of the player's room
    Doors {
        #[command(flatten)]
        who: Identity,
    },

    /// Show the formatted inventory of any object
    Inventory {
        /// Object name on the map
        name: String,
    },

    /// List the commands granted by a player's inventory
    Commands {
        #[command(flatten)]
        who: Identity,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    let global = &cli.global;
    tracing::debug!(map = %global.map.display(), plain = global.plain, "starting");

    let result = match cli.command {
        Commands::Whoami { who, json } => commands::whoami::run(global, &who.name, &who.id, json),
        Commands::Room { who } => commands::room::run(global, &who.name, &who.id),
        Commands::Map { who, level } => commands::map::run(global, &who.name, &who.id, level),
        Commands::Doors { who } => commands::doors::run(global, &who.name, &who.id),
        Commands::Inventory { name } => commands::inventory::run(global, &name),
        Commands::Commands { who } => commands::granted::run(global, &who.name, &who.id),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {e}");
        process::exit(1);
    }
}
