use clap::Parser;

/// Options for the demo CLI.
#[derive(Clone, Debug, Parser)]
#[command(name = "algrules", about = "Demo driver for the board-game rule algebra")]
pub struct Options {
    /// Which bundled game to load from the catalog.
    #[arg(short, long, value_parser = ["tictac", "chess", "othello", "snake"])]
    pub game: String,

    #[arg(short, long)]
    pub log_level: Option<String>,
}
