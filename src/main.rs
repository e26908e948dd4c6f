mod options;

use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_algrules::{games, prelude::*};
use options::Options;

/// A non-interactive driver: looks up the requested game, prints its starting
/// position, computes one turn's worth of legal moves, and prints each
/// successor with its diff against the start highlighted.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let options = Options::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            _ => AdaptiveFormat::Default,
        })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    log::info!("loading game '{}' from the catalog", options.game);
    let game = games::game(&options.game)
        .ok_or_else(|| anyhow::anyhow!("no such game in the catalog: {}", options.game))?;

    println!("initial position:");
    for line in render_lines(&game.initial_board, &RenderOptions::default()) {
        println!("{line}");
    }

    let successors = match game.rule.apply(&game.initial_board) {
        Ok(successors) => successors,
        Err(e) => {
            log::warn!("rule application failed: {e}");
            return Err(e.into());
        }
    };
    log::debug!("found {} legal successor(s)", successors.len());

    println!("\n{} legal move(s):", successors.len());
    for (i, successor) in successors.iter().enumerate() {
        let highlight = diff(&game.initial_board, successor);
        let options = RenderOptions { border: true, highlight };
        println!("\nmove {}:", i + 1);
        for line in render_lines(successor, &options) {
            println!("{line}");
        }
    }

    Ok(())
}
