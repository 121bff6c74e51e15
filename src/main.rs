/*
 * giftex - Secret gift exchange assignment generator.
 * Copyright (C) 2025  giftex contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::Result;
use clap::Parser;
use console::style;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

mod config;
mod error;
mod exchange;
mod logging;
mod report;
mod roster;

use error::GiftexError;
use exchange::{CandidateGraph, ExchangeSolver};

const VERSION: &str = "0.3.0";
const LONG_VERSION: &str = concat!(
    "0.3.0\n",
    "Copyright (C) 2025  giftex contributors\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>\n\n",
    "This is free software; you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Exit status signalling that the exchange is unsolvable (distinct from
/// boundary errors, which exit 1)
const EXIT_NO_SOLUTION: i32 = 2;

#[derive(Parser)]
#[command(name = "giftex")]
#[command(version = VERSION)]
#[command(long_version = LONG_VERSION)]
#[command(about = "Secret gift exchange assignment generator.")]
struct Cli {
    /// Participant CSV file (First Name,Last Name,Email Address)
    #[arg(value_name = "PARTICIPANTS")]
    participants: PathBuf,

    /// Optional exclusion CSV file (Secret Giftor,Recipient)
    #[arg(value_name = "EXCLUSIONS")]
    exclusions: Option<PathBuf>,

    /// Seed the random source for a reproducible assignment
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the outcome as JSON instead of styled output
    #[arg(long)]
    json: bool,

    /// Skip the per-giftor notification lines
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load();
    config
        .validate()
        .map_err(|message| GiftexError::Config { message })?;
    logging::init(&config.logging);
    if !config.color {
        console::set_colors_enabled(false);
    }

    let roster = roster::load_participants(&cli.participants)?;
    let exclusions = match &cli.exclusions {
        Some(path) => roster::load_exclusions(path)?,
        None => Vec::new(),
    };
    info!(
        participants = roster.len(),
        exclusions = exclusions.len(),
        "loaded exchange inputs"
    );

    let graph = CandidateGraph::build(&roster, &exclusions);
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    match ExchangeSolver::new(&graph).solve(&mut rng) {
        Some(assignments) => {
            if cli.json {
                println!(
                    "{}",
                    report::ExchangeReport::solved(&roster, &assignments).to_json()?
                );
            } else {
                println!("{}", style(":: all gifts assigned").green().bold());
                if !cli.quiet {
                    report::print_notifications(&roster, &assignments);
                }
                report::print_summary_table(&roster, &assignments);
            }
            Ok(())
        }
        None => {
            if cli.json {
                println!("{}", report::ExchangeReport::unsolved().to_json()?);
            } else {
                eprintln!("{}", style(":: no solution found").red().bold());
            }
            std::process::exit(EXIT_NO_SOLUTION);
        }
    }
}
