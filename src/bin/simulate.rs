//! Play seeded games between auto bots and report the results.
//!
//! `RUST_LOG=dominion_engine=debug` shows turns and hooks as they happen.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dominion_engine::rules::name_list;
use dominion_engine::{
    AutoInteraction, CornucopiaSet, DominionSet, Game, GameBuilder, GameConfig, GuildsSet, HinterlandsSet, IntrigueSet,
    ProsperitySet, Result,
};

const NAMES: [&str; 6] = ["Ada", "Brook", "Cyd", "Dale", "Emry", "Fen"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Set {
    Dominion,
    Intrigue,
    Hinterlands,
    Prosperity,
    Cornucopia,
    Guilds,
}

/// Dominion simulator
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version, about = "Auto-play seeded Dominion games", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 10)]
    games: u32,

    /// Seed of the first game; game i uses seed + i
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Players per game (2 to 6)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Let victims of attacks that allow it respond concurrently
    #[arg(long)]
    simultaneous: bool,

    /// Stop a game after this many player-turns
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Delivered log lines kept per game
    #[arg(long, default_value_t = 500)]
    log_retention: usize,

    /// Kingdom card sets to draw from
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [Set::Dominion])]
    sets: Vec<Set>,
}

fn build(args: &Args, seed: u64) -> Result<Game> {
    let config = GameConfig::new(seed)
        .with_simultaneous_reactions(args.simultaneous)
        .with_max_turns(args.max_turns)
        .with_log_retention(args.log_retention);
    let mut builder = GameBuilder::new(config);
    for name in NAMES.iter().cycle().take(args.players) {
        builder = builder.player(*name, AutoInteraction::new());
    }
    for set in &args.sets {
        builder = match set {
            Set::Dominion => builder.expansion(DominionSet),
            Set::Intrigue => builder.expansion(IntrigueSet),
            Set::Hinterlands => builder.expansion(HinterlandsSet),
            Set::Prosperity => builder.expansion(ProsperitySet),
            Set::Cornucopia => builder.expansion(CornucopiaSet),
            Set::Guilds => builder.expansion(GuildsSet),
        };
    }
    builder.build()
}

fn run(args: &Args) -> Result<()> {
    let mut wins = vec![0u32; args.players];
    for index in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(index));
        let mut game = build(args, seed)?;
        let outcome = game.run()?;

        let scores: Vec<String> = outcome
            .scores
            .iter()
            .map(|(id, score)| format!("{} {score}", game.player(id).name()))
            .collect();
        let winners = outcome.result.winners();
        for id in &winners {
            wins[id.index()] += 1;
        }
        let winners: Vec<&str> = winners.into_iter().map(|id| game.player(id).name()).collect();
        println!(
            "game {index} (seed {seed}, {} turns): {} won [{}] {}",
            game.turns_taken(),
            name_list(&winners),
            scores.join(", "),
            outcome.reason
        );
    }

    println!();
    for (seat, count) in wins.iter().enumerate() {
        println!("{:<6} {count} of {} games", NAMES[seat % NAMES.len()], args.games);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("simulate: {err}");
            ExitCode::FAILURE
        }
    }
}
