use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect4_arena::ai::AgentRegistry;
use connect4_arena::arena::{MatchResult, MatchRunner};
use connect4_arena::config::AppConfig;
use connect4_arena::game::{Player, ScoringRule};

/// Play a Connect Four match between two agents.
#[derive(Parser)]
#[command(name = "connect4", about = "Play a timed Connect Four match between two agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Agent for player #1
    #[arg(long)]
    p1: Option<String>,

    /// Agent for player #2
    #[arg(long)]
    p2: Option<String>,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override the time budget per move, in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Override number of random moves seeding each board
    #[arg(long)]
    seed_moves: Option<usize>,

    /// Scoring rule: first (first four wins) or most (most fours on a full board)
    #[arg(long)]
    scoring: Option<String>,

    /// Seed for the random starting boards
    #[arg(long)]
    seed: Option<u64>,

    /// List the available agents and exit
    #[arg(long)]
    list_agents: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Print the match result as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let registry = AgentRegistry::with_builtin();

    if cli.list_agents {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }
    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(p1) = cli.p1 {
        config.arena.player_one = p1;
    }
    if let Some(p2) = cli.p2 {
        config.arena.player_two = p2;
    }
    if let Some(games) = cli.games {
        config.arena.num_games = games;
    }
    if let Some(ms) = cli.time_ms {
        config.arena.msec_per_move = ms;
    }
    if let Some(n) = cli.seed_moves {
        config.arena.seed_moves = n;
    }
    if let Some(scoring) = cli.scoring.as_deref() {
        config.arena.scoring = match scoring {
            "first" => ScoringRule::FirstFour,
            "most" => ScoringRule::MostFours,
            other => bail!("unknown scoring rule '{}' (expected 'first' or 'most')", other),
        };
    }

    let mut runner = MatchRunner::new(&registry, &config).context("setting up match")?;
    if let Some(seed) = cli.seed {
        runner = runner.with_seed(seed);
    }
    let result = runner.play_match().context("playing match")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn print_summary(result: &MatchResult) {
    println!("-------------------------------------------");
    println!(
        "{:>4} | {:>6} | {:>5} | {:>14} | {:>7}",
        "game", "first", "moves", "winner", "points"
    );
    for game in &result.games {
        let winner = match game.winner {
            Some(player) => result.agent_name(player).to_string(),
            None => "draw".to_string(),
        };
        let first = match game.first_player {
            Player::One => "#1",
            Player::Two => "#2",
        };
        let note = match &game.forfeit {
            Some((player, reason)) => format!("  ({} {})", player.name(), reason),
            None => String::new(),
        };
        println!(
            "{:>4} | {:>6} | {:>5} | {:>14} | {:>3}-{:<3}{}",
            game.game_number,
            first,
            game.moves.len(),
            winner,
            game.points_one,
            game.points_two,
            note
        );
    }
    println!("-------------------------------------------");

    let tally = &result.tally;
    for player in [Player::One, Player::Two] {
        let stats = tally.player(player);
        println!(
            "{} {:<10} wins: {:>3} ({:.1}%) | forfeits: {} | avg move: {:.1}ms | slowest: {:.1}ms",
            player.name(),
            result.agent_name(player),
            stats.wins,
            tally.win_rate(player) * 100.0,
            stats.forfeits,
            stats.average_move_ms(),
            stats.slowest_move_ms()
        );
    }
    println!(
        "draws: {} ({:.1}%) | avg game length: {:.1} moves",
        tally.draws(),
        tally.draw_rate() * 100.0,
        tally.average_game_length()
    );
    match result.winner() {
        Some(player) => println!("Match winner: {} ({})", result.agent_name(player), player.name()),
        None => println!("Match tied"),
    }
}
