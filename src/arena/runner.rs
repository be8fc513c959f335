use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::metrics::MatchTally;
use super::{MoveVerdict, Supervisor};
use crate::ai::{Agent, AgentRegistry};
use crate::config::{AppConfig, ArenaConfig};
use crate::error::{BoardError, MatchError};
use crate::game::{Board, GameOutcome, GameState, Player, ScoringRule};

/// Why a player lost a game without it being played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Forfeit {
    /// Kept searching past the grace period after cancellation.
    Disqualified,
    Crashed,
    NoProposal,
    /// Proposed a full or out-of-range column.
    IllegalMove(usize),
}

impl Forfeit {
    fn from_verdict(verdict: MoveVerdict, board: &Board) -> Result<usize, Forfeit> {
        match verdict {
            MoveVerdict::Proposed(col) if board.is_valid_move(col) => Ok(col),
            MoveVerdict::Proposed(col) => Err(Forfeit::IllegalMove(col)),
            MoveVerdict::NoProposal => Err(Forfeit::NoProposal),
            MoveVerdict::Crashed => Err(Forfeit::Crashed),
            MoveVerdict::Disqualified => Err(Forfeit::Disqualified),
        }
    }
}

impl fmt::Display for Forfeit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forfeit::Disqualified => write!(f, "disqualified for exceeding the time limit"),
            Forfeit::Crashed => write!(f, "crashed"),
            Forfeit::NoProposal => write!(f, "did not propose a move"),
            Forfeit::IllegalMove(col) => write!(f, "made an illegal move in column {}", col),
        }
    }
}

/// Everything that happened in one game of a match.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub first_player: Player,
    /// Whether the starting board is the previous game's seed reversed.
    pub reversed_seed: bool,
    pub seed_moves: usize,
    pub moves: Vec<usize>,
    pub winner: Option<Player>,
    /// The forfeiting player and the reason, if the game ended by forfeit.
    pub forfeit: Option<(Player, Forfeit)>,
    pub points_one: u32,
    pub points_two: u32,
}

/// A finished match.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MatchResult {
    pub player_one: String,
    pub player_two: String,
    pub scoring: ScoringRule,
    pub games: Vec<GameRecord>,
    pub tally: MatchTally,
}

impl MatchResult {
    /// The player who won more games, `None` if the match is tied.
    pub fn winner(&self) -> Option<Player> {
        self.tally.leader()
    }

    pub fn agent_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }
}

/// Plays a match between two registered agents under a [`Supervisor`].
pub struct MatchRunner<'a> {
    registry: &'a AgentRegistry,
    arena: ArenaConfig,
    supervisor: Supervisor,
    rng: StdRng,
}

impl<'a> MatchRunner<'a> {
    pub fn new(registry: &'a AgentRegistry, config: &AppConfig) -> Result<Self, MatchError> {
        config.validate()?;
        for name in [&config.arena.player_one, &config.arena.player_two] {
            registry.create(name)?;
        }
        Ok(MatchRunner {
            registry,
            arena: config.arena.clone(),
            supervisor: Supervisor::new(config.supervisor.clone()),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Use a fixed seed for the random starting boards.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// A fresh board with `seed_moves` random legal drops, players alternating
    /// from player one.
    pub fn seeded_board(&mut self) -> Result<Board, BoardError> {
        let mut board = Board::new(self.arena.rows, self.arena.cols);
        for i in 0..self.arena.seed_moves.min(board.num_cells()) {
            let col = loop {
                let col = self.rng.random_range(0..board.num_cols());
                if board.is_valid_move(col) {
                    break col;
                }
            };
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            board.drop_piece(col, player)?;
        }
        Ok(board)
    }

    fn agent_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.arena.player_one,
            Player::Two => &self.arena.player_two,
        }
    }

    fn new_agent(&self, player: Player) -> Result<Box<dyn Agent>, MatchError> {
        let mut agent = self.registry.create(self.agent_name(player))?;
        agent.init(player, self.arena.msec_per_move, self.arena.rows, self.arena.cols);
        Ok(agent)
    }

    /// Play every game of the match.
    pub fn play_match(&mut self) -> Result<MatchResult, MatchError> {
        let mut tally = MatchTally::new();
        let mut games = Vec::with_capacity(self.arena.num_games);
        let mut seed = Board::new(self.arena.rows, self.arena.cols);

        log::info!(
            "match: {} (Player #1) vs {} (Player #2), {} games, {}ms per move, scoring {:?}",
            self.arena.player_one,
            self.arena.player_two,
            self.arena.num_games,
            self.arena.msec_per_move,
            self.arena.scoring
        );

        for game_number in 1..=self.arena.num_games {
            let reversed = self.arena.match_play && game_number % 2 == 0;
            if reversed {
                seed.reverse();
            } else {
                seed = self.seeded_board()?;
            }
            let record = self.play_game(game_number, seed.clone(), reversed, &mut tally)?;
            games.push(record);
        }

        let result = MatchResult {
            player_one: self.arena.player_one.clone(),
            player_two: self.arena.player_two.clone(),
            scoring: self.arena.scoring,
            games,
            tally,
        };
        match result.winner() {
            Some(player) => log::info!(
                "match won by {} ({}) {}-{}",
                result.agent_name(player),
                player.name(),
                result.tally.wins(player),
                result.tally.wins(player.other())
            ),
            None => log::info!("match tied {}-{}", result.tally.wins(Player::One), result.tally.wins(Player::Two)),
        }
        Ok(result)
    }

    /// Play one game from `start`. Player one moves first in odd-numbered
    /// games and player two in even-numbered ones.
    pub fn play_game(
        &mut self,
        game_number: usize,
        start: Board,
        reversed_seed: bool,
        tally: &mut MatchTally,
    ) -> Result<GameRecord, MatchError> {
        let first_player = if game_number % 2 == 1 { Player::One } else { Player::Two };
        let seed_moves = start.num_occupied_cells();
        let mut state = GameState::new(start, first_player, self.arena.scoring);
        let mut seats = [Some(self.new_agent(Player::One)?), Some(self.new_agent(Player::Two)?)];
        let mut moves = Vec::new();
        let mut forfeit = None;

        log::debug!("game {} starts with {}:\n{}", game_number, first_player.name(), state.board());

        while !state.is_terminal() {
            let mover = state.current_player();
            let seat = &mut seats[usize::from(mover.id() - 1)];
            let agent = match seat.take() {
                Some(agent) => agent,
                None => self.new_agent(mover)?,
            };

            let supervised =
                self.supervisor
                    .calc_move(state.board(), agent, state.last_move(), self.arena.msec_per_move);
            *seat = supervised.agent;
            tally.record_move(mover, supervised.elapsed);

            match Forfeit::from_verdict(supervised.verdict, state.board()) {
                Ok(col) => {
                    log::debug!(
                        "{} ({}) moves to column {} after {:?}",
                        self.agent_name(mover),
                        mover.name(),
                        col,
                        supervised.elapsed
                    );
                    state.apply_move_mut(col)?;
                    moves.push(col);
                }
                Err(reason) => {
                    log::warn!(
                        "{} ({}) {}; game {} goes to {}",
                        self.agent_name(mover),
                        mover.name(),
                        reason,
                        game_number,
                        mover.other().name()
                    );
                    state.forfeit(mover);
                    forfeit = Some((mover, reason));
                }
            }
        }

        let winner = match state.outcome() {
            Some(GameOutcome::Winner(player)) => Some(player),
            _ => None,
        };
        match winner {
            Some(player) => log::info!(
                "game {}/{}: {} ({}) wins after {} moves",
                game_number,
                self.arena.num_games,
                self.agent_name(player),
                player.name(),
                moves.len()
            ),
            None => log::info!(
                "game {}/{}: draw after {} moves",
                game_number,
                self.arena.num_games,
                moves.len()
            ),
        }
        tally.record_game(winner, forfeit.map(|(loser, _)| loser), moves.len());

        Ok(GameRecord {
            game_number,
            first_player,
            reversed_seed,
            seed_moves,
            moves,
            winner,
            forfeit,
            points_one: state.points(Player::One),
            points_two: state.points(Player::Two),
        })
    }
}
