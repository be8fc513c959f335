use super::{Board, Player, WinState};
use crate::error::BoardError;

/// How a finished game is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ScoringRule {
    /// The first four-in-a-row wins; a full board without one is a draw.
    #[default]
    #[serde(rename = "first")]
    FirstFour,
    /// Play until the board is full; whoever owns more fours wins.
    #[serde(rename = "most")]
    MostFours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    rule: ScoringRule,
    last_move: Option<usize>,
    move_count: usize,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Start a game from an arbitrary (possibly seeded) board. Fours already
    /// on the board only count once a move has been made, unless the board
    /// is full and no move is possible.
    pub fn new(board: Board, first_player: Player, rule: ScoringRule) -> Self {
        let mut state = GameState {
            board,
            current_player: first_player,
            rule,
            last_move: None,
            move_count: 0,
            outcome: None,
        };
        if state.board.is_full() {
            state.outcome = state.judge();
        }
        state
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Column of the most recent move, `None` before the first move
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of fours currently owned by `player`
    pub fn points(&self, player: Player) -> u32 {
        self.board.score(player)
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board.drop_piece(column, self.current_player)?;
        self.move_count += 1;
        self.last_move = Some(column);
        self.outcome = self.judge();
        if self.outcome.is_none() {
            self.current_player = self.current_player.other();
        }

        Ok(())
    }

    /// End the game in favour of the opponent of `loser`
    pub fn forfeit(&mut self, loser: Player) {
        self.outcome = Some(GameOutcome::Winner(loser.other()));
    }

    fn judge(&self) -> Option<GameOutcome> {
        match self.rule {
            ScoringRule::FirstFour => match self.board.winner() {
                WinState::Won(player) => Some(GameOutcome::Winner(player)),
                WinState::Ambiguous => {
                    log::warn!("both players hold a four-in-a-row; scoring the game as a draw");
                    Some(GameOutcome::Draw)
                }
                WinState::NoWinner if self.board.is_full() => Some(GameOutcome::Draw),
                WinState::NoWinner => None,
            },
            ScoringRule::MostFours => {
                if !self.board.is_full() {
                    return None;
                }
                let one = self.points(Player::One);
                let two = self.points(Player::Two);
                Some(match one.cmp(&two) {
                    std::cmp::Ordering::Greater => GameOutcome::Winner(Player::One),
                    std::cmp::Ordering::Less => GameOutcome::Winner(Player::Two),
                    std::cmp::Ordering::Equal => GameOutcome::Draw,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Cell;

    fn initial(rule: ScoringRule) -> GameState {
        GameState::new(Board::default(), Player::One, rule)
    }

    #[test]
    fn test_initial_state() {
        let state = initial(ScoringRule::FirstFour);
        assert_eq!(state.current_player(), Player::One);
        assert!(!state.is_terminal());
        assert_eq!(state.last_move(), None);
        assert_eq!(state.board().legal_columns().count(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = initial(ScoringRule::FirstFour);
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::Two);
        assert_eq!(new_state.board().get(0, 3), Ok(Cell::One));
        assert_eq!(new_state.last_move(), Some(3));
        assert_eq!(new_state.move_count(), 1);
        // Original is untouched
        assert_eq!(state.board().get(0, 3), Ok(Cell::Empty));
    }

    #[test]
    fn test_win_detection() {
        let mut state = initial(ScoringRule::FirstFour);

        // Player one wins with a horizontal line on the bottom row
        for col in 0..4 {
            state = state.apply_move(col).unwrap();
            if col < 3 {
                state = state.apply_move(col).unwrap();
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::One)));
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut state = initial(ScoringRule::FirstFour);
        assert_eq!(
            state.apply_move_mut(9),
            Err(MoveError::Board(BoardError::InvalidColumn(9)))
        );
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_most_fours_plays_to_full_board() {
        let mut state = GameState::new(Board::new(4, 4), Player::One, ScoringRule::MostFours);
        // Player one fills column 0 and part of others; game must continue past a four
        let columns = [0, 1, 0, 1, 0, 1, 0];
        for col in columns {
            state.apply_move_mut(col).unwrap();
        }
        assert_eq!(state.points(Player::One), 1);
        assert!(!state.is_terminal());

        // Fill the rest of the board
        while !state.is_terminal() {
            let col = state.board().legal_columns().next().unwrap();
            state.apply_move_mut(col).unwrap();
        }
        assert!(state.board().is_full());
        let one = state.points(Player::One);
        let two = state.points(Player::Two);
        let expected = match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Player::One),
            std::cmp::Ordering::Less => GameOutcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        };
        assert_eq!(state.outcome(), Some(expected));
    }

    #[test]
    fn test_full_starting_board_is_settled() {
        let mut board = Board::new(4, 4);
        for col in 0..4 {
            for _ in 0..4 {
                board.drop_piece(col, Player::Two).unwrap();
            }
        }
        let state = GameState::new(board, Player::One, ScoringRule::MostFours);
        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::Two)));
    }

    #[test]
    fn test_forfeit_awards_opponent() {
        let mut state = initial(ScoringRule::FirstFour);
        state.forfeit(Player::Two);
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::One)));
    }

    #[test]
    fn test_scoring_rule_serde_names() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            rule: ScoringRule,
        }
        let w: Wrapper = toml::from_str("rule = \"most\"").unwrap();
        assert_eq!(w.rule, ScoringRule::MostFours);
        let w: Wrapper = toml::from_str("rule = \"first\"").unwrap();
        assert_eq!(w.rule, ScoringRule::FirstFour);
    }
}
