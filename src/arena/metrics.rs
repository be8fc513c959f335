use std::time::Duration;

use crate::game::Player;

/// Per-player counters for one match.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct PlayerTally {
    pub wins: usize,
    pub forfeits: usize,
    pub moves: usize,
    #[serde(skip)]
    think_time: Duration,
    #[serde(skip)]
    slowest: Duration,
}

impl PlayerTally {
    /// Mean wall-clock time per supervised move in milliseconds.
    pub fn average_move_ms(&self) -> f32 {
        if self.moves == 0 {
            return 0.0;
        }
        self.think_time.as_secs_f32() * 1000.0 / self.moves as f32
    }

    pub fn slowest_move_ms(&self) -> f32 {
        self.slowest.as_secs_f32() * 1000.0
    }
}

/// Running totals for a match: results, game lengths and move timings.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MatchTally {
    games: usize,
    draws: usize,
    total_moves: usize, // moves actually played, seed moves excluded
    one: PlayerTally,
    two: PlayerTally,
}

impl MatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn player_mut(&mut self, player: Player) -> &mut PlayerTally {
        match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        }
    }

    pub fn player(&self, player: Player) -> &PlayerTally {
        match player {
            Player::One => &self.one,
            Player::Two => &self.two,
        }
    }

    /// Record one supervised move, whether or not it was legal.
    pub fn record_move(&mut self, player: Player, elapsed: Duration) {
        let tally = self.player_mut(player);
        tally.moves += 1;
        tally.think_time += elapsed;
        tally.slowest = tally.slowest.max(elapsed);
    }

    /// Record a finished game. `forfeited_by` is the player who lost by
    /// forfeit, if any.
    pub fn record_game(&mut self, winner: Option<Player>, forfeited_by: Option<Player>, moves: usize) {
        self.games += 1;
        self.total_moves += moves;
        match winner {
            Some(player) => self.player_mut(player).wins += 1,
            None => self.draws += 1,
        }
        if let Some(loser) = forfeited_by {
            self.player_mut(loser).forfeits += 1;
        }
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn wins(&self, player: Player) -> usize {
        self.player(player).wins
    }

    pub fn win_rate(&self, player: Player) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(player) as f32 / self.games as f32
    }

    pub fn draw_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.draws as f32 / self.games as f32
    }

    pub fn average_game_length(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f32 / self.games as f32
    }

    /// The player with more game wins, `None` on a tied match.
    pub fn leader(&self) -> Option<Player> {
        match self.one.wins.cmp(&self.two.wins) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally() {
        let tally = MatchTally::new();
        assert_eq!(tally.games(), 0);
        assert_eq!(tally.win_rate(Player::One), 0.0);
        assert_eq!(tally.draw_rate(), 0.0);
        assert_eq!(tally.average_game_length(), 0.0);
        assert_eq!(tally.player(Player::Two).average_move_ms(), 0.0);
        assert_eq!(tally.leader(), None);
    }

    #[test]
    fn test_record_games() {
        let mut tally = MatchTally::new();
        tally.record_game(Some(Player::One), None, 11);
        tally.record_game(Some(Player::One), Some(Player::Two), 4);
        tally.record_game(None, None, 42);
        tally.record_game(Some(Player::Two), None, 19);

        assert_eq!(tally.games(), 4);
        assert_eq!(tally.wins(Player::One), 2);
        assert_eq!(tally.wins(Player::Two), 1);
        assert_eq!(tally.draws(), 1);
        assert_eq!(tally.player(Player::Two).forfeits, 1);
        assert!((tally.win_rate(Player::One) - 0.5).abs() < 1e-6);
        assert!((tally.draw_rate() - 0.25).abs() < 1e-6);
        assert!((tally.average_game_length() - 19.0).abs() < 1e-6);
        assert_eq!(tally.leader(), Some(Player::One));
    }

    #[test]
    fn test_move_timings() {
        let mut tally = MatchTally::new();
        tally.record_move(Player::Two, Duration::from_millis(10));
        tally.record_move(Player::Two, Duration::from_millis(30));
        tally.record_move(Player::One, Duration::from_millis(5));

        let two = tally.player(Player::Two);
        assert_eq!(two.moves, 2);
        assert!((two.average_move_ms() - 20.0).abs() < 1e-3);
        assert!((two.slowest_move_ms() - 30.0).abs() < 1e-3);
        assert_eq!(tally.player(Player::One).moves, 1);
    }

    #[test]
    fn test_serializes_counts() {
        let mut tally = MatchTally::new();
        tally.record_game(Some(Player::Two), Some(Player::One), 3);
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["games"], 1);
        assert_eq!(json["two"]["wins"], 1);
        assert_eq!(json["one"]["forfeits"], 1);
    }
}
