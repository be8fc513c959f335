use super::board::Cell;
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Resolve a numeric player id (1 or 2)
    pub fn from_id(id: u8) -> Result<Player, BoardError> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(BoardError::InvalidPlayerId(other)),
        }
    }

    /// Numeric id, 1 or 2
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player #1",
            Player::Two => "Player #2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Player::from_id(1), Ok(Player::One));
        assert_eq!(Player::from_id(2), Ok(Player::Two));
        assert_eq!(Player::from_id(0), Err(BoardError::InvalidPlayerId(0)));
        assert_eq!(Player::from_id(3), Err(BoardError::InvalidPlayerId(3)));
    }

    #[test]
    fn test_id_roundtrip() {
        for player in [Player::One, Player::Two] {
            assert_eq!(Player::from_id(player.id()), Ok(player));
        }
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::One.name(), "Player #1");
        assert_eq!(Player::Two.name(), "Player #2");
    }
}
