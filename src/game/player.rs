use super::board::Cell;

/// A player's piece. Serialized as the wire values 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    One,
    Two,
}

impl Mark {
    /// Get the other player
    pub fn other(self) -> Mark {
        match self {
            Mark::One => Mark::Two,
            Mark::Two => Mark::One,
        }
    }

    /// Convert mark to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::One => Cell::One,
            Mark::Two => Cell::Two,
        }
    }

    /// Wire value of this mark (1 or 2).
    pub fn value(self) -> u8 {
        match self {
            Mark::One => 1,
            Mark::Two => 2,
        }
    }

    /// Parse a wire value; anything other than 1 or 2 is rejected.
    pub fn from_value(value: u8) -> Option<Mark> {
        match value {
            1 => Some(Mark::One),
            2 => Some(Mark::Two),
            _ => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Mark::One => "Player 1",
            Mark::Two => "Player 2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_mark() {
        assert_eq!(Mark::One.other(), Mark::Two);
        assert_eq!(Mark::Two.other(), Mark::One);
    }

    #[test]
    fn test_other_is_three_minus_value() {
        for mark in [Mark::One, Mark::Two] {
            assert_eq!(mark.other().value(), 3 - mark.value());
        }
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Mark::from_value(1), Some(Mark::One));
        assert_eq!(Mark::from_value(2), Some(Mark::Two));
        assert_eq!(Mark::from_value(0), None);
        assert_eq!(Mark::from_value(3), None);
    }

    #[test]
    fn test_mark_name() {
        assert_eq!(Mark::One.name(), "Player 1");
        assert_eq!(Mark::Two.name(), "Player 2");
    }
}
