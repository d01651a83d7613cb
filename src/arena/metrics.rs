use std::fmt;

/// One of the two agents in a match, independent of who moved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Result of a single game from the match's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Option<Side>,
    pub game_length: usize,
}

/// Running tally for a match between agents A and B.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    total_moves: usize,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result.winner {
            Some(Side::A) => self.a_wins += 1,
            Some(Side::B) => self.b_wins += 1,
            None => self.draws += 1,
        }
        self.total_moves += result.game_length;
    }

    pub fn games(&self) -> usize {
        self.a_wins + self.b_wins + self.draws
    }

    /// Fraction of games won by `side`.
    pub fn win_rate(&self, side: Side) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        let wins = match side {
            Side::A => self.a_wins,
            Side::B => self.b_wins,
        };
        wins as f32 / games as f32
    }

    pub fn draw_rate(&self) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.draws as f32 / games as f32
    }

    /// Average number of moves per game.
    pub fn average_game_length(&self) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.total_moves as f32 / games as f32
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games: {}, A wins: {}, B wins: {}, draws: {}, avg length: {:.1}",
            self.games(),
            self.a_wins,
            self.b_wins,
            self.draws,
            self.average_game_length()
        )
    }
}
