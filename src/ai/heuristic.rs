use crate::game::{count_windows, good_spots, GameConfig, Grid, Mark};

/// Trait for evaluating a grid from a player's perspective.
///
/// Positive scores are good for `mark`. Both shipped evaluators weigh the
/// opponent's threats more heavily than the player's own.
pub trait Heuristic: Send {
    fn score(&self, grid: &Grid, mark: Mark, config: &GameConfig) -> f64;
}

/// Which evaluator the minimax engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    OpenLine,
    WindowCount,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::OpenLine => Box::new(OpenLineHeuristic),
            HeuristicKind::WindowCount => Box::new(WindowCountHeuristic),
        }
    }
}

/// `base^exp`, saturating at `f64::MAX` instead of overflowing to infinity.
fn pow(base: f64, exp: isize) -> f64 {
    let exp = exp.clamp(i32::MIN as isize, i32::MAX as isize) as i32;
    base.powi(exp).min(f64::MAX)
}

/// `weight * count`, zero when nothing was counted so a huge weight never
/// turns an absent feature into NaN.
fn term(weight: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        weight * count as f64
    }
}

/// Counts the empty cells that would extend lines of three or more.
///
/// For each run length `k` in `3..inarow` the player's distinct good spots are
/// weighted by `100^(k-3)` and the opponent's by ten times that. Completed
/// lines get weight `100^(inarow-3)` with the same tenfold penalty.
pub struct OpenLineHeuristic;

impl OpenLineHeuristic {
    const OPPONENT_FACTOR: f64 = 10.0;
}

impl Heuristic for OpenLineHeuristic {
    fn score(&self, grid: &Grid, mark: Mark, config: &GameConfig) -> f64 {
        let inarow = config.inarow;
        let opp = mark.other();
        let mut score = 0.0;

        for k in 3..inarow {
            let weight = pow(100.0, k as isize - 3);
            score += term(weight, good_spots(grid, inarow, k, mark).len());
            score -= Self::OPPONENT_FACTOR * term(weight, good_spots(grid, inarow, k, opp).len());
        }

        let weight = pow(100.0, inarow as isize - 3);
        score += term(weight, count_windows(grid, inarow, inarow, mark));
        score -= Self::OPPONENT_FACTOR * term(weight, count_windows(grid, inarow, inarow, opp));

        score
    }
}

/// Counts open windows at every fill level, with a bonus for vertically
/// stacked good spots.
///
/// The good-spot term reuses the last run length of the window loop
/// (`inarow - 2`), not `inarow - 1`.
pub struct WindowCountHeuristic;

impl WindowCountHeuristic {
    const OPPONENT_FACTOR: f64 = 5.0;

    /// Number of pairs of spots stacked directly on top of each other in the
    /// same column.
    fn stacked_pairs(spots: &[(usize, usize)]) -> usize {
        let mut by_column: Vec<(usize, usize)> = spots.iter().map(|&(r, c)| (c, r)).collect();
        by_column.sort_unstable();
        by_column
            .windows(2)
            .filter(|pair| pair[0].0 == pair[1].0 && pair[1].1 == pair[0].1 + 1)
            .count()
    }
}

impl Heuristic for WindowCountHeuristic {
    fn score(&self, grid: &Grid, mark: Mark, config: &GameConfig) -> f64 {
        let inarow = config.inarow;
        let opp = mark.other();
        let mut score = 0.0;

        let mut last_k = None;
        for k in 0..inarow.saturating_sub(1) {
            let weight = pow(10.0, k as isize);
            score += term(weight, count_windows(grid, inarow, k, mark));
            score -= Self::OPPONENT_FACTOR * term(weight, count_windows(grid, inarow, k, opp));
            last_k = Some(k);
        }

        if let Some(k) = last_k {
            let spots = good_spots(grid, inarow, k, mark);
            let spots_opp = good_spots(grid, inarow, k, opp);

            let weight = pow(10.0, inarow as isize - 1);
            score += term(weight, spots.len());
            score -= Self::OPPONENT_FACTOR * term(weight, spots_opp.len());

            let adjacency = pow(10.0, inarow as isize + 1);
            score += term(adjacency, Self::stacked_pairs(&spots));
            score -= term(adjacency, Self::stacked_pairs(&spots_opp));
        }

        let weight = pow(10.0, inarow as isize + 1);
        score += term(weight, count_windows(grid, inarow, inarow, mark));
        score -= Self::OPPONENT_FACTOR * term(weight, count_windows(grid, inarow, inarow, opp));

        score
    }
}
