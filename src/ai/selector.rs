use rand::Rng;

use crate::error::AgentError;

/// Pick uniformly at random among the columns sharing the highest score.
///
/// Scores are compared exactly; the engines produce sums of integral
/// weights so equal positions really do tie. NaN ranks as `-∞`.
pub fn select_best<R: Rng + ?Sized>(
    scored: &[(usize, f64)],
    rng: &mut R,
) -> Result<usize, AgentError> {
    let rank = |score: f64| if score.is_nan() { f64::NEG_INFINITY } else { score };
    let best = scored
        .iter()
        .map(|&(_, score)| rank(score))
        .fold(f64::NEG_INFINITY, f64::max);

    let candidates: Vec<usize> = scored
        .iter()
        .filter(|&&(_, score)| rank(score) == best)
        .map(|&(col, _)| col)
        .collect();

    if candidates.is_empty() {
        return Err(AgentError::NoLegalMoves);
    }
    Ok(candidates[rng.random_range(0..candidates.len())])
}

/// Pick a column uniformly at random.
pub fn select_random<R: Rng + ?Sized>(
    columns: &[usize],
    rng: &mut R,
) -> Result<usize, AgentError> {
    if columns.is_empty() {
        return Err(AgentError::NoLegalMoves);
    }
    Ok(columns[rng.random_range(0..columns.len())])
}
