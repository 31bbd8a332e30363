mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

pub use crate::config::*;

/// Runs the TOPSIS scoring algorithm on the given decision matrix.
///
/// Arguments:
/// * `matrix` the rows to rank, one labeled alternative per row
/// * `weights` the relative importance of each criterion column (finite, > 0)
/// * `impacts` the preference direction of each criterion column
///
/// All the input checks run before any arithmetic: the call either returns
/// a complete ranking or an [InvalidInput]. The rows of the result keep the
/// input order; the ranking is carried by the `rank` field.
pub fn run_topsis(
    matrix: &[Alternative],
    weights: &[f64],
    impacts: &[Impact],
) -> Result<ScoringResult, InvalidInput> {
    info!(
        "run_topsis: processing {:?} alternatives with {:?} criteria",
        matrix.len(),
        weights.len()
    );
    let num_criteria = validate(matrix, weights, impacts)?;

    let norms = column_norms(matrix, num_criteria);
    debug!("run_topsis: column norms: {:?}", norms);

    // A column of all zeros has no norm to divide by. Its normalized value
    // is defined as 0 for every row, which makes the column neutral.
    let weighted: Vec<Vec<f64>> = matrix
        .iter()
        .map(|alt| {
            alt.values
                .iter()
                .enumerate()
                .map(|(j, v)| {
                    if norms[j] == 0.0 {
                        0.0
                    } else {
                        v / norms[j] * weights[j]
                    }
                })
                .collect()
        })
        .collect();

    let (ideal_best, ideal_worst) = ideal_points(&weighted, impacts, num_criteria);
    debug!(
        "run_topsis: ideal best: {:?} ideal worst: {:?}",
        ideal_best, ideal_worst
    );

    let scores: Vec<f64> = weighted
        .iter()
        .map(|row| {
            let dist_best = euclidean(row, &ideal_best);
            let dist_worst = euclidean(row, &ideal_worst);
            // A row identical to both ideal points (all-equal data) scores 0.
            if dist_best == 0.0 && dist_worst == 0.0 {
                0.0
            } else {
                dist_worst / (dist_best + dist_worst)
            }
        })
        .collect();
    debug!("run_topsis: scores: {:?}", scores);

    let ranks = assign_ranks(&scores);

    let rows: Vec<ScoredAlternative> = matrix
        .iter()
        .zip(scores.iter().zip(ranks.iter()))
        .map(|(alt, (&score, &rank))| ScoredAlternative {
            label: alt.label.clone(),
            values: alt.values.clone(),
            score,
            rank,
        })
        .collect();
    Ok(ScoringResult { rows })
}

fn validate(
    matrix: &[Alternative],
    weights: &[f64],
    impacts: &[Impact],
) -> Result<usize, InvalidInput> {
    if matrix.len() < 2 {
        return Err(InvalidInput::NotEnoughAlternatives { rows: matrix.len() });
    }
    let num_criteria = matrix[0].values.len();
    if num_criteria < 2 {
        return Err(InvalidInput::NotEnoughCriteria {
            columns: num_criteria,
        });
    }
    for (row, alt) in matrix.iter().enumerate() {
        if alt.values.len() != num_criteria {
            return Err(InvalidInput::RaggedRow {
                label: alt.label.clone(),
                row,
                found: alt.values.len(),
                expected: num_criteria,
            });
        }
    }
    if weights.len() != num_criteria {
        return Err(InvalidInput::WeightCountMismatch {
            weights: weights.len(),
            criteria: num_criteria,
        });
    }
    if impacts.len() != num_criteria {
        return Err(InvalidInput::ImpactCountMismatch {
            impacts: impacts.len(),
            criteria: num_criteria,
        });
    }
    for (column, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() {
            return Err(InvalidInput::NonFiniteWeight { column, weight });
        }
        if weight <= 0.0 {
            return Err(InvalidInput::NonPositiveWeight { column, weight });
        }
    }
    for (row, alt) in matrix.iter().enumerate() {
        for (column, &value) in alt.values.iter().enumerate() {
            if !value.is_finite() {
                return Err(InvalidInput::NonFiniteValue {
                    label: alt.label.clone(),
                    row,
                    column,
                    value,
                });
            }
        }
    }
    Ok(num_criteria)
}

fn column_norms(matrix: &[Alternative], num_criteria: usize) -> Vec<f64> {
    let mut norms = vec![0.0_f64; num_criteria];
    for alt in matrix.iter() {
        for (j, v) in alt.values.iter().enumerate() {
            norms[j] += v * v;
        }
    }
    norms.iter().map(|s| s.sqrt()).collect()
}

fn ideal_points(
    weighted: &[Vec<f64>],
    impacts: &[Impact],
    num_criteria: usize,
) -> (Vec<f64>, Vec<f64>) {
    let mut best = vec![0.0_f64; num_criteria];
    let mut worst = vec![0.0_f64; num_criteria];
    for (j, impact) in impacts.iter().enumerate() {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for row in weighted.iter() {
            lo = lo.min(row[j]);
            hi = hi.max(row[j]);
        }
        match impact {
            Impact::Maximize => {
                best[j] = hi;
                worst[j] = lo;
            }
            Impact::Minimize => {
                best[j] = lo;
                worst[j] = hi;
            }
        }
    }
    (best, worst)
}

fn euclidean(row: &[f64], point: &[f64]) -> f64 {
    row.iter()
        .zip(point.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

// The sort is stable, so rows with equal scores keep their input order.
fn assign_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut ranks = vec![0_u32; scores.len()];
    for (pos, &idx) in order.iter().enumerate() {
        ranks[idx] = (pos + 1) as u32;
    }
    ranks
}
