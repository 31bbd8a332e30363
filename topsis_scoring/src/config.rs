// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One row of a decision matrix: a labeled alternative and its criterion
/// values, in column order.
#[derive(PartialEq, Debug, Clone)]
pub struct Alternative {
    pub label: String,
    pub values: Vec<f64>,
}

/// The preference direction of one criterion column.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher values are better (a benefit criterion).
    Maximize,
    /// Lower values are better (a cost criterion).
    Minimize,
}

// ******** Output data structures *********

/// One scored row: the original label and values plus the derived
/// closeness score and rank.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoredAlternative {
    pub label: String,
    pub values: Vec<f64>,
    /// Relative closeness to the ideal point, in [0, 1]. Higher is better.
    pub score: f64,
    /// 1 is the best alternative. Equal scores keep their input order.
    pub rank: u32,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ScoringResult {
    /// The scored rows, in the same order as the input matrix.
    pub rows: Vec<ScoredAlternative>,
}

impl ScoringResult {
    /// The rank-1 alternative.
    pub fn best(&self) -> Option<&ScoredAlternative> {
        self.rows.iter().find(|r| r.rank == 1)
    }
}

// ********* Errors **********

/// Input violations. All of them are detected before any arithmetic runs:
/// the scorer either returns a complete result or one of these.
#[derive(PartialEq, Debug, Clone)]
pub enum InvalidInput {
    NotEnoughAlternatives {
        rows: usize,
    },
    NotEnoughCriteria {
        columns: usize,
    },
    /// A row whose width differs from the first row of the matrix.
    RaggedRow {
        label: String,
        row: usize,
        found: usize,
        expected: usize,
    },
    WeightCountMismatch {
        weights: usize,
        criteria: usize,
    },
    ImpactCountMismatch {
        impacts: usize,
        criteria: usize,
    },
    NonFiniteWeight {
        column: usize,
        weight: f64,
    },
    NonPositiveWeight {
        column: usize,
        weight: f64,
    },
    NonFiniteValue {
        label: String,
        row: usize,
        column: usize,
        value: f64,
    },
}

impl Error for InvalidInput {}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::NotEnoughAlternatives { rows } => {
                write!(f, "the decision matrix needs at least 2 rows, found {}", rows)
            }
            InvalidInput::NotEnoughCriteria { columns } => {
                write!(
                    f,
                    "the decision matrix needs at least 2 criterion columns, found {}",
                    columns
                )
            }
            InvalidInput::RaggedRow {
                label,
                row,
                found,
                expected,
            } => {
                write!(
                    f,
                    "row {} ({:?}) has {} values, expected {} as in the first row",
                    row, label, found, expected
                )
            }
            InvalidInput::WeightCountMismatch { weights, criteria } => {
                write!(f, "{} weights provided for {} criteria", weights, criteria)
            }
            InvalidInput::ImpactCountMismatch { impacts, criteria } => {
                write!(f, "{} impacts provided for {} criteria", impacts, criteria)
            }
            InvalidInput::NonFiniteWeight { column, weight } => {
                write!(
                    f,
                    "the weight for column {} is not a finite number: {}",
                    column, weight
                )
            }
            InvalidInput::NonPositiveWeight { column, weight } => {
                write!(
                    f,
                    "the weight for column {} must be > 0, found {}",
                    column, weight
                )
            }
            InvalidInput::NonFiniteValue {
                label,
                row,
                column,
                value,
            } => {
                write!(
                    f,
                    "the value at row {} ({:?}), column {} is not a finite number: {}",
                    row, label, column, value
                )
            }
        }
    }
}
