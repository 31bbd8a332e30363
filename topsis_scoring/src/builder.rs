pub use crate::config::*;
use crate::run_topsis;

/// A builder for assembling a decision matrix row by row.
///
/// ```
/// pub use topsis_scoring::builder::Builder;
/// pub use topsis_scoring::Impact;
/// # use topsis_scoring::InvalidInput;
///
/// let mut builder = Builder::new(&[1.0, 2.0], &[Impact::Minimize, Impact::Maximize])?;
///
/// builder.add_alternative("budget", &[450.0, 6.1])?;
/// builder.add_alternative("flagship", &[999.0, 9.3])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.rows.len(), 2);
///
/// # Ok::<(), InvalidInput>(())
/// ```
pub struct Builder {
    pub(crate) _weights: Vec<f64>,
    pub(crate) _impacts: Vec<Impact>,
    pub(crate) _alternatives: Vec<Alternative>,
}

impl Builder {
    pub fn new(weights: &[f64], impacts: &[Impact]) -> Result<Builder, InvalidInput> {
        if impacts.len() != weights.len() {
            return Err(InvalidInput::ImpactCountMismatch {
                impacts: impacts.len(),
                criteria: weights.len(),
            });
        }
        Ok(Builder {
            _weights: weights.to_vec(),
            _impacts: impacts.to_vec(),
            _alternatives: Vec::new(),
        })
    }

    /// Adds one labeled row of criterion values.
    ///
    /// The first row fixes the expected width of the matrix.
    pub fn add_alternative(&mut self, label: &str, values: &[f64]) -> Result<(), InvalidInput> {
        if let Some(first) = self._alternatives.first() {
            if values.len() != first.values.len() {
                return Err(InvalidInput::RaggedRow {
                    label: label.to_string(),
                    row: self._alternatives.len(),
                    found: values.len(),
                    expected: first.values.len(),
                });
            }
        }
        self._alternatives.push(Alternative {
            label: label.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    /// Validates the assembled matrix and runs the scorer.
    pub fn run(&self) -> Result<ScoringResult, InvalidInput> {
        run_topsis(&self._alternatives, &self._weights, &self._impacts)
    }
}
