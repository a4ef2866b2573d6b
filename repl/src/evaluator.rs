//! The seam between the shell and the dice engine

use std::error::Error;

use derive_more::derive::{Display, Error};
use rand::Rng;

/// Something that can turn a dice expression into a printable result
pub trait Evaluator {
    fn evaluate(&mut self, expression: &str) -> Result<String, EvalError>;
}

/// An expression could not be evaluated
#[derive(Debug, Display, Error)]
#[display("Cannot roll `{expression}`")]
pub struct EvalError {
    expression: String,
    source: Box<dyn Error + Send + Sync + 'static>,
}

impl EvalError {
    pub fn new(
        expression: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            expression: expression.into(),
            source: source.into(),
        }
    }

    /// The expression that failed
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// Evaluate expressions as dice formulas, rolling them with the given rng
#[derive(Debug, Clone)]
pub struct DiceEvaluator<R> {
    rng: R,
}

impl<R> DiceEvaluator<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Evaluator for DiceEvaluator<R> {
    fn evaluate(&mut self, expression: &str) -> Result<String, EvalError> {
        dndcm_dice::roll_to_str(expression, &mut self.rng)
            .map_err(|err| EvalError::new(expression, err))
    }
}
