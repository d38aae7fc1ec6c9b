//! Arithmetic expressions over `f64`.
//!
//! Supports `+`, `-`, `*`, `/`, brackets, and implicit multiplication
//! after a closing bracket, e.g. `(7)(5)`.
//! Evaluation happens in two phases:
//! 1. [`tokenize`] scans the source into [`Token`]s, validating brackets and operator adjacency.
//! 2. [`evaluate`] resolves each bracket level recursively, applying `*` and `/`
//!    before folding signs and summing.

mod error;
mod eval;
mod lex;
mod position;
mod token;

pub use error::Error;
pub use eval::{Config, DEFAULT_MAX_DEPTH, evaluate};
pub use lex::tokenize;
pub use position::{CharPos, Span, WithSpan};
pub use token::Token;

/// Evaluate an expression with the default [`Config`].
pub fn calc(expression: impl AsRef<str>) -> Result<f64, Error> {
    Calculator::default().calc(expression)
}

/// Evaluates expressions with a fixed [`Config`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    config: Config,
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calc(&self, expression: impl AsRef<str>) -> Result<f64, Error> {
        self.calc_spanned(expression).map_err(|err| err.value)
    }

    /// Evaluate an expression.
    /// On failure, the error carries the position of the offending input.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, expression), fields(expression = %expression.as_ref()))
    )]
    pub fn calc_spanned(&self, expression: impl AsRef<str>) -> Result<f64, WithSpan<Error>> {
        let tokens = tokenize(expression)?;
        evaluate(&tokens, &self.config)
    }
}
