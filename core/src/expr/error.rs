/// Reason an expression was rejected.
///
/// The `Display` text is the message reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// Nothing to evaluate, or a group did not reduce to a number.
    /// e.g. ``, `()`
    #[error("invalid expression")]
    InvalidExpression,

    /// Right operand of `/` is `0`.
    #[error("division by zero")]
    DivisionByZero,

    /// Closing bracket without an opening one, or an unclosed opening bracket.
    #[error("incorrect count of brackets")]
    IncorrectBracketSequence,

    /// Two operators in a row, or `*` or `/` without a number on each side.
    /// e.g. `2++3`, `*2`
    #[error("multiple operands in a row")]
    MultipleOperands,

    /// A numeric literal could not be parsed.
    /// e.g. `2..2`
    #[error("failure to convert to float64")]
    ConvertingToFloat64,

    /// Character outside of the expression alphabet.
    #[error("undefined operand")]
    UndefinedOperand,

    /// Brackets are nested deeper than the configured limit.
    #[error("expression nested too deeply")]
    NestingTooDeep,
}
