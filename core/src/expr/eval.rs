use super::{
    error::Error,
    position::{Span, WithSpan},
    token::Token,
};

/// Default for [`Config::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// Maximum number of nested brackets.
    /// Each level of nesting is one level of recursion.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Evaluate a tokenized expression.
///
/// Multiplication and division are applied left to right before
/// signs are folded and the remaining terms are summed.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(tokens)))]
pub fn evaluate(tokens: &[WithSpan<Token>], config: &Config) -> Result<f64, WithSpan<Error>> {
    let Some(first) = tokens.first() else {
        return Err(WithSpan::spanning(Error::InvalidExpression, Span::before(0)));
    };

    let (_, value) = eval_group(tokens, first.span, 0, config)?;
    Ok(value)
}

/// Evaluate one nesting level.
///
/// # Returns
/// `(consumed, value)` where `consumed` is the number of tokens of the level
/// including its closing `)`, if any.
fn eval_group(
    tokens: &[WithSpan<Token>],
    open: Span,
    depth: usize,
    config: &Config,
) -> Result<(usize, f64), WithSpan<Error>> {
    if depth > config.max_depth {
        return Err(WithSpan::spanning(Error::NestingTooDeep, open));
    }

    let mut cleared = Vec::with_capacity(tokens.len());
    let mut idx = 0;
    let mut closed = false;
    while let Some(token) = tokens.get(idx) {
        idx += 1;
        match token.value {
            Token::ParenLeft => {
                let (consumed, value) = eval_group(&tokens[idx..], token.span, depth + 1, config)
                    .map_err(|err| group_error(err, token.span))?;
                let close = &tokens[idx + consumed - 1];
                cleared.push(WithSpan::spanning(
                    Token::Number(value),
                    token.span.to(&close.span),
                ));
                idx += consumed;
            }

            Token::ParenRight => {
                if depth == 0 {
                    return Err(WithSpan::spanning(
                        Error::IncorrectBracketSequence,
                        token.span,
                    ));
                }
                closed = true;
                break;
            }

            _ => cleared.push(*token),
        }
    }

    if depth > 0 && !closed {
        return Err(WithSpan::spanning(Error::IncorrectBracketSequence, open));
    }

    let reduced = reduce_products(cleared)?;
    let value = reduce_sum(&reduced)?;
    Ok((idx, value))
}

/// A group that could not be evaluated is an invalid expression as a whole.
/// Structural errors keep their kind.
fn group_error(err: WithSpan<Error>, open: Span) -> WithSpan<Error> {
    match err.value {
        Error::NestingTooDeep | Error::IncorrectBracketSequence => err,
        _ => WithSpan::spanning(Error::InvalidExpression, open),
    }
}

/// Apply `*` and `/` left to right.
///
/// # Returns
/// Numbers with the `+` and `-` between them.
fn reduce_products(tokens: Vec<WithSpan<Token>>) -> Result<Vec<WithSpan<Token>>, WithSpan<Error>> {
    let mut reduced: Vec<WithSpan<Token>> = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        if !matches!(token.value, Token::Star | Token::SlashForward) {
            reduced.push(token);
            continue;
        }

        let Some(WithSpan {
            value: Token::Number(left),
            span: left_span,
        }) = reduced.last_mut()
        else {
            return Err(WithSpan::spanning(Error::MultipleOperands, token.span));
        };
        let Some(WithSpan {
            value: Token::Number(right),
            span: right_span,
        }) = tokens.next()
        else {
            return Err(WithSpan::spanning(Error::MultipleOperands, token.span));
        };

        if token.value == Token::SlashForward {
            if right == 0.0 {
                return Err(WithSpan::spanning(Error::DivisionByZero, right_span));
            }
            *left /= right;
        } else {
            *left *= right;
        }
        *left_span = left_span.to(&right_span);
    }

    Ok(reduced)
}

/// Fold signs into the numbers following them and sum the result.
/// No numbers sum to `0`.
fn reduce_sum(tokens: &[WithSpan<Token>]) -> Result<f64, WithSpan<Error>> {
    let mut sign = 1.0;
    let mut sum = 0.0;
    for token in tokens {
        match token.value {
            Token::Minus => sign = -sign,
            Token::Plus => {}
            Token::Number(value) => {
                sum += value * sign;
                sign = 1.0;
            }
            _ => return Err(WithSpan::spanning(Error::UndefinedOperand, token.span)),
        }
    }

    Ok(sum)
}
