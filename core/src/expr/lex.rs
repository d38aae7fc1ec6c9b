use super::{
    error::Error,
    position::{CharPos, Span, WithSpan},
    token::Token,
};
use std::iter;

/// Scan `src` into tokens.
/// Scanning stops at the first invalid character.
///
/// Implicit multiplication is inserted between `)` and a following `(` or number,
/// e.g. `(7)(5)` and `(7)5` are tokenized as `(7)*(5)` and `(7)*5`.
/// A number followed by `(` is left as is.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "trace", skip(src), fields(src = %src.as_ref()))
)]
pub fn tokenize(src: impl AsRef<str>) -> Result<Vec<WithSpan<Token>>, WithSpan<Error>> {
    let mut lexer = Lexer::new(src.as_ref());
    match lexer.tokenize() {
        Ok(()) => Ok(lexer.tokens),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(?err, "tokenize failed");

            Err(err)
        }
    }
}

struct Scanner<'a> {
    /// Iterator over src characters.
    iter: iter::Peekable<iter::Enumerate<std::str::Chars<'a>>>,

    /// Position of the last consumed character.
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        let iter = src.chars().enumerate().peekable();
        Self { iter, pos: 0 }
    }

    /// Consume the next character if it satisfies the predicate.
    pub fn next_if(&mut self, predicate: impl FnOnce(&char) -> bool) -> Option<char> {
        let (idx, char) = self.iter.next_if(|(_, char)| predicate(char))?;
        #[cfg(feature = "tracing")]
        tracing::trace!(?char);

        self.pos = idx;
        Some(char)
    }
}

impl<'a> iter::Iterator for Scanner<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        let (idx, char) = self.iter.next()?;
        #[cfg(feature = "tracing")]
        tracing::trace!(?char);

        self.pos = idx;
        Some(char)
    }
}

struct Lexer<'a> {
    it: Scanner<'a>,
    tokens: Vec<WithSpan<Token>>,

    /// Positions of the currently unclosed `(`.
    open: Vec<CharPos>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            it: Scanner::new(src),
            tokens: vec![],
            open: vec![],
        }
    }

    pub fn tokenize(&mut self) -> Result<(), WithSpan<Error>> {
        while let Some(char) = self.it.next() {
            self.match_token(char)?;
        }

        if let Some(pos) = self.open.last() {
            return Err(WithSpan::at(Error::IncorrectBracketSequence, *pos));
        }
        Ok(())
    }

    fn last(&self) -> Option<&Token> {
        self.tokens.last().map(|token| &token.value)
    }
}

impl<'a> Lexer<'a> {
    fn next_while<F>(&mut self, predicate: F) -> Vec<char>
    where
        F: Fn(char) -> bool,
    {
        iter::from_fn(|| self.it.next_if(|ch| predicate(*ch))).collect()
    }

    /// Insert a `*` if the previous token closes a group.
    fn implicit_product(&mut self, pos: usize) {
        if matches!(self.last(), Some(Token::ParenRight)) {
            self.tokens
                .push(WithSpan::spanning(Token::Star, Span::before(pos)));
        }
    }

    fn push_operator(&mut self, op: Token, pos: usize) -> Result<(), WithSpan<Error>> {
        if self.last().is_some_and(Token::is_operator) {
            return Err(WithSpan::at(Error::MultipleOperands, pos));
        }
        self.tokens.push(WithSpan::at(op, pos));
        Ok(())
    }

    fn match_token(&mut self, char: char) -> Result<(), WithSpan<Error>> {
        let pos = self.it.pos;
        match char {
            '(' => {
                self.implicit_product(pos);
                self.open.push(CharPos(pos));
                self.tokens.push(WithSpan::at(Token::ParenLeft, pos));
            }

            ')' => {
                if self.open.pop().is_none() {
                    return Err(WithSpan::at(Error::IncorrectBracketSequence, pos));
                }
                self.tokens.push(WithSpan::at(Token::ParenRight, pos));
            }

            '+' => self.push_operator(Token::Plus, pos)?,
            '-' => self.push_operator(Token::Minus, pos)?,
            '*' => self.push_operator(Token::Star, pos)?,
            '/' => self.push_operator(Token::SlashForward, pos)?,

            // Non ASCII digits start a number but fail to parse.
            char if char.is_numeric() => {
                let rest = self.next_while(|ch| ch.is_numeric() || ch == '.');
                let end = pos + 1 + rest.len();
                let value = iter::once(char).chain(rest).collect::<String>();
                let number = match value.parse::<f64>() {
                    Ok(number) if number.is_finite() => number,
                    _ => return Err(WithSpan::new(Error::ConvertingToFloat64, pos, end)),
                };

                self.implicit_product(pos);
                self.tokens
                    .push(WithSpan::new(Token::Number(number), pos, end));
            }

            _ => return Err(WithSpan::at(Error::UndefinedOperand, pos)),
        }

        Ok(())
    }
}
