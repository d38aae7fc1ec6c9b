/// Index of a code point in the source expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_more::Deref, derive_more::From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharPos(pub usize);

impl std::ops::Add<usize> for CharPos {
    type Output = Self;
    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}

/// Half open range of code points, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: CharPos,
    pub end: CharPos,
}

impl Span {
    pub fn new(start: impl Into<CharPos>, end: impl Into<CharPos>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Span a single position.
    pub fn at(position: impl Into<CharPos>) -> Self {
        let pos = position.into();
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Zero width span before the position.
    pub fn before(position: impl Into<CharPos>) -> Self {
        let pos = position.into();
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Self {
        Self {
            start: CharPos(self.start.0.min(other.start.0)),
            end: CharPos(self.end.0.max(other.end.0)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithSpan<T> {
    pub value: T,
    pub span: Span,
}

impl<T> WithSpan<T> {
    pub fn new(value: T, start: impl Into<CharPos>, end: impl Into<CharPos>) -> Self {
        Self {
            value,
            span: Span::new(start, end),
        }
    }

    pub fn spanning(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Span a single position.
    pub fn at(value: T, pos: impl Into<CharPos>) -> Self {
        Self {
            value,
            span: Span::at(pos),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn span_to() {
        let left = Span::new(2, 4);
        let right = Span::new(7, 9);
        assert_eq!(left.to(&right), Span::new(2, 9));
        assert_eq!(right.to(&left), Span::new(2, 9));
    }

    #[test]
    fn span_before_is_empty() {
        assert!(Span::before(3).is_empty());
        assert!(!Span::at(3).is_empty());
    }
}
