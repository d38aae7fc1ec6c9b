#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    Minus,
    Number(f64),
    ParenLeft,
    ParenRight,
    Plus,
    SlashForward,
    Star,
}

impl Token {
    /// If the token is one of `+`, `-`, `*`, `/`.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Star | Self::SlashForward
        )
    }
}
