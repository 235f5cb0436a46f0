use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("The reference is empty, so the error rate is undefined.")]
    EmptyReference,

    #[error("The {name} cost is negative, but edit costs must be non-negative.")]
    NegativeCost { name: &'static str },

    #[error("No sentence pair with a non-empty reference was evaluated.")]
    EmptyCorpus,
}
