use crate::pairing::Side;

/// Failure kinds a bijection can report through its `Result`-returning API.
///
/// Lookup misses and conflicts on the plain `insert` are not errors; they
/// surface as `Option`/`bool`. A bijective-state violation detected inside an
/// ordinary operation panics instead, since it can only mean a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `insert_or_fail` found one side already occupied.
    #[error("pairing conflict: the {side} element is already held by {existing}")]
    Conflict { side: Side, existing: String },
    /// Caller-supplied indexes failed the bijectivity audit.
    #[error("bijective state violated: {0}")]
    Inconsistent(String),
    /// Mutation attempted through a read-only wrapper.
    #[error("bijection is read-only")]
    ReadOnly,
}

pub type Result<T> = std::result::Result<T, Error>;
