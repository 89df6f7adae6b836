use rust_decimal::Decimal;

/// Errors that abort a tax computation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInput),
}

/// Reason a snapshot was rejected before any calculator ran.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("taxpayer category is not set")]
    MissingCategory,
    #[error("revenue must not be negative, got {0}")]
    NegativeRevenue(Decimal),
    #[error("{0} is too large to compute")]
    AmountOverflow(&'static str),
}

impl From<InvalidInput> for TaxError {
    fn from(reason: InvalidInput) -> Self {
        TaxError::InvalidInput(reason)
    }
}

/// Problems found when validating a set of rate tables loaded from outside.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("default location '{0}' is missing from the location table")]
    MissingDefaultLocation(String),
    #[error("{table} table is empty")]
    EmptyTable { table: &'static str },
    #[error("{table} table bounds must be strictly ascending (tier {index})")]
    UnorderedTiers { table: &'static str, index: usize },
    #[error("{table} table must end with an unbounded tier")]
    BoundedTerminalTier { table: &'static str },
    #[error("only the last tier of the {table} table may be unbounded (tier {index})")]
    UnboundedInnerTier { table: &'static str, index: usize },
}
