//! Errors raised while entering data: building expenses, editing the roster
//! or the rate table.
//!
//! The settlement core itself never fails; see [`crate::settlement`].
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("\"{0}\" is not a member of this trip")]
    UnknownMember(String),
    #[error("\"{0}\" already present!")]
    ExistingMember(String),
    #[error("Invalid member name: {0:?}")]
    InvalidMember(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),
    #[error("Equal split needs at least one beneficiary")]
    MissingBeneficiaries,
    #[error("Allocations sum to {allocated}, expected {total}")]
    UnbalancedSplit { allocated: f64, total: f64 },
    #[error("Description is required")]
    MissingDescription,
}
