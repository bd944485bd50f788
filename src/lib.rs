//! Shared-expense settlement for group trips.
//!
//! Expenses in mixed currencies are normalized into one reference currency,
//! folded into a balance per member, then reduced to a short list of transfers.
//!
//! ```
//! use travelsplit::{compute_settlement, Balances};
//!
//! let balances = Balances::from([
//!     ("A".to_string(), -300.0),
//!     ("B".to_string(), 100.0),
//!     ("C".to_string(), 200.0),
//! ]);
//! let transfers = compute_settlement(&balances);
//! assert_eq!(transfers.len(), 2);
//! assert_eq!((transfers[0].to.as_str(), transfers[0].amount), ("C", 200));
//! ```

pub mod balance;
pub mod entry;
pub mod error;
pub mod rates;
pub mod roster;
pub mod schemas;
pub mod server;
pub mod settings;
pub mod settlement;

pub use balance::{compute_balances, contributions, total_spent};
pub use entry::{build_expense, ExpenseDraft};
pub use error::SplitError;
pub use rates::{ExchangeRate, RateTable};
pub use roster::Roster;
pub use schemas::{
    Balances, Contribution, Expense, MemberName, OrphanedBalance, Settlement, Split, Transfer,
};
pub use settlement::{compute_settlement, settle, SETTLED_EPSILON};
