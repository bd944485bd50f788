use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::SplitError;
use crate::rates::RateTable;
use crate::roster::Roster;
use crate::schemas::{Expense, MemberName, Split};

/// Allocations may miss the total by less than this, in expense currency.
pub const ALLOCATION_TOLERANCE: f64 = 0.1;

/// Raw expense as typed into the form, before the rate is captured.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    pub payer: MemberName,
    pub amount: f64,
    pub currency: String,
    #[serde(flatten)]
    pub split: Split,
    #[serde(default)]
    pub created_by: Option<MemberName>,
}

/// Validates a draft against the roster and freezes the current rate into it.
pub fn build_expense(
    draft: ExpenseDraft,
    roster: &Roster,
    rates: &RateTable,
    now: DateTime<Utc>,
) -> Result<Expense, SplitError> {
    if draft.description.trim().is_empty() {
        return Err(SplitError::MissingDescription);
    }
    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(SplitError::InvalidAmount(draft.amount.to_string()));
    }
    roster.require(&draft.payer)?;

    let split = match draft.split {
        Split::Equal { beneficiaries } => {
            if beneficiaries.is_empty() {
                return Err(SplitError::MissingBeneficiaries);
            }
            for member in &beneficiaries {
                roster.require(member)?;
            }
            Split::Equal { beneficiaries }
        }
        Split::Custom { custom_allocations } => {
            let custom_allocations: BTreeMap<MemberName, f64> = custom_allocations
                .into_iter()
                .filter(|(_, allocated)| *allocated > 0.0)
                .collect();
            for member in custom_allocations.keys() {
                roster.require(member)?;
            }
            let allocated: f64 = custom_allocations.values().sum();
            if (draft.amount - allocated).abs() >= ALLOCATION_TOLERANCE {
                return Err(SplitError::UnbalancedSplit {
                    allocated,
                    total: draft.amount,
                });
            }
            Split::Custom { custom_allocations }
        }
    };

    let rate = rates.lookup(&draft.currency)?.rate;
    let expense = Expense {
        id: Uuid::new_v4().to_string(),
        description: draft.description.trim().to_string(),
        payer: draft.payer,
        amount: draft.amount,
        currency: draft.currency,
        exchange_rate_at_entry: rate,
        reference_amount: draft.amount * rate,
        split,
        created_at: Some(now),
        created_by: draft.created_by,
    };
    tracing::debug!(
        id = %expense.id,
        currency = %expense.currency,
        reference_amount = expense.reference_amount,
        "expense built"
    );
    Ok(expense)
}
