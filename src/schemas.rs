use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type MemberName = String;

/// Net amount per member in reference currency. Positive means the member is owed money.
pub type Balances = BTreeMap<MemberName, f64>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "payerName")]
    pub payer: MemberName,
    pub amount: f64,
    pub currency: String,
    /// Reference units per unit of `currency`, frozen when the expense was entered.
    #[serde(alias = "exchangeRate")]
    pub exchange_rate_at_entry: f64,
    /// `amount * exchange_rate_at_entry`, stored so later rate edits never touch it.
    #[serde(alias = "twdAmount")]
    pub reference_amount: f64,
    #[serde(flatten)]
    pub split: Split,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<MemberName>,
}

/// How the consumption side of an expense is shared.
///
/// Serialized flat inside the expense as `splitMode` plus either
/// `beneficiaries` or `customAllocations`. A missing collection reads as empty.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "splitMode", rename_all = "lowercase")]
pub enum Split {
    Equal {
        #[serde(default)]
        beneficiaries: Vec<MemberName>,
    },
    Custom {
        /// Amounts in the expense's own currency, not the reference currency.
        #[serde(default, rename = "customAllocations")]
        custom_allocations: BTreeMap<MemberName, f64>,
    },
}

/// One signed share of an expense, in reference currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Contribution {
    pub member: MemberName,
    pub delta: f64,
}

/// A single payment instruction. `amount` is in whole reference-currency units.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transfer {
    pub from: MemberName,
    pub to: MemberName,
    pub amount: u64,
}

/// Balance held by a name that is not on the roster.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OrphanedBalance {
    pub member: MemberName,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Settlement {
    pub balances: Balances,
    pub transfers: Vec<Transfer>,
    pub orphaned: Vec<OrphanedBalance>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_legacy_equal_expense() {
        let expense: Expense = serde_json::from_value(json!({
            "id": "abc",
            "payerName": "Ming",
            "description": "Dinner",
            "amount": 30,
            "currency": "USD",
            "exchangeRate": 32.5,
            "twdAmount": 975,
            "splitMode": "equal",
            "beneficiaries": ["Ming", "Hua"],
            "customAllocations": {},
            "createdBy": "Ming"
        }))
        .unwrap();

        assert_eq!(expense.payer, "Ming");
        assert_eq!(expense.exchange_rate_at_entry, 32.5);
        assert_eq!(expense.reference_amount, 975.0);
        assert_eq!(
            expense.split,
            Split::Equal {
                beneficiaries: vec!["Ming".to_string(), "Hua".to_string()]
            }
        );
        assert_eq!(expense.created_by.as_deref(), Some("Ming"));
    }

    #[test]
    fn custom_expense_without_allocations_reads_as_empty() {
        let expense: Expense = serde_json::from_value(json!({
            "payer": "A",
            "amount": 100.0,
            "currency": "TWD",
            "exchangeRateAtEntry": 1.0,
            "referenceAmount": 100.0,
            "splitMode": "custom"
        }))
        .unwrap();

        assert_eq!(
            expense.split,
            Split::Custom {
                custom_allocations: BTreeMap::new()
            }
        );
    }

    #[test]
    fn split_is_written_flat() {
        let expense = Expense {
            id: "1".to_string(),
            description: "Taxi".to_string(),
            payer: "A".to_string(),
            amount: 300.0,
            currency: "TWD".to_string(),
            exchange_rate_at_entry: 1.0,
            reference_amount: 300.0,
            split: Split::Custom {
                custom_allocations: BTreeMap::from([("B".to_string(), 300.0)]),
            },
            created_at: None,
            created_by: None,
        };

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["splitMode"], "custom");
        assert_eq!(value["customAllocations"]["B"], 300.0);
        assert_eq!(value["exchangeRateAtEntry"], 1.0);
    }
}
