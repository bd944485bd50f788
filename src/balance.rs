use crate::schemas::{Balances, Contribution, Expense, MemberName, Split};

/// Splits one expense into signed per-member deltas in reference currency.
///
/// The payer is always credited with the full `reference_amount`. Consumers are
/// debited by their share: an even slice of `reference_amount` for `Equal`, or
/// their allocation converted at the expense's own rate for `Custom`.
pub fn contributions(expense: &Expense) -> Vec<Contribution> {
    let mut deltas = vec![Contribution {
        member: expense.payer.clone(),
        delta: expense.reference_amount,
    }];

    match &expense.split {
        Split::Equal { beneficiaries } => {
            if beneficiaries.is_empty() {
                tracing::warn!(
                    expense = %expense.id,
                    "equal split without beneficiaries, only the payer credit applies"
                );
                return deltas;
            }
            let share = expense.reference_amount / beneficiaries.len() as f64;
            deltas.extend(beneficiaries.iter().map(|member| Contribution {
                member: member.clone(),
                delta: -share,
            }));
        }
        Split::Custom { custom_allocations } => {
            deltas.extend(
                custom_allocations
                    .iter()
                    .filter(|(_, allocated)| **allocated > 0.0)
                    .map(|(member, allocated)| Contribution {
                        member: member.clone(),
                        delta: -allocated * expense.exchange_rate_at_entry,
                    }),
            );
        }
    }

    deltas
}

/// Folds every expense into a balance per member.
///
/// Every roster member starts at zero. Names that only show up inside expenses
/// are accumulated too, so no money disappears when the roster is out of sync.
pub fn compute_balances(roster: &[MemberName], expenses: &[Expense]) -> Balances {
    let mut balances: Balances = roster.iter().map(|member| (member.clone(), 0.0)).collect();
    for expense in expenses {
        for Contribution { member, delta } in contributions(expense) {
            balances
                .entry(member)
                .and_modify(|v| *v += delta)
                .or_insert(delta);
        }
    }
    tracing::debug!(
        members = balances.len(),
        expenses = expenses.len(),
        "balances computed"
    );
    balances
}

/// Total spent across all expenses, in reference currency.
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.reference_amount).sum()
}
