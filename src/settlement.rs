use crate::balance::compute_balances;
use crate::schemas::{Balances, Expense, MemberName, OrphanedBalance, Settlement, Transfer};

/// Balances within this many reference units of zero count as settled.
pub const SETTLED_EPSILON: f64 = 1.0;

#[derive(Clone, Debug)]
struct PersonalBalance {
    id: MemberName,
    balance: f64,
}

/// Greedy debtor/creditor matching over a balance map.
///
/// Debtors are visited most negative first, creditors largest first. Ties keep
/// the map's name order. Each emitted amount is rounded to whole units while the
/// running balances keep the exact value, so rounding never compounds.
pub fn compute_settlement(balances: &Balances) -> Vec<Transfer> {
    for (member, balance) in balances.iter().filter(|(_, b)| !b.is_finite()) {
        tracing::warn!(%member, balance, "non-finite balance left out of settlement");
    }

    let (mut debtors, mut creditors): (Vec<_>, Vec<_>) = balances
        .iter()
        .filter(|(_, balance)| balance.is_finite() && balance.abs() > SETTLED_EPSILON)
        .map(|(id, balance)| PersonalBalance {
            id: id.clone(),
            balance: *balance,
        })
        .partition(|person| person.balance < 0.0);

    debtors.sort_by(|a, b| a.balance.total_cmp(&b.balance));
    creditors.sort_by(|a, b| b.balance.total_cmp(&a.balance));

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = debtor.balance.abs().min(creditor.balance);
        transfers.push(Transfer {
            from: debtor.id.clone(),
            to: creditor.id.clone(),
            amount: amount.round() as u64,
        });

        debtor.balance += amount;
        creditor.balance -= amount;

        let (before_i, before_j) = (i, j);
        if debtor.balance.abs() < SETTLED_EPSILON {
            i += 1;
        }
        if creditor.balance < SETTLED_EPSILON {
            j += 1;
        }
        if (i, j) == (before_i, before_j) {
            tracing::warn!(
                debtor = %debtors[i].id,
                creditor = %creditors[j].id,
                "matching stalled"
            );
            break;
        }
    }

    let unmatched: f64 = debtors[i..]
        .iter()
        .chain(creditors[j..].iter())
        .map(|person| person.balance)
        .sum();
    if i < debtors.len() || j < creditors.len() {
        tracing::warn!(
            unmatched,
            debtors_left = debtors.len() - i,
            creditors_left = creditors.len() - j,
            "unmatched remainder left by balances inside the epsilon band \
             or by input that does not sum to zero"
        );
    }

    tracing::debug!(transfers = transfers.len(), "settlement computed");
    transfers
}

/// Balances plus transfers for a whole trip.
///
/// Only roster members take part in the matching. Names that appear in
/// expenses but not on the roster are reported in `orphaned` instead.
pub fn settle(roster: &[MemberName], expenses: &[Expense]) -> Settlement {
    let balances = compute_balances(roster, expenses);

    let (members, strays): (Balances, Balances) = balances
        .iter()
        .map(|(name, balance)| (name.clone(), *balance))
        .partition(|(name, _)| roster.contains(name));

    let orphaned: Vec<OrphanedBalance> = strays
        .into_iter()
        .filter(|(_, amount)| amount.abs() > SETTLED_EPSILON)
        .map(|(member, amount)| OrphanedBalance { member, amount })
        .collect();
    for orphan in &orphaned {
        tracing::warn!(
            member = %orphan.member,
            amount = orphan.amount,
            "balance held by a name missing from the roster"
        );
    }

    Settlement {
        transfers: compute_settlement(&members),
        balances,
        orphaned,
    }
}
