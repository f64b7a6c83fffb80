//! Monthly totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Direction, EngineError, ResultEngine, Saving, Transaction, normalize::format_date};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub ym: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub total_saving: Decimal,
}

/// Whether `tx` falls in `ym`. This is a plain prefix match on the
/// zero-padded date, so `ym` is expected in `YYYY-MM` form.
pub fn in_month(tx: &Transaction, ym: &str) -> bool {
    format_date(tx.date).starts_with(ym)
}

/// Reduce transactions of month `ym` and every saving into a [`Summary`].
///
/// Savings are never month-scoped: `total_saving` covers all of them.
/// Fails with [`EngineError::Overflow`] when a total leaves the `Decimal` range.
pub fn summarize<'t, 's, T, S>(ym: &str, transactions: T, savings: S) -> ResultEngine<Summary>
where
    T: IntoIterator<Item = &'t Transaction>,
    S: IntoIterator<Item = &'s Saving>,
{
    let (income, expense) = transactions
        .into_iter()
        .filter(|tx| in_month(tx, ym))
        .try_fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), tx| -> ResultEngine<(Decimal, Decimal)> {
                match tx.direction {
                    Direction::Income => Ok((add(income, tx.amount, "income")?, expense)),
                    Direction::Expense => Ok((income, add(expense, tx.amount.abs(), "expense")?)),
                    Direction::Other(_) => Ok((income, expense)),
                }
            },
        )?;

    let total_saving = savings
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, saving| {
            add(acc, saving.amount, "total_saving")
        })?;

    let net = income
        .checked_sub(expense)
        .ok_or_else(|| EngineError::Overflow("net".to_string()))?;

    Ok(Summary {
        ym: ym.to_string(),
        income,
        expense,
        net,
        total_saving,
    })
}

fn add(acc: Decimal, amount: Decimal, total: &str) -> ResultEngine<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| EngineError::Overflow(total.to_string()))
}
