//! Sources of funds: where the startup money comes from and what the debt
//! costs each month.
//!
//! # Payments
//!
//! | Type                            | Monthly payment                          |
//! |---------------------------------|------------------------------------------|
//! | equity, grant/donation          | 0                                        |
//! | loan                            | standard amortisation over the term      |
//! | interest only, line of credit   | `amount * rate / 12`                     |
//!
//! Debt rows with a zero term pay nothing. A zero-rate loan repays
//! `amount / term` each month.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use plan_core::calculations::common::round_half_up;
//! use plan_core::calculations::source_of_funds::amortized_payment;
//!
//! let payment = amortized_payment(dec!(100000), dec!(6), 60);
//! assert_eq!(round_half_up(payment), dec!(1933.28));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percent_of, saturating_sum};
use crate::ledger::Ledger;
use crate::models::{DebtTerms, FundingAggregate, FundingSource, FundingTerms};
use crate::session::Calculator;
use crate::store::BusinessPlanStore;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Percentage points per year to a fraction per month: `100 * 12`.
const ANNUAL_PERCENT_PER_MONTHLY_RATE: Decimal = Decimal::from_parts(1200, 0, 0, false, 0);

/// Monthly rate as a fraction, from an annual rate in percentage points.
fn monthly_rate(annual_percent: Decimal) -> Decimal {
    annual_percent / ANNUAL_PERCENT_PER_MONTHLY_RATE
}

/// Level monthly payment that retires `amount` over `term_months` at
/// `annual_percent`. Zero when the term is zero.
pub fn amortized_payment(
    amount: Decimal,
    annual_percent: Decimal,
    term_months: u32,
) -> Decimal {
    if term_months == 0 {
        return Decimal::ZERO;
    }
    let rate = monthly_rate(annual_percent);
    if rate.is_zero() {
        return amount / Decimal::from(term_months);
    }
    match (Decimal::ONE + rate).checked_powu(u64::from(term_months)) {
        Some(factor) if factor > Decimal::ONE => {
            (rate / (factor - Decimal::ONE)).saturating_mul(amount.saturating_mul(factor)).abs()
        }
        // The factor overflows only for absurd rate and term pairs, where the
        // payment converges on the interest alone.
        _ => amount.saturating_mul(rate).abs(),
    }
}

/// Interest-only payment on `amount`. Multiplies before dividing so whole
/// cent results stay exact.
pub fn interest_only_payment(
    amount: Decimal,
    annual_percent: Decimal,
) -> Decimal {
    amount.saturating_mul(annual_percent) / ANNUAL_PERCENT_PER_MONTHLY_RATE
}

/// Monthly payment owed on one funding source.
pub fn monthly_payment(source: &FundingSource) -> Decimal {
    match source.terms {
        FundingTerms::Equity | FundingTerms::GrantDonation => Decimal::ZERO,
        FundingTerms::Loan(DebtTerms {
            loan_rate, term_months, ..
        }) => amortized_payment(source.amount, loan_rate, term_months),
        FundingTerms::InterestOnly(DebtTerms {
            loan_rate, term_months, ..
        })
        | FundingTerms::LineOfCredit(DebtTerms {
            loan_rate, term_months, ..
        }) => {
            if term_months == 0 {
                Decimal::ZERO
            } else {
                interest_only_payment(source.amount, loan_rate)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOfFundsInput {
    pub funding_sources: Ledger<FundingSource>,
}

impl Default for SourceOfFundsInput {
    fn default() -> Self {
        Self {
            funding_sources: Ledger::new(vec![
                FundingSource::equity("Owner's Cash Contribution"),
                FundingSource::equity("Outside Investors"),
                FundingSource {
                    source: "Bank Loan".to_string(),
                    amount: Decimal::ZERO,
                    terms: FundingTerms::Loan(DebtTerms {
                        loan_rate: Decimal::new(6, 0),
                        term_months: 60,
                        interest_only_months: 0,
                    }),
                },
                FundingSource::equity(""),
            ]),
        }
    }
}

/// Per-row figures derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingRow {
    /// Share of total funding in percentage points.
    pub percentage: Decimal,
    pub monthly_payment: Decimal,
    pub annual_payment: Decimal,
}

/// Difference between what startup costs need and what is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingGap {
    /// Positive when underfunded, negative when overfunded.
    pub amount: Decimal,
}

impl FundingGap {
    pub fn label(&self) -> &'static str {
        if self.amount > Decimal::ZERO {
            "Additional Funding Needed"
        } else if self.amount < Decimal::ZERO {
            "Excess Funding"
        } else {
            "Fully Funded"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOfFundsResult {
    /// Parallel to the input ledger.
    pub rows: Vec<FundingRow>,
    pub total_funding: Decimal,
    pub total_monthly_payments: Decimal,
    pub total_annual_payments: Decimal,
    /// `None` until startup costs have published a total.
    pub funding_gap: Option<FundingGap>,
}

/// Computes payments and the funding gap against `total_funds_needed`.
pub struct SourceOfFundsWorksheet {
    total_funds_needed: Option<Decimal>,
}

impl SourceOfFundsWorksheet {
    pub fn new(total_funds_needed: Option<Decimal>) -> Self {
        Self { total_funds_needed }
    }

    pub fn calculate(
        &self,
        input: &SourceOfFundsInput,
    ) -> SourceOfFundsResult {
        let total_funding = input.funding_sources.total();
        let rows: Vec<FundingRow> = input
            .funding_sources
            .iter()
            .map(|source| {
                let monthly = monthly_payment(source);
                FundingRow {
                    percentage: percent_of(source.amount, total_funding),
                    monthly_payment: monthly,
                    annual_payment: monthly.saturating_mul(MONTHS_PER_YEAR),
                }
            })
            .collect();
        let total_monthly_payments = saturating_sum(rows.iter().map(|r| r.monthly_payment));
        let total_annual_payments = saturating_sum(rows.iter().map(|r| r.annual_payment));

        SourceOfFundsResult {
            rows,
            total_funding,
            total_monthly_payments,
            total_annual_payments,
            funding_gap: self.total_funds_needed.map(|needed| FundingGap {
                amount: needed.saturating_sub(total_funding),
            }),
        }
    }
}

pub struct SourceOfFundsCalculator;

impl Calculator for SourceOfFundsCalculator {
    const SCOPE: &'static str = "fundingSources";
    type Input = SourceOfFundsInput;
    type Snapshot = SourceOfFundsInput;
    type Output = SourceOfFundsResult;

    fn compute(
        input: &SourceOfFundsInput,
        store: &BusinessPlanStore,
    ) -> SourceOfFundsResult {
        let needed = store.startup_costs.get().map(|startup| startup.total_funds_needed);
        SourceOfFundsWorksheet::new(needed).calculate(input)
    }

    fn publish(
        output: &SourceOfFundsResult,
        store: &BusinessPlanStore,
    ) -> bool {
        store.funding_sources.publish(FundingAggregate {
            total_funding: output.total_funding,
            total_monthly_payments: output.total_monthly_payments,
            total_annual_payments: output.total_annual_payments,
        })
    }

    fn snapshot(input: &SourceOfFundsInput) -> SourceOfFundsInput {
        input.clone()
    }

    fn restore(snapshot: &SourceOfFundsInput) -> SourceOfFundsInput {
        snapshot.clone()
    }
}
