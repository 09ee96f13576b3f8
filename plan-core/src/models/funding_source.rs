use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{parse_amount, parse_count, parse_number};
use crate::ledger::LineItem;

/// Term length and interest-only period forced onto a line of credit.
const LINE_OF_CREDIT_MONTHS: u32 = 12;

/// The kind of a funding source, without its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FundingKind {
    Equity,
    Loan,
    InterestOnly,
    LineOfCredit,
    GrantDonation,
}

impl FundingKind {
    pub const ALL: [FundingKind; 5] = [
        Self::Equity,
        Self::Loan,
        Self::InterestOnly,
        Self::LineOfCredit,
        Self::GrantDonation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Loan => "loan",
            Self::InterestOnly => "interestOnly",
            Self::LineOfCredit => "lineOfCredit",
            Self::GrantDonation => "grantDonation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "equity" => Some(Self::Equity),
            "loan" => Some(Self::Loan),
            "interestOnly" => Some(Self::InterestOnly),
            "lineOfCredit" => Some(Self::LineOfCredit),
            "grantDonation" => Some(Self::GrantDonation),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::Loan => "Loan",
            Self::InterestOnly => "Interest Only",
            Self::LineOfCredit => "Line of Credit",
            Self::GrantDonation => "Grant/Donation",
        }
    }
}

/// Repayment terms carried by every debt-type funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtTerms {
    /// Annual rate in percentage points.
    pub loan_rate: Decimal,
    pub term_months: u32,
    pub interest_only_months: u32,
}

/// A funding source's type together with the fields valid for it.
///
/// Equity and grants carry no terms at all, so a rate or term can never be
/// attached to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FundingTerms {
    #[default]
    Equity,
    GrantDonation,
    Loan(DebtTerms),
    InterestOnly(DebtTerms),
    LineOfCredit(DebtTerms),
}

impl FundingTerms {
    pub fn kind(&self) -> FundingKind {
        match self {
            Self::Equity => FundingKind::Equity,
            Self::GrantDonation => FundingKind::GrantDonation,
            Self::Loan(_) => FundingKind::Loan,
            Self::InterestOnly(_) => FundingKind::InterestOnly,
            Self::LineOfCredit(_) => FundingKind::LineOfCredit,
        }
    }

    pub fn debt(&self) -> Option<&DebtTerms> {
        match self {
            Self::Equity | Self::GrantDonation => None,
            Self::Loan(terms) | Self::InterestOnly(terms) | Self::LineOfCredit(terms) => Some(terms),
        }
    }

    pub fn debt_mut(&mut self) -> Option<&mut DebtTerms> {
        match self {
            Self::Equity | Self::GrantDonation => None,
            Self::Loan(terms) | Self::InterestOnly(terms) | Self::LineOfCredit(terms) => Some(terms),
        }
    }

    /// Switches to `kind`, discarding whatever the new kind cannot hold.
    ///
    /// Rate and term survive a move between debt kinds. A line of credit
    /// always restarts at a 12 month term with 12 interest-only months.
    pub fn change_kind(
        self,
        kind: FundingKind,
    ) -> Self {
        let carried = self.debt().copied().unwrap_or_default();
        match kind {
            FundingKind::Equity => Self::Equity,
            FundingKind::GrantDonation => Self::GrantDonation,
            FundingKind::Loan => Self::Loan(carried),
            FundingKind::InterestOnly => Self::InterestOnly(carried),
            FundingKind::LineOfCredit => Self::LineOfCredit(DebtTerms {
                term_months: LINE_OF_CREDIT_MONTHS,
                interest_only_months: LINE_OF_CREDIT_MONTHS,
                ..carried
            }),
        }
    }
}

/// One row of the sources-of-funds ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundingSource {
    pub source: String,
    pub amount: Decimal,
    pub terms: FundingTerms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingSourceField {
    Source,
    Kind,
    Amount,
    LoanRate,
    TermMonths,
    InterestOnlyMonths,
}

impl FundingSource {
    pub fn equity(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            amount: Decimal::ZERO,
            terms: FundingTerms::Equity,
        }
    }

    pub fn kind(&self) -> FundingKind {
        self.terms.kind()
    }

    pub fn set_kind(
        &mut self,
        kind: FundingKind,
    ) {
        self.terms = self.terms.change_kind(kind);
    }
}

impl LineItem for FundingSource {
    type Field = FundingSourceField;

    /// Debt-only fields are ignored on equity and grant rows; an unknown
    /// kind leaves the row unchanged.
    fn update_field(
        &mut self,
        field: FundingSourceField,
        value: &str,
    ) {
        match field {
            FundingSourceField::Source => self.source = value.to_string(),
            FundingSourceField::Amount => self.amount = parse_amount(value),
            FundingSourceField::Kind => match FundingKind::parse(value) {
                Some(kind) => self.set_kind(kind),
                None => tracing::debug!(value, "unknown funding type ignored"),
            },
            FundingSourceField::LoanRate => {
                if let Some(terms) = self.terms.debt_mut() {
                    terms.loan_rate = parse_number(value);
                }
            }
            FundingSourceField::TermMonths => {
                if let Some(terms) = self.terms.debt_mut() {
                    terms.term_months = parse_count(value);
                }
            }
            FundingSourceField::InterestOnlyMonths => {
                if let Some(terms) = self.terms.debt_mut() {
                    terms.interest_only_months = parse_count(value);
                }
            }
        }
    }

    fn total_value(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bank_loan() -> FundingSource {
        FundingSource {
            source: "Bank Loan".to_string(),
            amount: dec!(50000),
            terms: FundingTerms::Loan(DebtTerms {
                loan_rate: dec!(6),
                term_months: 60,
                interest_only_months: 0,
            }),
        }
    }

    // =========================================================================
    // kind change tests
    // =========================================================================

    #[test]
    fn switching_to_equity_drops_debt_terms() {
        let mut row = bank_loan();

        row.update_field(FundingSourceField::Kind, "equity");

        assert_eq!(row.terms, FundingTerms::Equity);
        assert_eq!(row.amount, dec!(50000));
    }

    #[test]
    fn switching_between_debt_kinds_keeps_rate_and_term() {
        let mut row = bank_loan();

        row.set_kind(FundingKind::InterestOnly);

        let terms = row.terms.debt().unwrap();
        assert_eq!(row.kind(), FundingKind::InterestOnly);
        assert_eq!(terms.loan_rate, dec!(6));
        assert_eq!(terms.term_months, 60);
    }

    #[test]
    fn switching_to_line_of_credit_forces_twelve_months() {
        let mut row = bank_loan();

        row.set_kind(FundingKind::LineOfCredit);

        let terms = row.terms.debt().unwrap();
        assert_eq!(terms.term_months, 12);
        assert_eq!(terms.interest_only_months, 12);
        assert_eq!(terms.loan_rate, dec!(6));
    }

    #[test]
    fn switching_from_equity_to_loan_starts_at_zero() {
        let mut row = FundingSource::equity("Owner");

        row.set_kind(FundingKind::Loan);

        assert_eq!(row.terms, FundingTerms::Loan(DebtTerms::default()));
    }

    #[test]
    fn unknown_kind_leaves_row_unchanged() {
        let mut row = bank_loan();

        row.update_field(FundingSourceField::Kind, "mortgage");

        assert_eq!(row, bank_loan());
    }

    // =========================================================================
    // field update tests
    // =========================================================================

    #[test]
    fn debt_fields_ignored_on_equity_rows() {
        let mut row = FundingSource::equity("Investors");

        row.update_field(FundingSourceField::LoanRate, "9");
        row.update_field(FundingSourceField::TermMonths, "36");

        assert_eq!(row.terms, FundingTerms::Equity);
    }

    #[test]
    fn rate_accepts_fractional_percent() {
        let mut row = bank_loan();

        row.update_field(FundingSourceField::LoanRate, "7.25");

        assert_eq!(row.terms.debt().unwrap().loan_rate, dec!(7.25));
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(bank_loan()).unwrap();

        assert_eq!(json["terms"]["type"], "loan");
        assert_eq!(json["terms"]["termMonths"], 60);
    }

    #[test]
    fn equity_round_trips_through_json() {
        let row = FundingSource::equity("Owner's Cash Contribution");

        let json = serde_json::to_string(&row).unwrap();
        let back: FundingSource = serde_json::from_str(&json).unwrap();

        assert_eq!(back, row);
    }
}
