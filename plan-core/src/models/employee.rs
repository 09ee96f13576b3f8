use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{round_half_up, saturating_sum};
use crate::format::{parse_amount, parse_count, parse_number};
use crate::ledger::LineItem;

const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "fullTime",
            Self::PartTime => "partTime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fullTime" => Some(Self::FullTime),
            "partTime" => Some(Self::PartTime),
            _ => None,
        }
    }
}

/// An hourly employee. The annual salary is always derived and cannot be
/// edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EmploymentType,
    pub hourly_pay: Decimal,
    pub weekly_hours: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Name,
    Kind,
    HourlyPay,
    WeeklyHours,
}

impl Employee {
    /// `hourly_pay * weekly_hours * 52`, to the cent.
    pub fn annual_salary(&self) -> Decimal {
        round_half_up(self.hourly_pay.saturating_mul(self.weekly_hours).saturating_mul(WEEKS_PER_YEAR))
    }
}

impl LineItem for Employee {
    type Field = EmployeeField;

    fn update_field(
        &mut self,
        field: EmployeeField,
        value: &str,
    ) {
        match field {
            EmployeeField::Name => self.name = value.to_string(),
            EmployeeField::Kind => match EmploymentType::parse(value) {
                Some(kind) => self.kind = kind,
                None => tracing::debug!(value, "unknown employment type ignored"),
            },
            EmployeeField::HourlyPay => self.hourly_pay = parse_amount(value),
            EmployeeField::WeeklyHours => self.weekly_hours = parse_number(value).max(Decimal::ZERO),
        }
    }

    fn total_value(&self) -> Decimal {
        self.annual_salary()
    }
}

/// Employer-side payroll rates, each in percentage points of total payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTaxRates {
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub futa: Decimal,
    pub suta: Decimal,
    pub workers_comp: Decimal,
    pub retirement401k: Decimal,
    pub other_benefits: Decimal,
}

impl Default for PayrollTaxRates {
    fn default() -> Self {
        Self {
            social_security: Decimal::new(62, 1),
            medicare: Decimal::new(145, 2),
            futa: Decimal::new(6, 1),
            suta: Decimal::new(27, 1),
            workers_comp: Decimal::new(10, 1),
            retirement401k: Decimal::new(3, 0),
            other_benefits: Decimal::new(1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollTaxField {
    SocialSecurity,
    Medicare,
    Futa,
    Suta,
    WorkersComp,
    Retirement401k,
    OtherBenefits,
}

impl PayrollTaxRates {
    pub fn set(
        &mut self,
        field: PayrollTaxField,
        value: &str,
    ) {
        let rate = parse_number(value);
        let slot = match field {
            PayrollTaxField::SocialSecurity => &mut self.social_security,
            PayrollTaxField::Medicare => &mut self.medicare,
            PayrollTaxField::Futa => &mut self.futa,
            PayrollTaxField::Suta => &mut self.suta,
            PayrollTaxField::WorkersComp => &mut self.workers_comp,
            PayrollTaxField::Retirement401k => &mut self.retirement401k,
            PayrollTaxField::OtherBenefits => &mut self.other_benefits,
        };
        *slot = rate;
    }

    /// Sum of every rate in percentage points.
    pub fn total_percent(&self) -> Decimal {
        saturating_sum([
            self.social_security,
            self.medicare,
            self.futa,
            self.suta,
            self.workers_comp,
            self.retirement401k,
            self.other_benefits,
        ])
    }
}

/// Employer-paid share of a group health plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsurance {
    pub participating_employees: u32,
    pub monthly_premium: Decimal,
    pub employer_contribution_percentage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthInsuranceField {
    ParticipatingEmployees,
    MonthlyPremium,
    EmployerContributionPercentage,
}

impl HealthInsurance {
    pub fn set(
        &mut self,
        field: HealthInsuranceField,
        value: &str,
    ) {
        match field {
            HealthInsuranceField::ParticipatingEmployees => self.participating_employees = parse_count(value),
            HealthInsuranceField::MonthlyPremium => self.monthly_premium = parse_amount(value),
            HealthInsuranceField::EmployerContributionPercentage => {
                self.employer_contribution_percentage = parse_number(value);
            }
        }
    }
}

impl Default for HealthInsurance {
    fn default() -> Self {
        Self {
            participating_employees: 0,
            monthly_premium: Decimal::ZERO,
            employer_contribution_percentage: Decimal::new(80, 0),
        }
    }
}
