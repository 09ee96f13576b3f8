//! Workforce payroll and benefit loading.
//!
//! ```text
//! total annual payroll   = owners' annual salaries + employees' annual salaries
//! annual payroll taxes   = total annual payroll * sum(payroll rates) / 100
//! annual health insurance = participants * premium * contribution% / 100 * 12
//! total annual expenses  = payroll + payroll taxes + health insurance
//! ```
//!
//! The monthly total is what operating expenses can pull in as its salaries
//! and wages line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::saturating_sum;
use crate::ledger::Ledger;
use crate::models::{Employee, HealthInsurance, Owner, PayrollTaxRates, WorkforceAggregate};
use crate::session::Calculator;
use crate::store::BusinessPlanStore;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceInput {
    pub owners: Ledger<Owner>,
    pub employees: Ledger<Employee>,
    pub payroll_taxes: PayrollTaxRates,
    pub health_insurance: HealthInsurance,
}

impl Default for WorkforceInput {
    fn default() -> Self {
        Self {
            owners: Ledger::new(vec![Owner::default()]),
            employees: Ledger::new(vec![Employee::default()]),
            payroll_taxes: PayrollTaxRates::default(),
            health_insurance: HealthInsurance::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkforceResult {
    pub annual_owner_salaries: Decimal,
    pub annual_employee_wages: Decimal,
    pub total_annual_payroll: Decimal,
    pub annual_payroll_taxes: Decimal,
    pub annual_health_insurance: Decimal,
    pub total_annual_expenses: Decimal,
    pub total_monthly_expenses: Decimal,
}

impl WorkforceResult {
    pub fn aggregate(&self) -> WorkforceAggregate {
        WorkforceAggregate {
            annual_salaries_and_wages: self.total_annual_payroll,
            monthly_payroll_taxes: self.annual_payroll_taxes / MONTHS_PER_YEAR,
            monthly_health_insurance: self.annual_health_insurance / MONTHS_PER_YEAR,
            total_monthly_expenses: self.total_monthly_expenses,
            total_annual_expenses: self.total_annual_expenses,
        }
    }
}

pub struct WorkforceCalculator;

impl WorkforceCalculator {
    pub fn calculate(input: &WorkforceInput) -> WorkforceResult {
        let annual_owner_salaries = input.owners.total();
        let annual_employee_wages = input.employees.total();
        let total_annual_payroll = annual_owner_salaries.saturating_add(annual_employee_wages);

        let payroll_tax_rate = input.payroll_taxes.total_percent() / Decimal::ONE_HUNDRED;
        let annual_payroll_taxes = total_annual_payroll.saturating_mul(payroll_tax_rate);

        let insurance = &input.health_insurance;
        let annual_health_insurance = Decimal::from(insurance.participating_employees)
            .saturating_mul(insurance.monthly_premium)
            .saturating_mul(insurance.employer_contribution_percentage)
            / Decimal::ONE_HUNDRED
            * MONTHS_PER_YEAR;

        let total_annual_expenses = saturating_sum([total_annual_payroll, annual_payroll_taxes, annual_health_insurance]);

        WorkforceResult {
            annual_owner_salaries,
            annual_employee_wages,
            total_annual_payroll,
            annual_payroll_taxes,
            annual_health_insurance,
            total_annual_expenses,
            total_monthly_expenses: total_annual_expenses / MONTHS_PER_YEAR,
        }
    }
}

impl Calculator for WorkforceCalculator {
    const SCOPE: &'static str = "workforce";
    type Input = WorkforceInput;
    type Snapshot = WorkforceInput;
    type Output = WorkforceResult;

    fn compute(
        input: &WorkforceInput,
        _store: &BusinessPlanStore,
    ) -> WorkforceResult {
        Self::calculate(input)
    }

    fn publish(
        output: &WorkforceResult,
        store: &BusinessPlanStore,
    ) -> bool {
        store.workforce.publish(output.aggregate())
    }

    fn snapshot(input: &WorkforceInput) -> WorkforceInput {
        input.clone()
    }

    fn restore(snapshot: &WorkforceInput) -> WorkforceInput {
        snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{EmployeeField, HealthInsuranceField, OwnerField};

    fn staffed() -> WorkforceInput {
        let mut input = WorkforceInput::default();
        input.owners.update_field(0, OwnerField::AnnualSalary, "60,000");
        input.employees.update_field(0, EmployeeField::HourlyPay, "20");
        input.employees.update_field(0, EmployeeField::WeeklyHours, "40");
        input
    }

    #[test]
    fn empty_workforce_costs_nothing() {
        let result = WorkforceCalculator::calculate(&WorkforceInput::default());

        assert_eq!(result.total_annual_expenses, Decimal::ZERO);
        assert_eq!(result.total_monthly_expenses, Decimal::ZERO);
    }

    #[test]
    fn payroll_adds_owners_and_employees() {
        let result = WorkforceCalculator::calculate(&staffed());

        assert_eq!(result.annual_owner_salaries, dec!(60000));
        assert_eq!(result.annual_employee_wages, dec!(41600));
        assert_eq!(result.total_annual_payroll, dec!(101600));
    }

    #[test]
    fn payroll_taxes_apply_summed_rate() {
        let result = WorkforceCalculator::calculate(&staffed());

        // 101600 * 15.95%
        assert_eq!(result.annual_payroll_taxes, dec!(16205.20));
    }

    #[test]
    fn health_insurance_uses_employer_share() {
        let mut input = WorkforceInput::default();
        input.health_insurance.set(HealthInsuranceField::ParticipatingEmployees, "2");
        input.health_insurance.set(HealthInsuranceField::MonthlyPremium, "500");

        let result = WorkforceCalculator::calculate(&input);

        assert_eq!(result.annual_health_insurance, dec!(9600));
        assert_eq!(result.total_monthly_expenses, dec!(800));
    }

    #[test]
    fn aggregate_splits_monthly_components() {
        let mut input = staffed();
        input.health_insurance.set(HealthInsuranceField::ParticipatingEmployees, "1");
        input.health_insurance.set(HealthInsuranceField::MonthlyPremium, "300");

        let aggregate = WorkforceCalculator::calculate(&input).aggregate();

        assert_eq!(aggregate.annual_salaries_and_wages, dec!(101600));
        assert_eq!(aggregate.monthly_health_insurance, dec!(240));
        assert_eq!(aggregate.total_annual_expenses, dec!(101600) + dec!(16205.20) + dec!(2880));
        assert_eq!(aggregate.total_monthly_expenses * dec!(12), aggregate.total_annual_expenses);
    }
}
