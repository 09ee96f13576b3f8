//! Plain-text rendering of the summary statement and dashboard.

use std::fmt::{self, Write};

use plan_core::calculations::{Dashboard, FundingGap, StatementYear, SummaryStatement};
use plan_core::format::{format_currency, format_percent};
use plan_core::models::ForecastYear;
use rust_decimal::Decimal;

const LABEL_WIDTH: usize = 22;
const COLUMN_WIDTH: usize = 14;

type Cell = fn(&StatementYear) -> String;

const STATEMENT_ROWS: [(&str, Cell); 7] = [
    ("Sales", |y| format_currency(y.sales)),
    ("Cost of Goods Sold", |y| format_currency(y.cost_of_goods_sold)),
    ("Gross Profit", |y| format_currency(y.gross_profit)),
    ("Gross Margin", |y| format_percent(y.gross_margin)),
    ("Operating Expenses", |y| format_currency(y.operating_expenses)),
    ("Net Profit", |y| format_currency(y.net_profit)),
    ("Net Profit Margin", |y| format_percent(y.net_profit_margin)),
];

/// The summary statement followed by the dashboard, ready to print.
pub struct Report<'a> {
    summary: &'a SummaryStatement,
    dashboard: &'a Dashboard,
}

impl<'a> Report<'a> {
    pub fn new(
        summary: &'a SummaryStatement,
        dashboard: &'a Dashboard,
    ) -> Self {
        Self { summary, dashboard }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_statement(f, self.summary)?;
        writeln!(f)?;
        write_dashboard(f, self.dashboard)
    }
}

pub fn render_report(
    summary: &SummaryStatement,
    dashboard: &Dashboard,
) -> String {
    Report::new(summary, dashboard).to_string()
}

fn write_statement(
    out: &mut impl Write,
    summary: &SummaryStatement,
) -> fmt::Result {
    writeln!(out, "Summary Statement")?;
    write!(out, "{:LABEL_WIDTH$}", "")?;
    for year in ForecastYear::ALL {
        write!(out, "{:>COLUMN_WIDTH$}", year.label())?;
    }
    writeln!(out)?;

    for (label, cell) in STATEMENT_ROWS {
        write!(out, "{label:LABEL_WIDTH$}")?;
        for year in ForecastYear::ALL {
            write!(out, "{:>COLUMN_WIDTH$}", cell(summary.years.get(year)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_dashboard(
    out: &mut impl Write,
    dashboard: &Dashboard,
) -> fmt::Result {
    let gap = FundingGap {
        amount: dashboard.funding_gap,
    };

    writeln!(out, "Dashboard")?;
    line(out, "Total Startup Costs", dashboard.total_startup_costs)?;
    line(out, "Total Funding", dashboard.total_funding)?;
    writeln!(
        out,
        "{:LABEL_WIDTH$}{:>COLUMN_WIDTH$}  {}",
        "Funding Gap",
        format_currency(gap.amount.abs()),
        gap.label()
    )?;
    line(out, "Annual Revenue", dashboard.projected_annual_revenue)?;
    line(out, "Annual Expenses", dashboard.projected_annual_expenses)?;
    line(out, "Annual Profit", dashboard.projected_annual_profit)?;
    line(out, "Monthly Debt Service", dashboard.monthly_debt_service)
}

fn line(
    out: &mut impl Write,
    label: &str,
    value: Decimal,
) -> fmt::Result {
    writeln!(out, "{label:LABEL_WIDTH$}{:>COLUMN_WIDTH$}", format_currency(value))
}
