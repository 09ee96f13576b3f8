use plan_app::app::open_plan;
use plan_app::config::AppConfig;
use plan_app::report::render_report;
use plan_core::models::{FixedAssetField, ForecastYear, FundingSourceField, ProductField};
use pretty_assertions::assert_eq;

fn memory_config() -> AppConfig {
    AppConfig::parse("[storage]\nbackend = \"memory\"\n\n[notifications]\nworkforce_sync_interval_ms = 0\n").unwrap()
}

fn cells<'a>(
    report: &'a str,
    label: &str,
) -> Vec<&'a str> {
    let line = report
        .lines()
        .find(|l| l.starts_with(label))
        .unwrap_or_else(|| panic!("no '{label}' row in:\n{report}"));
    line[label.len()..].split_whitespace().collect()
}

#[tokio::test]
async fn seeded_plan_reports_operating_expenses_only() {
    let plan = open_plan(&memory_config()).await.unwrap();

    let report = render_report(&plan.summary(), &plan.dashboard());

    assert_eq!(cells(&report, "Operating Expenses"), vec!["$189,600", "$189,600", "$189,600"]);
    assert_eq!(cells(&report, "Net Profit Margin"), vec!["0.00%", "0.00%", "0.00%"]);
    assert_eq!(cells(&report, "Annual Expenses"), vec!["$189,600"]);
    assert_eq!(cells(&report, "Funding Gap"), vec!["$0", "Fully", "Funded"]);
}

#[tokio::test]
async fn report_reflects_edits_across_calculators() {
    let mut plan = open_plan(&memory_config()).await.unwrap();

    plan.startup_costs
        .edit(|input| input.fixed_assets.update_field(3, FixedAssetField::Amount, "50,000"))
        .await;
    plan.funding_sources
        .edit(|input| input.funding_sources.update_field(0, FundingSourceField::Amount, "40,000"))
        .await;
    plan.sales_forecast
        .edit(|input| {
            let products = input.products.get_mut(ForecastYear::Year1);
            products.update_field(0, ProductField::SellingPrice, "50");
            products.update_field(0, ProductField::CostPerItem, "20");
            products.update_field(0, ProductField::Quantity, "500");
        })
        .await;

    let report = render_report(&plan.summary(), &plan.dashboard());

    assert_eq!(cells(&report, "Sales"), vec!["$300,000", "$0", "$0"]);
    assert_eq!(cells(&report, "Gross Margin"), vec!["60.00%", "0.00%", "0.00%"]);
    assert_eq!(cells(&report, "Net Profit"), vec!["-$9,600", "-$189,600", "-$189,600"]);
    assert_eq!(cells(&report, "Total Startup Costs"), vec!["$50,000"]);
    assert_eq!(cells(&report, "Funding Gap"), vec!["$10,000", "Additional", "Funding", "Needed"]);
    assert_eq!(cells(&report, "Annual Revenue"), vec!["$300,000"]);
    assert_eq!(cells(&report, "Annual Profit"), vec!["-$9,600"]);
}
