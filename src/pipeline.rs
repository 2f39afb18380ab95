// The fixed six-stage run: load, explore, daily trends, city trends,
// charts, business insights. Any stage error ends the run.
use crate::charts;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::explore::{self, Exploration};
use crate::insights::{self, Insights};
use crate::loader::{self, LoadedOrders};
use crate::output::{print_section, print_table, rule};
use crate::trends::{self, CityTrends, DailyTrends};
use crate::types::{BusyDayRow, CityCountRow};
use crate::util::{format_int, format_stat};
use tracing::{debug, info};

/// Everything computed from one order table.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub exploration: Exploration,
    pub daily: DailyTrends,
    pub cities: CityTrends,
    pub insights: Insights,
}

/// Run every aggregation without printing or touching the filesystem.
pub fn analyze(orders: &LoadedOrders, cfg: &AnalysisConfig) -> Report {
    Report {
        exploration: explore::explore(&orders.records, &orders.extra_columns),
        daily: trends::daily_trends(&orders.records, cfg.rolling_window),
        cities: trends::city_trends(&orders.records),
        insights: insights::business_insights(&orders.records, cfg.top_categories),
    }
}

pub fn print_daily(daily: &DailyTrends, top_n: usize) {
    println!("Total days: {}", daily.total_days());
    println!("Average orders per day: {}", format_stat(daily.mean_count(), 1));
    println!("Max orders in a day: {}", daily.max_count());
    println!("Min orders in a day: {}", daily.min_count());

    println!("\nTop {} busiest days:", top_n);
    let rows: Vec<BusyDayRow> = daily
        .busiest(top_n)
        .into_iter()
        .map(|d| BusyDayRow {
            date: d.date.format("%Y-%m-%d").to_string(),
            count: d.count,
        })
        .collect();
    print_table(&rows);
}

pub fn print_cities(cities: &CityTrends) {
    println!("Total orders by city:");
    let totals: Vec<CityCountRow> = cities
        .totals
        .iter()
        .map(|(city, n)| CityCountRow {
            city: city.clone(),
            orders: format_int(*n),
        })
        .collect();
    print_table(&totals);

    println!("\nAverage daily orders per city:");
    let averages: Vec<CityCountRow> = cities
        .daily_average
        .iter()
        .map(|(city, avg)| CityCountRow {
            city: city.clone(),
            orders: format!("{:.1}", avg),
        })
        .collect();
    print_table(&averages);
}

/// Execute the whole analysis, printing the console report as each stage finishes.
pub fn run(cfg: &AnalysisConfig) -> Result<Report, AnalysisError> {
    println!("Loading dataset...");
    let orders = loader::load_orders(&cfg.input_path)?;
    println!(
        "Dataset loaded: {} orders from {} days",
        format_int(orders.len()),
        format_int(orders.distinct_days)
    );

    let report = analyze(&orders, cfg);
    debug!(rows = report.exploration.rows, "Aggregations computed");

    print_section("DATA EXPLORATION");
    explore::print_exploration(&report.exploration);

    print_section("DAILY TRENDS ANALYSIS");
    print_daily(&report.daily, cfg.top_busiest_days);

    print_section("CITY TRENDS ANALYSIS");
    print_cities(&report.cities);

    print_section("CREATING VISUALIZATIONS");
    charts::render_daily_trend(&report.daily, &cfg.chart, &cfg.daily_chart_path)?;
    println!("✓ Daily orders trend plot saved");
    charts::render_city_trends(&report.cities, &cfg.chart, &cfg.city_chart_path)?;
    println!("✓ City trends plot saved");

    print_section("BUSINESS INSIGHTS");
    insights::print_insights(&report.insights, &cfg.currency);

    print_section("ANALYSIS COMPLETED");
    println!("Generated files:");
    println!("- {}", cfg.daily_chart_path);
    println!("- {}", cfg.city_chart_path);
    info!(rows = orders.len(), days = orders.distinct_days, "Analysis finished");
    Ok(report)
}

/// Title banner printed before the first stage.
pub fn banner(started_at: &str) -> String {
    format!(
        "TALABAT UAE ORDERS DATA ANALYSIS\n{}\nAnalysis started at: {}",
        rule(),
        started_at
    )
}
