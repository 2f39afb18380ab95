use order_trends::config::AnalysisConfig;
use order_trends::loader::load_orders;
use order_trends::pipeline::{analyze, banner};
use std::env;
use std::fs;
use std::path::PathBuf;

const FIXTURE: &str = "\
order_id,order_datetime,city,order_value,delivery_time_min,delivery_fee,payment_method,promo_code_used,restaurant_category
1,2024-01-01 12:05:00,Dubai,45.50,32,5.00,Card,Yes,Burgers
2,2024-01-01 19:40:00,Abu Dhabi,0,28,7.50,Cash,No,Pizza
3,2024-01-02 13:10:00,Dubai,62.00,41,5.00,Card,No,Arabic
4,2024-01-02 20:15:00,Sharjah,38.25,25,0.00,Apple Pay,No,Pizza
5,2024-01-02 21:30:00,Dubai,120.00,55,9.00,Card,Yes,Sushi
6,2024-01-04 09:00:00,Abu Dhabi,27.75,22,5.00,Cash,No,Coffee
7,2024-01-04 11:45:00,Dubai,51.00,36,5.00,Card,No,Burgers
8,2024-01-05 18:20:00,Sharjah,33.00,30,7.50,Card,Yes,Indian
9,2024-01-06 20:00:00,Dubai,74.10,47,9.00,Cash,No,Pizza
10,2024-01-07 12:30:00,Ajman,19.99,18,5.00,Card,No,Coffee
11,2024-01-07 13:30:00,Dubai,88.00,39,7.50,Apple Pay,No,Arabic
12,2024-01-08 22:10:00,Abu Dhabi,56.40,44,5.00,Card,Yes,Burgers
";

fn write_fixture(name: &str, body: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_full_pipeline_properties() {
    let path = write_fixture("order_trends_pipeline.csv", FIXTURE);
    let orders = load_orders(&path).expect("fixture should load");
    let report = analyze(&orders, &AnalysisConfig::default());

    assert_eq!(orders.len(), 12);
    assert_eq!(orders.distinct_days, 7);
    assert_eq!(report.exploration.rows, orders.len());
    assert_eq!(report.exploration.quality.zero_order_values, 1);
    assert_eq!(report.exploration.quality.negative_delivery_times, 0);
    assert_eq!(report.exploration.quality.negative_delivery_fees, 0);
    assert_eq!(report.exploration.columns.len(), 10);
    assert_eq!(report.exploration.null_count("order_id"), Some(0));

    // One entry per distinct date, spanning min..=max order_date.
    let dates: Vec<_> = report.daily.series.iter().map(|d| d.date).collect();
    let min = orders.records.iter().filter_map(|r| r.order_date).min().unwrap();
    let max = orders.records.iter().filter_map(|r| r.order_date).max().unwrap();
    assert_eq!(dates.len(), orders.distinct_days);
    assert_eq!(dates.first(), Some(&min));
    assert_eq!(dates.last(), Some(&max));
    assert!(dates.windows(2).all(|w| w[0] < w[1]));

    // 2 3 2 1 1 2 1 orders over the seven days.
    assert!(report.daily.series[..6].iter().all(|d| d.rolling_avg.is_none()));
    let last = report.daily.series[6].rolling_avg.unwrap();
    assert!((last - 12.0 / 7.0).abs() < 1e-9);
    assert_eq!(report.daily.busiest(5)[0].count, 3);

    let city_total: usize = report.cities.totals.iter().map(|(_, n)| n).sum();
    assert_eq!(city_total, orders.len());
    assert_eq!(report.cities.totals[0], ("Dubai".to_string(), 6));

    let payment_total: usize = report.insights.payment_methods.iter().map(|s| s.count).sum();
    assert_eq!(payment_total, orders.len());
    let pct: f64 = report.insights.payment_methods.iter().map(|s| s.percent).sum();
    assert!((pct - 100.0).abs() < 0.1);
    assert_eq!(report.insights.top_categories.len(), 5);
    assert_eq!(report.insights.top_categories[0].label, "Burgers");

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_rerun_is_deterministic() {
    let path = write_fixture("order_trends_rerun.csv", FIXTURE);
    let cfg = AnalysisConfig::default();
    let first = analyze(&load_orders(&path).unwrap(), &cfg);
    let second = analyze(&load_orders(&path).unwrap(), &cfg);
    assert_eq!(first, second);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_single_row_dataset() {
    let body = "order_datetime,city,order_value,delivery_time_min,delivery_fee,payment_method,promo_code_used,restaurant_category\n\
                2024-03-01T08:15:00,Fujairah,25,20,3,Cash,No,Bakery\n";
    let path = write_fixture("order_trends_single.csv", body);
    let orders = load_orders(&path).unwrap();
    let report = analyze(&orders, &AnalysisConfig::default());

    assert_eq!(report.daily.series.len(), 1);
    assert_eq!(report.daily.series[0].rolling_avg, None);
    assert_eq!(report.cities.totals, vec![("Fujairah".to_string(), 1)]);
    assert_eq!(report.insights.median_order_value, Some(25.0));
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_blank_timestamp_row_survives_the_run() {
    let body = format!("{FIXTURE}13,,Dubai,40.00,30,5.00,Card,No,Pizza\n");
    let path = write_fixture("order_trends_blank_ts.csv", &body);
    let orders = load_orders(&path).expect("blank timestamp should load as a null");
    let report = analyze(&orders, &AnalysisConfig::default());

    assert_eq!(orders.len(), 13);
    assert_eq!(orders.distinct_days, 7);
    assert_eq!(report.exploration.rows, 13);
    assert_eq!(report.exploration.null_count("order_datetime"), Some(1));
    assert_eq!(report.exploration.null_count("order_date"), Some(1));

    let daily_total: usize = report.daily.series.iter().map(|d| d.count).sum();
    assert_eq!(daily_total, 12);
    assert_eq!(report.cities.totals[0], ("Dubai".to_string(), 7));
    let city_daily_total: usize = report.cities.daily.iter().map(|d| d.count).sum();
    assert_eq!(city_daily_total, 12);
    assert_eq!(report.insights.total_rows, 13);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_banner_carries_start_time() {
    let text = banner("2026-01-01 00:00:00");
    assert!(text.starts_with("TALABAT UAE ORDERS DATA ANALYSIS"));
    assert!(text.ends_with("Analysis started at: 2026-01-01 00:00:00"));
}
