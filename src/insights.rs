use crate::types::{OrderRecord, Share};
use crate::util::{average, format_number, format_stat, median, percent};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub total_rows: usize,
    /// Means and the median are `None` when every cell in the column is null.
    pub avg_order_value: Option<f64>,
    pub median_order_value: Option<f64>,
    pub total_revenue: f64,
    pub avg_delivery_time: Option<f64>,
    pub avg_delivery_fee: Option<f64>,
    pub payment_methods: Vec<Share>,
    pub promo_usage: Vec<Share>,
    pub top_categories: Vec<Share>,
}

/// Frequency of each non-null label, most frequent first.
///
/// Percentages are taken against `total`, so nulls pull the sum below 100.
pub fn distribution<'a, I>(labels: I, total: usize) -> Vec<Share>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut shares: Vec<Share> = counts
        .into_iter()
        .map(|(label, count)| Share {
            label: label.to_string(),
            count,
            percent: percent(count, total),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    shares
}

pub fn business_insights(records: &[OrderRecord], top_categories: usize) -> Insights {
    let total_rows = records.len();
    let values: Vec<f64> = records.iter().filter_map(|r| r.order_value).collect();
    let times: Vec<f64> = records.iter().filter_map(|r| r.delivery_time_min).collect();
    let fees: Vec<f64> = records.iter().filter_map(|r| r.delivery_fee).collect();

    let mut categories = distribution(
        records.iter().filter_map(|r| r.restaurant_category.as_deref()),
        total_rows,
    );
    categories.truncate(top_categories);

    Insights {
        total_rows,
        avg_order_value: average(&values),
        median_order_value: median(values.clone()),
        total_revenue: values.iter().sum(),
        avg_delivery_time: average(&times),
        avg_delivery_fee: average(&fees),
        payment_methods: distribution(
            records.iter().filter_map(|r| r.payment_method.as_deref()),
            total_rows,
        ),
        promo_usage: distribution(
            records.iter().filter_map(|r| r.promo_code_used.as_deref()),
            total_rows,
        ),
        top_categories: categories,
    }
}

fn share_lines(shares: &[Share]) -> impl Iterator<Item = String> + '_ {
    shares
        .iter()
        .map(|s| format!("{}: {} ({:.1}%)", s.label, s.count, s.percent))
}

/// The insights block as printed, undefined statistics shown as `NaN`.
pub fn render_insights(ins: &Insights, currency: &str) -> String {
    let money = |v: Option<f64>| format!("{} {}", currency, format_stat(v, 2));
    let mut lines = vec![
        "Order Value Analysis:".to_string(),
        format!("Average order value: {}", money(ins.avg_order_value)),
        format!("Median order value: {}", money(ins.median_order_value)),
        format!("Total revenue: {} {}", currency, format_number(ins.total_revenue, 2)),
        String::new(),
        "Delivery Analysis:".to_string(),
        format!("Average delivery time: {} minutes", format_stat(ins.avg_delivery_time, 1)),
        format!("Average delivery fee: {}", money(ins.avg_delivery_fee)),
        String::new(),
        "Payment Methods:".to_string(),
    ];
    lines.extend(share_lines(&ins.payment_methods));
    lines.push(String::new());
    lines.push("Promo Code Usage:".to_string());
    lines.extend(share_lines(&ins.promo_usage));
    lines.push(String::new());
    lines.push("Top Restaurant Categories:".to_string());
    lines.extend(share_lines(&ins.top_categories));
    lines.join("\n")
}

pub fn print_insights(ins: &Insights, currency: &str) {
    println!("{}", render_insights(ins, currency));
}
