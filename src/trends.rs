use crate::types::{CityDailyCount, DailyCount, OrderRecord};
use crate::util::{average, rolling_mean};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Orders per calendar day, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTrends {
    pub series: Vec<DailyCount>,
    pub window: usize,
}

impl DailyTrends {
    pub fn total_days(&self) -> usize {
        self.series.len()
    }

    /// Mean orders per day; `None` when no row carries a date.
    pub fn mean_count(&self) -> Option<f64> {
        let counts: Vec<f64> = self.series.iter().map(|d| d.count as f64).collect();
        average(&counts)
    }

    pub fn max_count(&self) -> usize {
        self.series.iter().map(|d| d.count).max().unwrap_or(0)
    }

    pub fn min_count(&self) -> usize {
        self.series.iter().map(|d| d.count).min().unwrap_or(0)
    }

    /// The `n` days with the most orders, largest first. Equal counts keep date order.
    pub fn busiest(&self, n: usize) -> Vec<DailyCount> {
        let mut days = self.series.clone();
        days.sort_by(|a, b| b.count.cmp(&a.count));
        days.truncate(n);
        days
    }
}

/// Rows without a date are left out of the series.
pub fn daily_trends(records: &[OrderRecord], window: usize) -> DailyTrends {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in records.iter().filter_map(|r| r.order_date) {
        *by_date.entry(date).or_default() += 1;
    }
    let counts: Vec<usize> = by_date.values().copied().collect();
    let rolled = rolling_mean(&counts, window);
    let series = by_date
        .into_iter()
        .zip(rolled)
        .map(|((date, count), rolling_avg)| DailyCount {
            date,
            count,
            rolling_avg,
        })
        .collect();
    DailyTrends { series, window }
}

/// Per-city totals and the per-(date, city) series behind the city chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CityTrends {
    /// Total orders per city, most orders first.
    pub totals: Vec<(String, usize)>,
    /// Sorted by date, then city.
    pub daily: Vec<CityDailyCount>,
    /// Mean orders per active day for each city, highest first.
    pub daily_average: Vec<(String, f64)>,
}

impl CityTrends {
    /// City names in the order they appear in `totals`.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.totals.iter().map(|(c, _)| c.as_str())
    }

    pub fn series_for<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a CityDailyCount> {
        self.daily.iter().filter(move |d| d.city == city)
    }
}

pub fn city_trends(records: &[OrderRecord]) -> CityTrends {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    let mut by_day: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for r in records {
        let Some(city) = r.city.as_deref() else {
            continue;
        };
        *totals.entry(city).or_default() += 1;
        // Undated rows still count towards the city total.
        if let Some(date) = r.order_date {
            *by_day.entry((date, city)).or_default() += 1;
        }
    }

    let mut totals: Vec<(String, usize)> = totals
        .into_iter()
        .map(|(c, n)| (c.to_string(), n))
        .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let daily: Vec<CityDailyCount> = by_day
        .into_iter()
        .map(|((date, city), count)| CityDailyCount {
            date,
            city: city.to_string(),
            count,
        })
        .collect();

    let mut per_city: HashMap<&str, Vec<f64>> = HashMap::new();
    for d in &daily {
        per_city.entry(d.city.as_str()).or_default().push(d.count as f64);
    }
    let mut daily_average: Vec<(String, f64)> = per_city
        .into_iter()
        .filter_map(|(c, counts)| Some((c.to_string(), average(&counts)?)))
        .collect();
    daily_average.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    CityTrends {
        totals,
        daily,
        daily_average,
    }
}
