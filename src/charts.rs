//! PNG line charts for the daily and per-city order series.

use crate::config::ChartSettings;
use crate::error::AnalysisError;
use crate::trends::{CityTrends, DailyTrends};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};

const FONT: &str = "sans-serif";
const DAILY_TITLE: &str = "Talabat UAE - Daily Orders Trend (7-Day Moving Average)";
const CITY_TITLE: &str = "Talabat UAE - Daily Orders by City";

type DrawResult = Result<(), Box<dyn Error>>;

/// Date axis bounds padded by one day on each side so a single day still has width.
pub fn date_bounds<I>(dates: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut iter = dates.into_iter();
    let first = iter.next()?;
    let (lo, hi) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some((lo.pred_opt().unwrap_or(lo), hi.succ_opt().unwrap_or(hi)))
}

/// Top of the y axis: 10% headroom over the largest count, never below 1.
pub fn count_ceiling<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let max = counts.into_iter().max().unwrap_or(0) as f64;
    (max * 1.1).max(1.0)
}

fn render_error(path: &Path, message: impl ToString) -> AnalysisError {
    AnalysisError::Render {
        chart: path.display().to_string(),
        message: message.to_string(),
    }
}

pub fn render_daily_trend<P: AsRef<Path>>(
    trends: &DailyTrends,
    settings: &ChartSettings,
    path: P,
) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    let (start, end) = date_bounds(trends.series.iter().map(|d| d.date))
        .ok_or_else(|| render_error(path, "daily series is empty"))?;
    draw_daily(trends, settings, path, start..end).map_err(|e| render_error(path, e))?;
    info!(path = %path.display(), "Daily orders trend chart saved");
    Ok(())
}

pub fn render_city_trends<P: AsRef<Path>>(
    trends: &CityTrends,
    settings: &ChartSettings,
    path: P,
) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    let (start, end) = date_bounds(trends.daily.iter().map(|d| d.date))
        .ok_or_else(|| render_error(path, "city series is empty"))?;
    draw_cities(trends, settings, path, start..end).map_err(|e| render_error(path, e))?;
    info!(path = %path.display(), cities = trends.totals.len(), "City trends chart saved");
    Ok(())
}

fn draw_daily(
    trends: &DailyTrends,
    settings: &ChartSettings,
    path: &Path,
    dates: std::ops::Range<NaiveDate>,
) -> DrawResult {
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = count_ceiling(trends.series.iter().map(|d| d.count));
    let mut chart = ChartBuilder::on(&root)
        .caption(DAILY_TITLE, (FONT, settings.px(16) as f64, FontStyle::Bold))
        .margin(settings.px(10))
        .x_label_area_size(settings.px(70))
        .y_label_area_size(settings.px(50))
        .build_cartesian_2d(dates, 0f64..y_max)?;

    let date_fmt = |d: &NaiveDate| d.format("%Y-%m-%d").to_string();
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Number of Orders")
        .x_labels(12)
        .x_label_formatter(&date_fmt)
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .axis_desc_style((FONT, settings.px(12) as f64))
        .y_label_style((FONT, settings.px(10) as f64))
        .x_label_style(
            (FONT, settings.px(10) as f64)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .bold_line_style(BLACK.mix(0.15).stroke_width(1))
        .light_line_style(BLACK.mix(0.05).stroke_width(1))
        .draw()?;

    let rolling_style = BLUE.stroke_width(settings.px(2));
    let raw_style = RED.mix(0.3).stroke_width(settings.px(1));

    let rolling: Vec<(NaiveDate, f64)> = trends
        .series
        .iter()
        .filter_map(|d| d.rolling_avg.map(|avg| (d.date, avg)))
        .collect();
    debug!(points = rolling.len(), window = trends.window, "Plotting rolling average");
    chart
        .draw_series(LineSeries::new(rolling, rolling_style))?
        .label(format!("{}-Day Rolling Avg", trends.window))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], rolling_style));

    chart
        .draw_series(LineSeries::new(
            trends.series.iter().map(|d| (d.date, d.count as f64)),
            raw_style,
        ))?
        .label("Daily Orders")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], raw_style));

    chart
        .configure_series_labels()
        .label_font((FONT, settings.px(11) as f64))
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.stroke_width(1))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_cities(
    trends: &CityTrends,
    settings: &ChartSettings,
    path: &Path,
    dates: std::ops::Range<NaiveDate>,
) -> DrawResult {
    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = count_ceiling(trends.daily.iter().map(|d| d.count));
    let mut chart = ChartBuilder::on(&root)
        .caption(CITY_TITLE, (FONT, settings.px(16) as f64, FontStyle::Bold))
        .margin(settings.px(10))
        .x_label_area_size(settings.px(70))
        .y_label_area_size(settings.px(50))
        .build_cartesian_2d(dates, 0f64..y_max)?;

    let date_fmt = |d: &NaiveDate| d.format("%Y-%m-%d").to_string();
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Number of Orders")
        .x_labels(12)
        .x_label_formatter(&date_fmt)
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .axis_desc_style((FONT, settings.px(12) as f64))
        .label_style((FONT, settings.px(10) as f64))
        .bold_line_style(BLACK.mix(0.15).stroke_width(1))
        .light_line_style(BLACK.mix(0.05).stroke_width(1))
        .draw()?;

    for (idx, city) in trends.cities().enumerate() {
        let style = Palette99::pick(idx).stroke_width(settings.px(3) / 2);
        let points: Vec<(NaiveDate, f64)> = trends
            .series_for(city)
            .map(|d| (d.date, d.count as f64))
            .collect();
        chart
            .draw_series(LineSeries::new(points, style))?
            .label(city)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .label_font((FONT, settings.px(11) as f64))
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.stroke_width(1))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::{city_trends, daily_trends};
    use crate::types::{DailyCount, OrderRecord};
    use std::fs;
    use std::path::PathBuf;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    fn assert_png(path: &Path) {
        let bytes = fs::read(path).unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(&PNG_MAGIC), "{} is not a PNG", path.display());
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn bounds_pad_single_day() {
        assert_eq!(date_bounds([day(10)]), Some((day(9), day(11))));
    }

    #[test]
    fn bounds_span_min_and_max() {
        assert_eq!(date_bounds([day(5), day(2), day(20)]), Some((day(1), day(21))));
        assert_eq!(date_bounds(Vec::<NaiveDate>::new()), None);
    }

    #[test]
    fn ceiling_has_headroom() {
        assert!((count_ceiling([10, 40, 20]) - 44.0).abs() < 1e-9);
        assert_eq!(count_ceiling(Vec::<usize>::new()), 1.0);
    }

    #[test]
    fn empty_series_is_a_render_error() {
        let trends = DailyTrends {
            series: Vec::<DailyCount>::new(),
            window: 7,
        };
        let err = render_daily_trend(&trends, &ChartSettings::default(), "unused.png").unwrap_err();
        assert!(matches!(err, AnalysisError::Render { .. }));
    }

    #[test]
    fn unwritable_target_is_a_render_error() {
        let trends = DailyTrends {
            series: vec![DailyCount {
                date: day(1),
                count: 3,
                rolling_avg: None,
            }],
            window: 7,
        };
        let settings = ChartSettings {
            width: 200,
            height: 100,
            scale: 1,
        };
        let path = std::env::temp_dir()
            .join("order_trends_missing_dir")
            .join("nested")
            .join("chart.png");
        let err = render_daily_trend(&trends, &settings, &path).unwrap_err();
        assert!(matches!(err, AnalysisError::Render { .. }));
    }

    #[test]
    fn renders_both_charts_and_overwrites() {
        let records: Vec<OrderRecord> = (1..=10u32)
            .flat_map(|d| {
                let cities: &[&str] = if d % 2 == 0 { &["Dubai", "Sharjah"] } else { &["Dubai"] };
                cities.iter().map(move |c| {
                    let mut r = OrderRecord::at(day(d).and_hms_opt(12, 0, 0).unwrap());
                    r.city = Some(c.to_string());
                    r
                })
            })
            .collect();
        let daily = daily_trends(&records, 7);
        let cities = city_trends(&records);
        let settings = ChartSettings {
            width: 600,
            height: 300,
            scale: 1,
        };

        let daily_path = temp_path("order_trends_test_daily.png");
        let city_path = temp_path("order_trends_test_city.png");
        // Stale content must be replaced, not appended to.
        fs::write(&daily_path, b"stale").unwrap();
        let _ = fs::remove_file(&city_path);

        render_daily_trend(&daily, &settings, &daily_path).unwrap();
        render_city_trends(&cities, &settings, &city_path).unwrap();
        assert_png(&daily_path);
        assert_png(&city_path);

        render_daily_trend(&daily, &settings, &daily_path).unwrap();
        render_city_trends(&cities, &settings, &city_path).unwrap();
        assert_png(&daily_path);
        assert_png(&city_path);

        fs::remove_file(&daily_path).unwrap();
        fs::remove_file(&city_path).unwrap();
    }
}
