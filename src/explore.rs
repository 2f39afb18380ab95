// Diagnostic view of the freshly loaded table: schema, describe(), nulls and
// the three quality checks. Nothing here feeds later stages.
use crate::output::print_table;
use crate::types::{ColumnInfoRow, DescribeRow, ExtraColumn, NullCountRow, OrderRecord};
use crate::util::{average, format_stat, parse_f64_safe, quantile, sample_std};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    fn from_values(column: &str, values: Vec<f64>) -> Self {
        Self {
            column: column.to_string(),
            count: values.len(),
            mean: average(&values),
            std: sample_std(&values),
            min: quantile(values.clone(), 0.0),
            q25: quantile(values.clone(), 0.25),
            q50: quantile(values.clone(), 0.5),
            q75: quantile(values.clone(), 0.75),
            max: quantile(values, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub column: String,
    pub dtype: &'static str,
    pub non_null: usize,
}

impl ColumnInfo {
    fn new(column: &str, dtype: &'static str, non_null: usize) -> Self {
        Self {
            column: column.to_string(),
            dtype,
            non_null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityChecks {
    pub zero_order_values: usize,
    pub negative_delivery_times: usize,
    pub negative_delivery_fees: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub summaries: Vec<ColumnSummary>,
    pub quality: QualityChecks,
}

impl Exploration {
    pub fn null_count(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| self.rows - c.non_null)
    }
}

/// Numeric values of an extra column, or `None` if any present cell is not a number.
fn numeric_cells(column: &ExtraColumn) -> Option<Vec<f64>> {
    column
        .cells
        .iter()
        .flatten()
        .map(|cell| parse_f64_safe(cell))
        .collect()
}

/// Profile the order table. Extra header columns are listed after the known
/// ones and the derived `order_date` comes last.
pub fn explore(records: &[OrderRecord], extra: &[ExtraColumn]) -> Exploration {
    let rows = records.len();
    let present = |f: fn(&OrderRecord) -> bool| records.iter().filter(|r| f(r)).count();

    let order_values: Vec<f64> = records.iter().filter_map(|r| r.order_value).collect();
    let delivery_times: Vec<f64> = records.iter().filter_map(|r| r.delivery_time_min).collect();
    let delivery_fees: Vec<f64> = records.iter().filter_map(|r| r.delivery_fee).collect();

    let mut columns = vec![
        ColumnInfo::new("order_datetime", "datetime", present(|r| r.order_datetime.is_some())),
        ColumnInfo::new("city", "string", present(|r| r.city.is_some())),
        ColumnInfo::new("order_value", "float64", order_values.len()),
        ColumnInfo::new("delivery_time_min", "float64", delivery_times.len()),
        ColumnInfo::new("delivery_fee", "float64", delivery_fees.len()),
        ColumnInfo::new("payment_method", "string", present(|r| r.payment_method.is_some())),
        ColumnInfo::new("promo_code_used", "string", present(|r| r.promo_code_used.is_some())),
        ColumnInfo::new(
            "restaurant_category",
            "string",
            present(|r| r.restaurant_category.is_some()),
        ),
    ];

    let quality = QualityChecks {
        zero_order_values: order_values.iter().filter(|v| **v == 0.0).count(),
        negative_delivery_times: delivery_times.iter().filter(|v| **v < 0.0).count(),
        negative_delivery_fees: delivery_fees.iter().filter(|v| **v < 0.0).count(),
    };

    let mut summaries = vec![
        ColumnSummary::from_values("order_value", order_values),
        ColumnSummary::from_values("delivery_time_min", delivery_times),
        ColumnSummary::from_values("delivery_fee", delivery_fees),
    ];

    for column in extra {
        let non_null = column.cells.iter().flatten().count();
        match numeric_cells(column) {
            Some(values) => {
                columns.push(ColumnInfo::new(&column.name, "float64", non_null));
                summaries.push(ColumnSummary::from_values(&column.name, values));
            }
            None => columns.push(ColumnInfo::new(&column.name, "string", non_null)),
        }
    }
    columns.push(ColumnInfo::new("order_date", "date", present(|r| r.order_date.is_some())));

    Exploration {
        rows,
        columns,
        summaries,
        quality,
    }
}

pub fn print_exploration(exp: &Exploration) {
    println!("\nDataset Info:");
    println!("{} entries, {} columns\n", exp.rows, exp.columns.len());
    let info: Vec<ColumnInfoRow> = exp
        .columns
        .iter()
        .enumerate()
        .map(|(index, c)| ColumnInfoRow {
            index,
            column: c.column.clone(),
            non_null: c.non_null,
            dtype: c.dtype.to_string(),
        })
        .collect();
    print_table(&info);

    println!("\nSummary Statistics:");
    let describe: Vec<DescribeRow> = exp
        .summaries
        .iter()
        .map(|s| DescribeRow {
            column: s.column.clone(),
            count: s.count,
            mean: format_stat(s.mean, 6),
            std: format_stat(s.std, 6),
            min: format_stat(s.min, 6),
            q25: format_stat(s.q25, 6),
            q50: format_stat(s.q50, 6),
            q75: format_stat(s.q75, 6),
            max: format_stat(s.max, 6),
        })
        .collect();
    print_table(&describe);

    println!("\nMissing Values:");
    let nulls: Vec<NullCountRow> = exp
        .columns
        .iter()
        .map(|c| NullCountRow {
            column: c.column.clone(),
            missing: exp.rows - c.non_null,
        })
        .collect();
    print_table(&nulls);

    println!("\nData Quality Checks:");
    println!("Zero order values: {}", exp.quality.zero_order_values);
    println!("Negative delivery times: {}", exp.quality.negative_delivery_times);
    println!("Negative delivery fees: {}", exp.quality.negative_delivery_fees);
}
