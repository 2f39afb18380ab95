use crate::error::AnalysisError;
use crate::types::{ExtraColumn, OrderRecord, RawRow, EXPECTED_COLUMNS};
use crate::util::{non_empty, parse_f64_safe, parse_timestamp};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// The order table plus what the load step reports about it.
#[derive(Debug, Clone)]
pub struct LoadedOrders {
    pub records: Vec<OrderRecord>,
    /// Header columns the analysis does not use, in file order.
    pub extra_columns: Vec<ExtraColumn>,
    /// Distinct non-null order dates.
    pub distinct_days: usize,
}

impl LoadedOrders {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose timestamp cell was blank.
    pub fn undated(&self) -> usize {
        self.records.iter().filter(|r| r.order_date.is_none()).count()
    }
}

pub fn load_orders<P: AsRef<Path>>(path: P) -> Result<LoadedOrders, AnalysisError> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading dataset");
    let file = std::fs::File::open(path)?;
    read_orders(file)
}

/// Parse an order table from any reader.
///
/// A blank timestamp is kept as a null; text that is present but unparsable is fatal.
pub fn read_orders<R: Read>(reader: R) -> Result<LoadedOrders, AnalysisError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in EXPECTED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalysisError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut extra_columns: Vec<(usize, ExtraColumn)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !EXPECTED_COLUMNS.contains(h))
        .map(|(idx, h)| {
            let column = ExtraColumn {
                name: h.to_string(),
                cells: Vec::new(),
            };
            (idx, column)
        })
        .collect();

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // 1-based data row number, header excluded.
        let row_no = idx + 1;
        let raw: StringRecord = result?;
        for (pos, column) in extra_columns.iter_mut() {
            column.cells.push(non_empty(raw.get(*pos)).map(str::to_string));
        }
        let row: RawRow = raw.deserialize(Some(&headers))?;
        records.push(convert_row(row_no, row)?);
    }

    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let distinct_days = records
        .iter()
        .filter_map(|r| r.order_date)
        .collect::<BTreeSet<_>>()
        .len();
    let loaded = LoadedOrders {
        records,
        extra_columns: extra_columns.into_iter().map(|(_, c)| c).collect(),
        distinct_days,
    };
    let undated = loaded.undated();
    if undated > 0 {
        warn!(undated, "Rows without a timestamp are left out of date groupings");
    }
    debug!(rows = loaded.len(), distinct_days, "Parsed order table");
    Ok(loaded)
}

fn convert_row(row_no: usize, row: RawRow) -> Result<OrderRecord, AnalysisError> {
    let order_datetime = match non_empty(row.order_datetime.as_deref()) {
        None => None,
        Some(s) => Some(parse_timestamp(s).ok_or_else(|| AnalysisError::Timestamp {
            row: row_no,
            value: s.to_string(),
        })?),
    };

    let number = |column: &str, cell: Option<String>| -> Result<Option<f64>, AnalysisError> {
        match non_empty(cell.as_deref()) {
            None => Ok(None),
            Some(s) => parse_f64_safe(s).map(Some).ok_or_else(|| AnalysisError::Number {
                row: row_no,
                column: column.to_string(),
                value: s.to_string(),
            }),
        }
    };
    let text = |cell: Option<String>| non_empty(cell.as_deref()).map(str::to_string);

    let mut record = OrderRecord::new(order_datetime);
    record.city = text(row.city);
    record.order_value = number("order_value", row.order_value)?;
    record.delivery_time_min = number("delivery_time_min", row.delivery_time_min)?;
    record.delivery_fee = number("delivery_fee", row.delivery_fee)?;
    record.payment_method = text(row.payment_method);
    record.promo_code_used = text(row.promo_code_used);
    record.restaurant_category = text(row.restaurant_category);
    Ok(record)
}
