use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio_postgres::SimpleQueryMessage;

use crate::error::WorkbenchError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Build a result set from the messages of one simple-query execution.
///
/// Row messages from every statement in the submitted text land in one set,
/// in backend-return order. Command-completion counts accumulate into
/// `rows_affected`.
///
/// # Errors
/// Returns errors from row value extraction.
pub fn build_result_set(messages: &[SimpleQueryMessage]) -> Result<ResultSet, WorkbenchError> {
    let mut result_set = ResultSet::with_capacity(messages.len());
    let mut rows_affected: usize = 0;

    for message in messages {
        match message {
            SimpleQueryMessage::Row(row) => {
                if result_set.get_column_names().is_none() {
                    let cols: Vec<String> =
                        row.columns().iter().map(|c| c.name().to_string()).collect();
                    result_set.set_column_names(Arc::new(cols));
                }
                let mut row_values = Vec::with_capacity(row.len());
                for idx in 0..row.len() {
                    row_values.push(classify_value(row.try_get(idx)?));
                }
                result_set.add_row_values(row_values);
            }
            SimpleQueryMessage::CommandComplete(count) => {
                rows_affected += usize::try_from(*count).map_err(|e| {
                    WorkbenchError::ExecutionError(format!("Invalid rows affected count: {e}"))
                })?;
            }
            _ => {}
        }
    }

    result_set.rows_affected = rows_affected;
    Ok(result_set)
}

/// Classify one text-protocol column value.
///
/// The simple-query protocol returns every column as text; integers, floats,
/// booleans (`t`/`f`), and timestamps are recognized, everything else stays
/// text.
fn classify_value(value: Option<&str>) -> RowValues {
    let Some(text) = value else {
        return RowValues::Null;
    };
    if let Ok(n) = text.parse::<i64>() {
        return RowValues::Int(n);
    }
    if let Ok(f) = text.parse::<f64>() {
        return RowValues::Float(f);
    }
    match text {
        "t" => RowValues::Bool(true),
        "f" => RowValues::Bool(false),
        _ => {
            if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
                return RowValues::Timestamp(ts);
            }
            RowValues::Text(text.to_string())
        }
    }
}
