use riskscope_core::schema::FEATURE_COLUMNS;
use riskscope_core::{Dataset, Result, RiskError};

/// Records reduced to a fixed, ordered feature subset.
///
/// `rows[i]` belongs to `ids[i]`, which is the i-th input record; the column
/// order of every row is `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub ids: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Select the v1 behavioral feature columns.
pub fn extract_default_features(dataset: &Dataset) -> Result<FeatureMatrix> {
    extract_features(dataset, &FEATURE_COLUMNS)
}

/// Select `required` columns, in that order, from every record.
///
/// Fails with a schema error before touching any row if a column is absent
/// from the header. A record built without one of the columns is reported
/// as an invalid value. The dataset is not modified.
pub fn extract_features(dataset: &Dataset, required: &[&str]) -> Result<FeatureMatrix> {
    dataset.validate_schema(required)?;

    let mut ids = Vec::with_capacity(dataset.len());
    let mut rows = Vec::with_capacity(dataset.len());

    for (idx, record) in dataset.records.iter().enumerate() {
        let row = required
            .iter()
            .map(|column| {
                record.value(column).ok_or_else(|| RiskError::InvalidValue {
                    // Line numbers as in the source file: header is line 1.
                    row: idx + 2,
                    column: (*column).to_owned(),
                    value: String::new(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        ids.push(record.id.clone());
        rows.push(row);
    }

    tracing::debug!(
        rows = rows.len(),
        columns = required.len(),
        "feature matrix extracted"
    );

    Ok(FeatureMatrix {
        columns: required.iter().map(|c| (*c).to_owned()).collect(),
        ids,
        rows,
    })
}
