//! Conversion from polars `DataFrame` into [`Dataset`].

use super::{Column, Dataset};
use crate::error::{Result, ResultExt};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use tracing::debug;

impl Dataset {
    /// Convert a polars `DataFrame`.
    ///
    /// Integer and float columns become numeric; every other dtype
    /// (strings, categoricals, booleans, dates) becomes categorical through a
    /// string cast. Nulls and float NaN become missing values.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let name = series.name().to_string();

            let column = if is_numeric_dtype(series.dtype()) {
                let casted = series
                    .cast(&DataType::Float64)
                    .context(format!("Casting column '{}' to Float64", name))?;
                let values: Vec<Option<f64>> = casted.f64()?.into_iter().collect();
                Column::numeric(name, values)
            } else {
                let casted = series
                    .cast(&DataType::String)
                    .context(format!("Casting column '{}' to String", name))?;
                let values: Vec<Option<String>> = casted
                    .str()?
                    .into_iter()
                    .map(|v| v.map(str::to_string))
                    .collect();
                Column::categorical(name, values)
            };
            columns.push(column);
        }

        debug!(
            "Converted DataFrame with shape {:?} into dataset",
            df.shape()
        );
        Dataset::new(columns)
    }
}
