//! Most frequent values of categorical columns.

use crate::error::Result;
use crate::types::{CategoryCount, ColumnTopCategories, DatasetSummary, TopCategories};
use crate::utils::{column_series, share, string_values};
use polars::prelude::*;
use std::collections::HashMap;

/// Collect the `k` most frequent values of each categorical column.
///
/// Missing cells are ignored. Ties are broken by the order in which values
/// were first encountered. With `max_columns`, only the first that many
/// categorical columns are considered.
pub fn top_categories(
    df: &DataFrame,
    summary: &DatasetSummary,
    k: usize,
    max_columns: Option<usize>,
) -> Result<TopCategories> {
    let limit = max_columns.unwrap_or(usize::MAX);
    let columns = summary
        .categorical_columns()
        .into_iter()
        .take(limit)
        .map(|name| -> Result<ColumnTopCategories> {
            let values = string_values(column_series(df, name)?)?;
            Ok(ColumnTopCategories {
                column: name.to_string(),
                values: top_k_values(values.iter().flatten().map(String::as_str), k),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TopCategories { columns })
}

/// Count values and return the `k` most frequent ones.
pub fn top_k_values<'a>(values: impl IntoIterator<Item = &'a str>, k: usize) -> Vec<CategoryCount> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for value in values {
        total += 1;
        match index.get(value) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(value, order.len());
                order.push((value, 1));
            }
        }
    }

    // stable: equal counts keep first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order
        .into_iter()
        .take(k)
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
            share: share(count, total),
        })
        .collect()
}
