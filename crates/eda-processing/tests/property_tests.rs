//! Property tests for summary, quality and correlation invariants.

use eda_processing::{
    QualityThresholds, compute_quality_flags, correlation_matrix, missing_table,
    pearson_pairwise, quality_score, summarize_dataset, top_k_values,
};
use polars::prelude::*;
use proptest::prelude::*;

fn column_strategy(len: usize) -> impl Strategy<Value = Vec<Option<i32>>> {
    prop::collection::vec(prop::option::weighted(0.7, -50i32..50), len)
}

fn frame_strategy() -> impl Strategy<Value = DataFrame> {
    (0usize..40).prop_flat_map(|rows| {
        (column_strategy(rows), column_strategy(rows), column_strategy(rows)).prop_map(
            |(a, b, c)| df!("a" => a, "b" => b, "c" => c).expect("valid frame"),
        )
    })
}

proptest! {
    #[test]
    fn missing_share_and_score_in_unit_interval(df in frame_strategy()) {
        let summary = summarize_dataset(&df).unwrap();
        let missing = missing_table(&df).unwrap();

        for entry in &missing.entries {
            prop_assert!((0.0..=1.0).contains(&entry.missing_share));
        }
        for column in &summary.columns {
            prop_assert_eq!(column.missing + column.non_missing, summary.n_rows);
        }

        let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
        prop_assert!((0.0..=1.0).contains(&flags.quality_score));
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal(df in frame_strategy()) {
        let summary = summarize_dataset(&df).unwrap();
        let matrix = correlation_matrix(&df, &summary).unwrap();

        let n = matrix.columns.len();
        for i in 0..n {
            prop_assert_eq!(matrix.values[i][i], Some(1.0));
            for j in 0..n {
                prop_assert_eq!(matrix.values[i][j], matrix.values[j][i]);
                if let Some(r) = matrix.values[i][j] {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
    }

    #[test]
    fn pearson_is_bounded(
        pairs in prop::collection::vec((prop::option::of(-1e3f64..1e3), prop::option::of(-1e3f64..1e3)), 0..50)
    ) {
        let (a, b): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        if let Some(r) = pearson_pairwise(&a, &b) {
            prop_assert!((-1.0..=1.0).contains(&r));
            prop_assert_eq!(Some(r), pearson_pairwise(&b, &a));
        }
    }

    #[test]
    fn score_is_clamped(share in 0.0f64..=1.0, few in any::<bool>(), constant in any::<bool>()) {
        let score = quality_score(share, few, constant);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert!(score <= 1.0 - share + 1e-12);
    }

    #[test]
    fn top_k_is_sorted_and_bounded(
        values in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "e"]), 0..60),
        k in 0usize..6,
    ) {
        let top = top_k_values(values.iter().copied(), k);

        prop_assert!(top.len() <= k);
        prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(top.iter().map(|c| c.count).sum::<usize>() <= values.len());
        for entry in &top {
            let actual = values.iter().filter(|v| **v == entry.value).count();
            prop_assert_eq!(entry.count, actual);
        }
    }
}
