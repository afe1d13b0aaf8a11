//! Pairwise Pearson correlation among numeric columns.

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::rigor::{RigorCheck, evaluate, pair_count};
use crate::types::{
    AnalysisDetails, AnalysisKind, AnalysisResult, CorrelationDetails, CorrelationMatrix,
    CorrelationPair,
};
use tracing::debug;

/// Pearson coefficient over the rows where both values are present.
///
/// `None` when fewer than two complete pairs exist, when either side has
/// zero variance, or when the arithmetic does not produce a finite value.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    let n = xs.len();
    if n < 2 || is_constant(&xs) || is_constant(&ys) {
        return None;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in xs.iter().zip(ys.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Zero variance, decided on the values themselves since a rounded mean
/// can leave a tiny nonzero sum of squares.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Builds the correlation matrix and extracts strong pairs.
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Run correlation analysis.
    ///
    /// Fewer than two numeric columns yields an empty result with an
    /// explanatory summary and no warnings.
    pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> AnalysisResult {
        let numeric_count = dataset.numeric_column_count();
        if numeric_count < 2 {
            debug!("Correlation needs 2 numeric columns, found {}", numeric_count);
            return AnalysisResult::new(
                AnalysisKind::Correlation,
                "Need at least 2 numeric variables for correlation analysis.",
                AnalysisDetails::Empty {},
                Vec::new(),
            );
        }

        let matrix = Self::correlation_matrix(dataset);
        let strong = Self::strong_pairs(&matrix, config.strong_correlation_threshold);

        let tests = pair_count(numeric_count);
        let warnings: Vec<_> = evaluate(RigorCheck::CorrelationTests { tests }, &config.rigor)
            .into_iter()
            .collect();

        let mut summary = format!(
            "Analyzed correlations among {} variables. ",
            numeric_count
        );
        if strong.is_empty() {
            summary.push_str(&format!(
                "No strong correlations (|r| > {}) detected.",
                config.strong_correlation_threshold
            ));
        } else {
            summary.push_str(&format!(
                "Found {} strong relationships (|r| > {}).",
                strong.len(),
                config.strong_correlation_threshold
            ));
        }

        debug!("Tested {} pairs, {} strong", tests, strong.len());

        AnalysisResult::new(
            AnalysisKind::Correlation,
            summary,
            AnalysisDetails::Correlation(CorrelationDetails {
                correlation_matrix: matrix,
                strong_correlations: strong,
            }),
            warnings,
        )
    }

    /// Full pairwise-complete Pearson matrix over the numeric columns.
    ///
    /// Symmetric. The diagonal is exactly 1.0 for columns with nonzero
    /// variance and `None` otherwise.
    pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
        let columns: Vec<(&str, &[Option<f64>])> = dataset.numeric_columns().collect();
        let size = columns.len();
        let mut values = vec![vec![None; size]; size];

        for i in 0..size {
            values[i][i] = pearson(columns[i].1, columns[i].1).map(|_| 1.0);
            for j in (i + 1)..size {
                let r = pearson(columns[i].1, columns[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix {
            labels: columns.iter().map(|(name, _)| name.to_string()).collect(),
            values,
        }
    }

    /// Upper-triangle pairs with a defined coefficient whose magnitude
    /// exceeds `threshold`, strongest first. Equal magnitudes keep their
    /// enumeration order.
    pub fn strong_pairs(matrix: &CorrelationMatrix, threshold: f64) -> Vec<CorrelationPair> {
        let size = matrix.size();
        let mut pairs = Vec::new();

        for i in 0..size {
            for j in (i + 1)..size {
                if let Some(r) = matrix.values[i][j]
                    && r.abs() > threshold
                {
                    pairs.push(CorrelationPair {
                        var1: matrix.labels[i].clone(),
                        var2: matrix.labels[j].clone(),
                        correlation: r,
                    });
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::rigor::{Severity, WarningCategory};

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn details(result: &AnalysisResult) -> &CorrelationDetails {
        match &result.details {
            AnalysisDetails::Correlation(details) => details,
            other => panic!("expected correlation details, got {:?}", other),
        }
    }

    // ==================== pearson tests ====================

    #[test]
    fn test_pearson_perfect() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[2.0, 4.0, 6.0, 8.0]);
        let z = some(&[8.0, 6.0, 4.0, 2.0]);
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        // The row with a missing y is ignored entirely
        let x = vec![Some(1.0), Some(2.0), Some(3.0), Some(100.0)];
        let y = vec![Some(1.0), Some(2.0), Some(3.0), None];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance_is_undefined() {
        let x = some(&[1.0, 2.0, 3.0]);
        let y = some(&[5.0, 5.0, 5.0]);
        assert_eq!(pearson(&x, &y), None);
    }

    #[test]
    fn test_pearson_constant_decimal_is_undefined() {
        // Mean of ten 0.1 values is not exactly 0.1
        let flat = vec![Some(0.1); 10];
        let rising: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        assert_eq!(pearson(&flat, &rising), None);
        assert_eq!(pearson(&rising, &flat), None);
        assert_eq!(pearson(&flat, &flat), None);
    }

    #[test]
    fn test_pearson_too_few_pairs() {
        let x = vec![Some(1.0), None];
        let y = vec![Some(1.0), Some(2.0)];
        assert_eq!(pearson(&x, &y), None);
    }

    // ==================== matrix tests ====================

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let ds = Dataset::new(vec![
            Column::numeric("a", some(&[1.0, 2.0, 3.0, 4.0, 5.0])),
            Column::numeric("b", some(&[2.0, 1.0, 4.0, 3.0, 6.0])),
            Column::numeric("c", some(&[9.0, 7.0, 8.0, 2.0, 1.0])),
            Column::numeric("flat", some(&[3.0, 3.0, 3.0, 3.0, 3.0])),
        ])
        .unwrap();

        let matrix = CorrelationAnalyzer::correlation_matrix(&ds);
        assert_eq!(matrix.size(), 4);
        for i in 0..3 {
            assert_eq!(matrix.values[i][i], Some(1.0));
            for j in 0..4 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
        // Zero-variance column is undefined everywhere, including its diagonal
        for j in 0..4 {
            assert_eq!(matrix.values[3][j], None);
        }
    }

    #[test]
    fn test_matrix_constant_decimal_column_is_undefined() {
        let ds = Dataset::new(vec![
            Column::numeric("flat", vec![Some(0.1); 10]),
            Column::numeric("rising", (0..10).map(|i| Some(i as f64))),
        ])
        .unwrap();

        let matrix = CorrelationAnalyzer::correlation_matrix(&ds);
        assert_eq!(
            matrix.values,
            vec![vec![None, None], vec![None, Some(1.0)]]
        );

        let result = CorrelationAnalyzer::analyze(&ds, &AnalysisConfig::default());
        assert!(details(&result).strong_correlations.is_empty());
    }

    #[test]
    fn test_strong_pairs_filtered_and_sorted() {
        let ds = Dataset::new(vec![
            Column::numeric("a", some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])),
            Column::numeric("b", some(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0])),
            Column::numeric("c", some(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0])),
            Column::numeric("d", some(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0])),
        ])
        .unwrap();

        let matrix = CorrelationAnalyzer::correlation_matrix(&ds);
        let pairs = CorrelationAnalyzer::strong_pairs(&matrix, 0.5);

        // Every reported pair is in the upper triangle and above threshold
        for pair in &pairs {
            let i = matrix.labels.iter().position(|l| *l == pair.var1).unwrap();
            let j = matrix.labels.iter().position(|l| *l == pair.var2).unwrap();
            assert!(i < j);
            assert!(pair.correlation.abs() > 0.5);
        }
        // Sorted by magnitude
        for window in pairs.windows(2) {
            assert!(window[0].correlation.abs() >= window[1].correlation.abs());
        }
        // a~c is a perfect negative relationship and comes first
        assert_eq!(pairs[0].var1, "a");
        assert_eq!(pairs[0].var2, "c");
        assert!((pairs[0].correlation + 1.0).abs() < 1e-12);

        // Count equals the filtered upper triangle
        let expected = (0..4)
            .flat_map(|i| ((i + 1)..4).map(move |j| (i, j)))
            .filter(|&(i, j)| matrix.values[i][j].is_some_and(|r| r.abs() > 0.5))
            .count();
        assert_eq!(pairs.len(), expected);
    }

    #[test]
    fn test_strong_pairs_tie_keeps_enumeration_order() {
        let matrix = CorrelationMatrix {
            labels: vec!["a".into(), "b".into(), "c".into()],
            values: vec![
                vec![Some(1.0), Some(0.7), Some(-0.7)],
                vec![Some(0.7), Some(1.0), Some(0.9)],
                vec![Some(-0.7), Some(0.9), Some(1.0)],
            ],
        };
        let pairs = CorrelationAnalyzer::strong_pairs(&matrix, 0.5);
        let order: Vec<(&str, &str)> = pairs
            .iter()
            .map(|p| (p.var1.as_str(), p.var2.as_str()))
            .collect();
        assert_eq!(order, vec![("b", "c"), ("a", "b"), ("a", "c")]);
    }

    // ==================== analyze tests ====================

    #[test]
    fn test_fewer_than_two_numeric_columns() {
        let ds = Dataset::new(vec![
            Column::numeric("a", some(&[1.0, 2.0])),
            Column::categorical("b", [Some("x"), Some("y")]),
        ])
        .unwrap();

        let result = CorrelationAnalyzer::analyze(&ds, &AnalysisConfig::default());
        assert_eq!(
            result.summary,
            "Need at least 2 numeric variables for correlation analysis."
        );
        assert_eq!(result.details, AnalysisDetails::Empty {});
        assert!(result.rigor_warnings.is_empty());
    }

    #[test]
    fn test_eight_columns_trigger_multiple_testing() {
        // Independent-looking columns; the warning depends only on the pair count
        let columns = (0..8)
            .map(|c| {
                Column::numeric(
                    format!("v{}", c),
                    (0..12).map(move |r| Some(((r * (c + 3)) % 7) as f64)),
                )
            })
            .collect();
        let ds = Dataset::new(columns).unwrap();

        let result = CorrelationAnalyzer::analyze(&ds, &AnalysisConfig::default());
        assert_eq!(result.rigor_warnings.len(), 1);
        let warning = &result.rigor_warnings[0];
        assert_eq!(warning.category, WarningCategory::MultipleTesting);
        assert_eq!(warning.severity, Severity::High);
        assert!(warning.message.contains("28"));
    }

    #[test]
    fn test_five_columns_stay_below_threshold() {
        // C(5, 2) = 10, which is not more than 10
        let columns = (0..5)
            .map(|c| Column::numeric(format!("v{}", c), (0..6).map(move |r| Some((r * c) as f64))))
            .collect();
        let ds = Dataset::new(columns).unwrap();

        let result = CorrelationAnalyzer::analyze(&ds, &AnalysisConfig::default());
        assert!(result.rigor_warnings.is_empty());
    }

    #[test]
    fn test_summary_reports_strong_relationships() {
        let ds = Dataset::new(vec![
            Column::numeric("hours", some(&[1.0, 2.0, 3.0, 4.0, 5.0])),
            Column::numeric("output", some(&[2.1, 3.9, 6.2, 8.1, 9.8])),
        ])
        .unwrap();

        let result = CorrelationAnalyzer::analyze(&ds, &AnalysisConfig::default());
        assert_eq!(
            result.summary,
            "Analyzed correlations among 2 variables. Found 1 strong relationships (|r| > 0.5)."
        );
        assert_eq!(details(&result).strong_correlations.len(), 1);
        assert!(details(&result).correlation_matrix.get("hours", "output").unwrap() > 0.99);
    }

    #[test]
    fn test_summary_reports_no_strong_relationships() {
        let ds = Dataset::new(vec![
            Column::numeric("a", some(&[1.0, 2.0, 3.0, 4.0])),
            Column::numeric("b", some(&[1.0, -1.0, -1.0, 1.0])),
        ])
        .unwrap();

        let result = CorrelationAnalyzer::analyze(&ds, &AnalysisConfig::default());
        assert!(result.summary.ends_with("No strong correlations (|r| > 0.5) detected."));
        assert!(details(&result).strong_correlations.is_empty());
    }
}
