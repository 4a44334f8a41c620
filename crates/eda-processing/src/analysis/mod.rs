//! Cross-column analysis: numeric correlations and top categorical values.

mod categories;
mod correlation;

pub use categories::{top_categories, top_k_values};
pub use correlation::{correlation_matrix, pearson_pairwise};
