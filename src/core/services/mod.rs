pub mod aggregation;
pub mod filter;
pub mod summary_service;

pub use aggregation::{distinct_values, group_mean, group_sum, GroupKey, ValueKey};
pub use filter::PurchaseFilter;
pub use summary_service::{AnalysisReport, FarmerSummary, SummaryService, Totals};
