pub mod chart;
pub mod formatting;
pub mod table;

pub use chart::BarChart;
pub use formatting::{format_date, format_decimal, format_money};
pub use table::{Alignment, Table, TableColumn};
