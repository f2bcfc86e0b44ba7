pub mod format;
pub mod rank;

pub use format::format_report;
pub use rank::{build_insights, group_insights, top_insights};
