pub mod caption;
pub mod chart;
pub mod compare;
pub mod listing;
pub mod series;

pub use caption::build_caption;
pub use chart::{ChartStyle, render_chart};
pub use compare::{compare, summarize};
pub use listing::{render_html, render_text, write_html};
pub use series::{build_view, rank_first};
