pub mod html;
pub mod json;

pub use html::{render_html, write_html_report};
pub use json::{backfill_risk_categories, write_json_report};
