pub mod feedback;
pub mod humanize;
pub mod icons;
pub mod items;
pub mod json;
pub mod pretty;

pub use feedback::{Feedback, Icon, Item, Modifier};
pub use items::Locations;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Format launcher feedback based on output format
pub fn format_feedback(feedback: &Feedback, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_feedback(feedback)),
        OutputFormat::Json => json::format_feedback(feedback),
    }
}
