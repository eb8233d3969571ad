use colored::Colorize;

use super::{Feedback, Item};

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn format_item(item: &Item) -> String {
    let mut output = String::new();

    if !item.valid {
        output.push_str(&format!("{} {}\n", "!".yellow().bold(), item.title.yellow()));
        if !item.subtitle.is_empty() {
            output.push_str(&format!("  {}\n", item.subtitle.dimmed()));
        }
        return output;
    }

    output.push_str(&format!("{}\n", truncate_str(&item.title, 60).bold()));
    if !item.subtitle.is_empty() {
        output.push_str(&format!("  {}\n", truncate_str(&item.subtitle, 80).dimmed()));
    }
    if let Some(url) = item.variables.get("url") {
        output.push_str(&format!("  {} {}\n", "URL:".cyan(), url));
    }
    if let Some(path) = item.autocomplete.as_deref().filter(|p| !p.is_empty()) {
        output.push_str(&format!("  {} {}\n", "Path:".cyan(), path));
    }
    if let Some(ref local) = item.quicklook {
        output.push_str(&format!("  {} {}\n", "Local:".cyan(), local.dimmed()));
    }

    output
}

/// Format feedback for a terminal
pub fn format_feedback(feedback: &Feedback) -> String {
    if feedback.is_empty() {
        return "No results.".to_string();
    }

    let mut output = String::new();
    for item in &feedback.items {
        output.push_str(&format_item(item));
    }

    output.trim_end().to_string()
}
