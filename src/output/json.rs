use super::Feedback;
use crate::error::Result;

/// Format feedback as script-filter JSON
pub fn format_feedback(feedback: &Feedback) -> Result<String> {
    Ok(serde_json::to_string(feedback)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Item;

    #[test]
    fn test_feedback_has_items_array() {
        let mut feedback = Feedback::new();
        feedback.push(Item::new("a"));
        feedback.push(Item::new("b"));

        let out = format_feedback(&feedback).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        assert_eq!(value["items"][1]["title"], "b");
    }

    #[test]
    fn test_empty_feedback() {
        assert_eq!(format_feedback(&Feedback::new()).unwrap(), r#"{"items":[]}"#);
    }
}
