use serde_json::Value;

use super::Record;
use crate::error::{Result, TallyError};

/// Key read as the weight when none is configured.
pub const DEFAULT_WEIGHT_FIELD: &str = "value";

/// Parse a JSON array of flat objects into records.
///
/// The member named `weight_field` becomes the weight and must be a
/// number. Every other member becomes a category field; strings are kept
/// as-is, numbers and booleans are stringified.
///
/// ```
/// use tallyboard::record::from_json_str;
///
/// let records = from_json_str(r#"[{"color": "blue", "value": 19}]"#, "value").unwrap();
/// assert_eq!(records[0].field("color"), Some("blue"));
/// assert_eq!(records[0].weight(), 19.0);
/// ```
pub fn from_json_str(input: &str, weight_field: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(input)?;
    from_json_value(&value, weight_field)
}

/// Convert an already parsed JSON array into records.
pub fn from_json_value(value: &Value, weight_field: &str) -> Result<Vec<Record>> {
    let items = value
        .as_array()
        .ok_or_else(|| TallyError::invalid_record(0, "expected a JSON array of records"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| record_from_object(index, item, weight_field))
        .collect()
}

fn record_from_object(index: usize, item: &Value, weight_field: &str) -> Result<Record> {
    let object = item
        .as_object()
        .ok_or_else(|| TallyError::invalid_record(index, "expected a JSON object"))?;

    let weight = match object.get(weight_field) {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
            TallyError::invalid_record(index, format!("weight `{weight_field}` is not an f64"))
        })?,
        Some(other) => {
            return Err(TallyError::invalid_record(
                index,
                format!("weight `{weight_field}` is not a number: {other}"),
            ))
        }
        None => {
            return Err(TallyError::invalid_record(
                index,
                format!("missing weight field `{weight_field}`"),
            ))
        }
    };

    let mut record = Record::new(weight);
    for (name, value) in object.iter().filter(|(name, _)| name.as_str() != weight_field) {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                return Err(TallyError::invalid_record(
                    index,
                    format!("field `{name}` must be a string, number or boolean"),
                ))
            }
        };
        record = record.with_field(name.clone(), text);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tutorial_data() {
        let input = r#"[
            {"color": "blue", "moving": "flying", "value": 1},
            {"color": "red", "moving": "flying", "value": 4}
        ]"#;

        let records = from_json_str(input, DEFAULT_WEIGHT_FIELD).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].field("color"), Some("red"));
        assert_eq!(records[1].field("moving"), Some("flying"));
        assert_eq!(records[1].field("value"), None);
        assert_eq!(records[1].weight(), 4.0);
    }

    #[test]
    fn stringifies_scalar_fields() {
        let records = from_json_str(r#"[{"legs": 4, "wild": true, "value": 2.5}]"#, "value").unwrap();
        assert_eq!(records[0].field("legs"), Some("4"));
        assert_eq!(records[0].field("wild"), Some("true"));
        assert_eq!(records[0].weight(), 2.5);
    }

    #[test]
    fn rejects_non_numeric_weight() {
        let err = from_json_str(r#"[{"color": "blue", "value": "lots"}]"#, "value").unwrap_err();
        assert!(matches!(err, TallyError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn rejects_missing_weight() {
        let err = from_json_str(r#"[{"value": 1}, {"color": "blue"}]"#, "value").unwrap_err();
        assert!(matches!(err, TallyError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn rejects_nested_fields() {
        let err = from_json_str(r#"[{"tags": ["a"], "value": 1}]"#, "value").unwrap_err();
        assert!(matches!(err, TallyError::InvalidRecord { .. }));
    }

    #[test]
    fn rejects_non_array_input() {
        let err = from_json_str(r#"{"value": 1}"#, "value").unwrap_err();
        assert!(matches!(err, TallyError::InvalidRecord { .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = from_json_str("[{", "value").unwrap_err();
        assert!(matches!(err, TallyError::Json(_)));
    }
}
