use std::collections::BTreeMap;

/// One input item: category fields and a weight.
///
/// Records are immutable once built; the builder methods consume and
/// return `self`.
///
/// ```
/// use tallyboard::Record;
///
/// let record = Record::new(18.0)
///     .with_field("color", "blue")
///     .with_field("moving", "sleeping");
///
/// assert_eq!(record.field("color"), Some("blue"));
/// assert_eq!(record.weight(), 18.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, String>,
    weight: f64,
}

impl Record {
    /// Create a record with the given weight and no category fields.
    pub fn new(weight: f64) -> Self {
        Self {
            fields: BTreeMap::new(),
            weight,
        }
    }

    /// Add (or replace) a category field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Value of a category field, if the record has it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The weight summed by aggregation.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Clone the records whose `field` equals `value`.
///
/// Records without the field never match.
pub fn matching(records: &[Record], field: &str, value: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.field(field) == Some(value))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_field_replaces_existing_value() {
        let record = Record::new(1.0)
            .with_field("color", "blue")
            .with_field("color", "red");

        assert_eq!(record.field("color"), Some("red"));
    }

    #[test]
    fn matching_skips_records_without_field() {
        let records = vec![
            Record::new(1.0).with_field("color", "blue"),
            Record::new(2.0).with_field("moving", "flying"),
            Record::new(3.0).with_field("color", "blue"),
        ];

        let blue = matching(&records, "color", "blue");
        assert_eq!(blue.len(), 2);
        assert_eq!(blue[1].weight(), 3.0);
    }
}
