use indexmap::IndexMap;

use crate::error::{Result, TallyError};
use crate::record::Record;

/// Summed weight per category value.
///
/// Keys are unique. Iteration follows the order in which keys were first
/// seen, which is stable for a given input but not something callers
/// should rely on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    counts: IndexMap<String, f64>,
}

impl Tally {
    /// Total for a key, if any record carried it.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.counts.get(key).copied()
    }

    /// Iterate over category keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all categories.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }
}

/// Group `records` by `field` and sum their weights.
///
/// Fails with [`TallyError::InvalidRecord`] if a record lacks the field or
/// carries a NaN weight.
///
/// ```
/// use tallyboard::{aggregate, Record};
///
/// let records = vec![
///     Record::new(1.0).with_field("color", "blue"),
///     Record::new(4.0).with_field("color", "red"),
///     Record::new(18.0).with_field("color", "blue"),
/// ];
///
/// let tally = aggregate(&records, "color").unwrap();
/// assert_eq!(tally.get("blue"), Some(19.0));
/// assert_eq!(tally.get("red"), Some(4.0));
/// ```
pub fn aggregate(records: &[Record], field: &str) -> Result<Tally> {
    let mut counts: IndexMap<String, f64> = IndexMap::new();

    for (index, record) in records.iter().enumerate() {
        let key = record
            .field(field)
            .ok_or_else(|| TallyError::invalid_record(index, format!("missing field `{field}`")))?;

        let weight = record.weight();
        if weight.is_nan() {
            return Err(TallyError::invalid_record(index, "weight is NaN"));
        }

        *counts.entry(key.to_owned()).or_insert(0.0) += weight;
    }

    Ok(Tally { counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Vec<Record> {
        vec![
            Record::new(1.0).with_field("color", "blue").with_field("moving", "flying"),
            Record::new(4.0).with_field("color", "red").with_field("moving", "flying"),
            Record::new(18.0).with_field("color", "blue").with_field("moving", "sleeping"),
            Record::new(32.0).with_field("color", "green").with_field("moving", "sleeping"),
        ]
    }

    #[test]
    fn groups_by_color() {
        let tally = aggregate(&animals(), "color").unwrap();

        assert_eq!(tally.len(), 3);
        assert_eq!(tally.get("blue"), Some(19.0));
        assert_eq!(tally.get("red"), Some(4.0));
        assert_eq!(tally.get("green"), Some(32.0));
    }

    #[test]
    fn groups_by_moving() {
        let tally = aggregate(&animals(), "moving").unwrap();

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.get("flying"), Some(5.0));
        assert_eq!(tally.get("sleeping"), Some(50.0));
        assert_eq!(tally.total(), 55.0);
    }

    #[test]
    fn keys_follow_first_appearance() {
        let tally = aggregate(&animals(), "color").unwrap();
        assert_eq!(tally.keys().collect::<Vec<_>>(), ["blue", "red", "green"]);
    }

    #[test]
    fn empty_input_gives_empty_tally() {
        let tally = aggregate(&[], "color").unwrap();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0.0);
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut records = animals();
        records.push(Record::new(2.0).with_field("moving", "flying"));

        let err = aggregate(&records, "color").unwrap_err();
        match err {
            TallyError::InvalidRecord { index, reason } => {
                assert_eq!(index, 4);
                assert!(reason.contains("color"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_weight_is_rejected() {
        let records = vec![Record::new(f64::NAN).with_field("color", "blue")];
        assert!(matches!(
            aggregate(&records, "color"),
            Err(TallyError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn input_is_left_untouched() {
        let records = animals();
        let before = records.clone();
        let _ = aggregate(&records, "color").unwrap();
        assert_eq!(records, before);
    }
}
