use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::record::{from_json_str, Record, DEFAULT_WEIGHT_FIELD};

/// Value shown by a slot before its first update.
pub const DEFAULT_SENTINEL: f64 = -1.0;

/// What an update does with keys that have no slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Ignore them; the slot set never changes after creation.
    #[default]
    Drop,
    /// Append a new slot for each.
    Grow,
}

/// Settings for one tally chart.
///
/// ```
/// use tallyboard::{ChartConfig, UnknownKeyPolicy};
///
/// let config = ChartConfig::new("color").unknown_keys(UnknownKeyPolicy::Grow);
/// assert_eq!(config.field, "color");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Category field records are grouped by.
    pub field: String,
    /// Value slots show until the first update.
    pub sentinel: f64,
    /// Handling of keys that appear only after creation.
    pub unknown_keys: UnknownKeyPolicy,
    /// JSON member read as the record weight by [`records_from_json`].
    ///
    /// [`records_from_json`]: Self::records_from_json
    pub weight_field: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            field: String::new(),
            sentinel: DEFAULT_SENTINEL,
            unknown_keys: UnknownKeyPolicy::default(),
            weight_field: DEFAULT_WEIGHT_FIELD.to_owned(),
        }
    }
}

impl ChartConfig {
    /// Config grouping by `field` with default settings.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    pub fn sentinel(mut self, sentinel: f64) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn weight_field(mut self, weight_field: impl Into<String>) -> Self {
        self.weight_field = weight_field.into();
        self
    }

    /// Load a config from a JSON document. Missing members take defaults.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON array of records for this chart, reading weights from
    /// `weight_field`.
    ///
    /// The weight member is never a category, so a chart grouping by the
    /// weight field cannot be fed from JSON.
    ///
    /// ```
    /// use tallyboard::ChartConfig;
    ///
    /// let config = ChartConfig::new("kind").weight_field("count");
    /// let records = config.records_from_json(r#"[{"kind": "cat", "count": 2}]"#).unwrap();
    /// assert_eq!(records[0].weight(), 2.0);
    /// ```
    pub fn records_from_json(&self, input: &str) -> Result<Vec<Record>> {
        if self.field == self.weight_field {
            return Err(TallyError::config(format!(
                "category field `{}` is also the JSON weight field",
                self.field
            )));
        }
        from_json_str(input, &self.weight_field)
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(TallyError::config("category field must not be empty"));
        }
        if self.weight_field.is_empty() {
            return Err(TallyError::config("weight field must not be empty"));
        }
        if self.sentinel.is_nan() {
            return Err(TallyError::config("sentinel must not be NaN"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ChartConfig::new("moving");
        assert_eq!(config.sentinel, -1.0);
        assert_eq!(config.unknown_keys, UnknownKeyPolicy::Drop);
        assert_eq!(config.weight_field, "value");
    }

    #[test]
    fn empty_field_is_rejected() {
        assert!(matches!(
            ChartConfig::default().validate(),
            Err(TallyError::Config { .. })
        ));
    }

    #[test]
    fn value_field_is_valid_for_code_built_records() {
        assert!(ChartConfig::new("value").validate().is_ok());
    }

    #[test]
    fn json_weight_field_collision_is_rejected() {
        let input = r#"[{"value": 1}]"#;
        let config = ChartConfig::new("value");
        assert!(matches!(
            config.records_from_json(input),
            Err(TallyError::Config { .. })
        ));

        let config = ChartConfig::new("value").weight_field("count");
        let records = config.records_from_json(r#"[{"value": "a", "count": 4}]"#).unwrap();
        assert_eq!(records[0].field("value"), Some("a"));
        assert_eq!(records[0].weight(), 4.0);
    }

    #[test]
    fn loads_from_json_with_defaults() {
        let config = ChartConfig::from_json_str(r#"{"field": "color", "unknown_keys": "grow"}"#).unwrap();
        assert_eq!(config.field, "color");
        assert_eq!(config.unknown_keys, UnknownKeyPolicy::Grow);
        assert_eq!(config.sentinel, -1.0);
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        assert!(matches!(
            ChartConfig::from_json_str(r#"{"sentinel": 0}"#),
            Err(TallyError::Config { .. })
        ));
    }
}
