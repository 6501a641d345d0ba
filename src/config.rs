//! Writer options: name policy and polygon conventions
//!
//! Options come from a JSON document and may be overridden by environment
//! variables:
//! - `GDSIO_NAME_POLICY` - `legacy` or `canonical`
//! - `GDSIO_CLOSURE` - `detect`, `explicit` or `implicit`
//! - `GDSIO_AREA` - `unsigned` or `signed`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GdsError, Result};
use crate::geometry::{AreaConvention, ClosureMode};
use crate::structure::NamePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub name_policy: NamePolicy,
    pub closure_mode: ClosureMode,
    pub area_convention: AreaConvention,
}

impl WriterOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GdsError::Config(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Apply `GDSIO_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup("GDSIO_NAME_POLICY") {
            self.name_policy = parse_value("GDSIO_NAME_POLICY", &v)?;
        }
        if let Some(v) = lookup("GDSIO_CLOSURE") {
            self.closure_mode = parse_value("GDSIO_CLOSURE", &v)?;
        }
        if let Some(v) = lookup("GDSIO_AREA") {
            self.area_convention = parse_value("GDSIO_AREA", &v)?;
        }
        Ok(self)
    }
}

/// Reuse the serde names so JSON and environment spell values the same way
fn parse_value<T: for<'de> Deserialize<'de>>(key: &str, value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase()))
        .map_err(|e| GdsError::Config(format!("{}={}: {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let opts = WriterOptions::from_json_str("{}").unwrap();
        assert_eq!(opts.name_policy, NamePolicy::Canonical);
        assert_eq!(opts.closure_mode, ClosureMode::Detect);
        assert_eq!(opts.area_convention, AreaConvention::Unsigned);
    }

    #[test]
    fn test_json_values() {
        let opts = WriterOptions::from_json_str(
            r#"{"name_policy": "legacy", "closure_mode": "implicit", "area_convention": "signed"}"#,
        )
        .unwrap();
        assert_eq!(opts.name_policy, NamePolicy::Legacy);
        assert_eq!(opts.closure_mode, ClosureMode::Implicit);
        assert_eq!(opts.area_convention, AreaConvention::Signed);
        assert!(WriterOptions::from_json_str(r#"{"name_policy": "loose"}"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [("GDSIO_NAME_POLICY", "Legacy"), ("GDSIO_CLOSURE", "explicit")]
            .into_iter()
            .collect();
        let opts = WriterOptions::default()
            .apply_vars(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(opts.name_policy, NamePolicy::Legacy);
        assert_eq!(opts.closure_mode, ClosureMode::Explicit);
        assert_eq!(opts.area_convention, AreaConvention::Unsigned);

        let bad = WriterOptions::default().apply_vars(|k| (k == "GDSIO_AREA").then(|| "both".to_string()));
        assert!(matches!(bad, Err(GdsError::Config(_))));
    }
}
