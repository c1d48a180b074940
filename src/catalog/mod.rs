//! # Catalog
//!
//! The device catalog: records, field parsing, and a JSON record source.
//!
//! The record source is a JSON array of flat objects keyed by the column
//! names in [`record::columns`]. Values are read as text; numbers and
//! booleans are stringified, `null` and missing keys read as empty.
//!
//! ```
//! use stampsheet::catalog::Catalog;
//!
//! let json = r#"[{"name": "Nokia 3310", "years_active": "2000-2005"}]"#;
//! let catalog = Catalog::from_json_str(json).unwrap();
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.records()[0].year_range(), "2000–2005");
//! ```

pub mod parse;
pub mod record;

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, StampError};

pub use parse::Price;
pub use record::DeviceRecord;

/// All loaded device records, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<DeviceRecord>,
}

impl Catalog {
    pub fn new(records: Vec<DeviceRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of row objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rows: Vec<HashMap<String, Value>> = serde_json::from_str(json)?;
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let fields: HashMap<String, String> = row
                    .iter()
                    .map(|(k, v)| (k.trim().to_lowercase(), value_text(v)))
                    .collect();
                DeviceRecord::from_fields(i, &fields)
            })
            .collect();
        Ok(Self { records })
    }

    /// Load a record source file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StampError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&text)?;
        log::info!("loaded {} records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
