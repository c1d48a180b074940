//! The device record: one catalogued obsolete device.

use std::collections::HashMap;
use std::path::PathBuf;

use super::parse::{Price, parse_price, parse_units, parse_years};

/// Column names of the record source schema.
pub mod columns {
    pub const NAME: &str = "name";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const YEARS_ACTIVE: &str = "years_active";
    pub const ORIGINAL_PRICE: &str = "original_price";
    pub const UNITS_SOLD: &str = "units_sold";
    pub const REGION: &str = "region";
    pub const CATEGORY: &str = "category";
    pub const FORM_FACTOR: &str = "form_factor";
    pub const AVAILABILITY: &str = "availability_today";
    pub const CONNECTIVITY: &str = "connectivity";
    pub const REASON: &str = "reason_for_obsolescence";
    pub const IMAGE_PATH: &str = "image_path";
}

/// One catalogued device. Built once at load time, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    /// Display name, or `"Device #n"` when the name column is blank.
    pub name: String,
    pub category: String,
    pub region: String,
    pub manufacturer: String,
    pub price_text: String,
    pub price: Option<Price>,
    pub units_text: String,
    pub units_sold: Option<u64>,
    /// Availability / rarity descriptor, e.g. `"Very rare"`.
    pub availability: String,
    pub connectivity: String,
    pub form_factor: String,
    pub reason: String,
    pub release_year: Option<i32>,
    /// `None` means unknown.
    pub discontinued_year: Option<i32>,
    pub image_path: Option<PathBuf>,
}

impl DeviceRecord {
    /// Build a record from a column map. `row` is the zero-based position in
    /// the source, used for the fallback name.
    pub fn from_fields(row: usize, fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let name = match get(columns::NAME) {
            n if n.is_empty() => format!("Device #{}", row + 1),
            n => n,
        };
        let (release_year, discontinued_year) = parse_years(&get(columns::YEARS_ACTIVE));
        let price_text = get(columns::ORIGINAL_PRICE);
        let units_text = get(columns::UNITS_SOLD);
        let image = get(columns::IMAGE_PATH);

        Self {
            name,
            category: get(columns::CATEGORY),
            region: get(columns::REGION),
            manufacturer: get(columns::MANUFACTURER),
            price: parse_price(&price_text),
            price_text,
            units_sold: parse_units(&units_text),
            units_text,
            availability: get(columns::AVAILABILITY),
            connectivity: get(columns::CONNECTIVITY),
            form_factor: get(columns::FORM_FACTOR),
            reason: get(columns::REASON),
            release_year,
            discontinued_year,
            image_path: if image.is_empty() {
                None
            } else {
                Some(PathBuf::from(image))
            },
        }
    }

    /// Key fed to the seed function.
    pub fn identity(&self) -> &str {
        &self.name
    }

    /// `"1998–2005"`, `"1998"`, or empty when the release year is unknown.
    pub fn year_range(&self) -> String {
        match (self.release_year, self.discontinued_year) {
            (Some(r), Some(d)) => format!("{}–{}", r, d),
            (Some(r), None) => r.to_string(),
            (None, _) => String::new(),
        }
    }

    /// `"Japan • Sony"`, or whichever of the two is present.
    pub fn origin_line(&self) -> String {
        match (self.region.is_empty(), self.manufacturer.is_empty()) {
            (false, false) => format!("{} • {}", self.region, self.manufacturer),
            (false, true) => self.region.clone(),
            (true, false) => self.manufacturer.clone(),
            (true, true) => String::new(),
        }
    }

    /// Category text before the first `/`.
    pub fn primary_category(&self) -> &str {
        self.category.split('/').next().unwrap_or("").trim()
    }

    /// Price only when it parsed to a nonzero amount.
    pub fn display_price(&self) -> Option<String> {
        self.price
            .as_ref()
            .filter(|p| p.amount > 0.0)
            .map(Price::display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_record() {
        let r = DeviceRecord::from_fields(
            0,
            &fields(&[
                ("name", "Sony Walkman TPS-L2"),
                ("manufacturer", "Sony"),
                ("years_active", "1979-1990"),
                ("original_price", "$150"),
                ("units_sold", "385 million"),
                ("region", "Japan"),
                ("category", "Audio/Portable"),
                ("availability_today", "Uncommon"),
                ("image_path", "img/walkman.png"),
            ]),
        );
        assert_eq!(r.name, "Sony Walkman TPS-L2");
        assert_eq!(r.year_range(), "1979–1990");
        assert_eq!(r.origin_line(), "Japan • Sony");
        assert_eq!(r.primary_category(), "Audio");
        assert_eq!(r.display_price(), Some("$150".to_string()));
        assert_eq!(r.units_sold, Some(385_000_000));
        assert_eq!(r.image_path, Some(PathBuf::from("img/walkman.png")));
    }

    #[test]
    fn test_fallbacks() {
        let r = DeviceRecord::from_fields(
            4,
            &fields(&[("region", "USA"), ("original_price", "$0")]),
        );
        assert_eq!(r.name, "Device #5");
        assert_eq!(r.year_range(), "");
        assert_eq!(r.origin_line(), "USA");
        assert_eq!(r.display_price(), None);
        assert_eq!(r.image_path, None);
        assert_eq!(r.primary_category(), "");
    }

    #[test]
    fn test_year_range_release_only() {
        let mut r = DeviceRecord::from_fields(0, &HashMap::new());
        r.release_year = Some(1995);
        assert_eq!(r.year_range(), "1995");
        r.discontinued_year = Some(1995);
        assert_eq!(r.year_range(), "1995–1995");
    }
}
