//! Derived field parsing.
//!
//! These rules decide what the stamps say, so they are reproduced exactly:
//!
//! | Field | Input | Result |
//! |-------|-------|--------|
//! | years | `"1998-2005"` | `(1998, 2005)` |
//! | years | `"1998-present"` | `(1998, 1998)` |
//! | years | `"circa 1984"` | `(1984, 1984)` |
//! | price | `"$1,299"` | `$` + `1299` |
//! | units | `"2.5 million"` | `2_500_000` |
//!
//! Anything unparseable becomes `None` and downstream drawing omits it.

/// Parsed price: currency symbol run and numeric amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub currency: String,
    pub amount: f64,
}

impl Price {
    /// Medallion label: `"$499"`, or `"$1.3K"` for amounts of 1000 and up.
    pub fn display(&self) -> String {
        if self.amount >= 1000.0 {
            format!("{}{:.1}K", self.currency, self.amount / 1000.0)
        } else {
            format!("{}{}", self.currency, self.amount.round() as i64)
        }
    }
}

/// Parse a years-active field into `(release, discontinued)`.
///
/// A `YYYY-YYYY` or `YYYY-present` range wins. Otherwise the first bare
/// four-digit year becomes the release year and is mirrored as the
/// discontinuation year. `present` maps to the release year, not today.
pub fn parse_years(field: &str) -> (Option<i32>, Option<i32>) {
    let lower = field.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    let years = year_positions(&chars);

    for &(start, year) in &years {
        let mut i = start + 4;
        while i < chars.len() && chars[i] == ' ' {
            i += 1;
        }
        if i >= chars.len() || !matches!(chars[i], '-' | '–' | '—') {
            continue;
        }
        i += 1;
        while i < chars.len() && chars[i] == ' ' {
            i += 1;
        }
        let rest: String = chars[i..].iter().collect();
        if rest.starts_with("present") {
            return (Some(year), Some(year));
        }
        if let Some(&(_, end)) = years.iter().find(|&&(pos, _)| pos == i) {
            return (Some(year), Some(end));
        }
    }

    match years.first() {
        Some(&(_, year)) => (Some(year), Some(year)),
        None => (None, None),
    }
}

/// Every standalone run of exactly four digits, with its char position.
fn year_positions(chars: &[char]) -> Vec<(usize, i32)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i - start == 4 {
            let digits: String = chars[start..i].iter().collect();
            if let Ok(year) = digits.parse::<i32>() {
                out.push((start, year));
            }
        }
    }
    out
}

/// Parse a price field: leading non-digit run as the currency, then a run of
/// digits and commas as the amount.
pub fn parse_price(field: &str) -> Option<Price> {
    let trimmed = field.trim();
    let digits_at = trimmed.find(|c: char| c.is_ascii_digit())?;
    let currency = trimmed[..digits_at].trim().to_string();
    let amount: String = trimmed[digits_at..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    let amount = amount.parse::<f64>().ok()?;
    Some(Price { currency, amount })
}

/// Parse a units-sold field such as `"150,000"`, `"2.5 million"` or `"40M"`.
pub fn parse_units(field: &str) -> Option<u64> {
    let lower = field.trim().to_lowercase();
    let start = lower.find(|c: char| c.is_ascii_digit())?;
    let number: String = lower[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect();
    let value = number.parse::<f64>().ok()?;
    let rest =
        lower[start..].trim_start_matches(|c: char| c.is_ascii_digit() || c == ',' || c == '.');
    let suffix: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect();

    let multiplier = match suffix.as_str() {
        "b" | "bn" | "billion" => 1_000_000_000.0,
        "m" | "mm" | "mil" | "million" => 1_000_000.0,
        "k" | "thousand" => 1_000.0,
        _ => 1.0,
    };
    Some((value * multiplier).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range() {
        assert_eq!(parse_years("1998-2005"), (Some(1998), Some(2005)));
        assert_eq!(parse_years("1979 – 1989"), (Some(1979), Some(1989)));
    }

    #[test]
    fn test_present_maps_to_release() {
        assert_eq!(parse_years("2001-present"), (Some(2001), Some(2001)));
        assert_eq!(parse_years("2001 - Present"), (Some(2001), Some(2001)));
    }

    #[test]
    fn test_single_year_mirrors() {
        assert_eq!(parse_years("circa 1984"), (Some(1984), Some(1984)));
        assert_eq!(parse_years("launched 1972, model 12345"), (Some(1972), Some(1972)));
    }

    #[test]
    fn test_unknown_years() {
        assert_eq!(parse_years(""), (None, None));
        assert_eq!(parse_years("unknown"), (None, None));
        assert_eq!(parse_years("198"), (None, None));
    }

    #[test]
    fn test_price() {
        let p = parse_price("$1,299").unwrap();
        assert_eq!(p.currency, "$");
        assert_eq!(p.amount, 1299.0);
        assert_eq!(p.display(), "$1.3K");

        let p = parse_price("¥ 39800 (launch)").unwrap();
        assert_eq!(p.currency, "¥");
        assert_eq!(p.display(), "¥39.8K");

        assert_eq!(parse_price("$249").unwrap().display(), "$249");
        assert_eq!(parse_price("£1000").unwrap().display(), "£1.0K");
    }

    #[test]
    fn test_price_missing() {
        assert!(parse_price("").is_none());
        assert!(parse_price("free with contract").is_none());
    }

    #[test]
    fn test_units() {
        assert_eq!(parse_units("150,000"), Some(150_000));
        assert_eq!(parse_units("2.5 million"), Some(2_500_000));
        assert_eq!(parse_units("over 40M"), Some(40_000_000));
        assert_eq!(parse_units("12k"), Some(12_000));
        assert_eq!(parse_units("n/a"), None);
    }
}
