/// Result of normalizing a capacity cell before it is indexed
#[derive(Debug, Clone, PartialEq)]
pub enum Capacity {
    /// Magnitude in gigabytes, kept as the text that gets indexed
    Gigabytes(String),
    /// Anything the unit grammar does not cover; stored as-is and never
    /// eligible for range queries
    Unrecognized(String),
}

impl Capacity {
    pub fn as_str(&self) -> &str {
        match self {
            Capacity::Gigabytes(value) | Capacity::Unrecognized(value) => value,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Capacity::Gigabytes(_))
    }
}

const GIGABYTE: &str = "GB";
const TERABYTE: &str = "TB";
const GB_PER_TB: f64 = 1024.0;

/// Finite number in `text`, ignoring surrounding whitespace.
/// `parse::<f64>` alone also accepts `nan`, `inf` and `infinity`.
pub fn parse_magnitude(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `"200 GB"` -> `200`, `"2TB"` -> `2048`, anything else unchanged (upper-cased).
///
/// A GB value keeps its magnitude text verbatim, so `"abc GB"` yields the
/// recognized-but-non-numeric `"ABC"`, which range queries skip like any
/// other unparsable value.
pub fn normalize_capacity(raw: &str) -> Capacity {
    let value = raw.trim().to_uppercase();

    if let Some(magnitude) = value.strip_suffix(GIGABYTE) {
        return Capacity::Gigabytes(magnitude.trim().to_string());
    }

    if let Some(magnitude) = value.strip_suffix(TERABYTE) {
        return match parse_magnitude(magnitude) {
            Some(terabytes) => Capacity::Gigabytes(((terabytes * GB_PER_TB) as i64).to_string()),
            None => Capacity::Unrecognized(value),
        };
    }

    Capacity::Unrecognized(value)
}
