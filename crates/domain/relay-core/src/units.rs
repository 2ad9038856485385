use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary-prefixed magnitudes as rclone prints them. The MiB, GiB and TiB factors
/// are rclone's own rounded constants, not exact powers of two.
const MAGNITUDES: [(&str, f64); 4] = [
    ("KiB", 1024.0),
    ("MiB", 1.049e6),
    ("GiB", 1.074e9),
    ("TiB", 1.1e12),
];

/// Display unit for progress and size estimates, fixed for the lifetime of an `Rclone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferUnit {
    #[default]
    Bytes,
    /// Decimal megabytes (1e6 bytes).
    Megabytes,
}

impl TransferUnit {
    pub fn multiplier(self) -> f64 {
        match self {
            TransferUnit::Bytes => 1.0,
            TransferUnit::Megabytes => 1e6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransferUnit::Bytes => "B",
            TransferUnit::Megabytes => "MB",
        }
    }
}

impl fmt::Display for TransferUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransferUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "bytes" => Ok(TransferUnit::Bytes),
            "mb" | "megabytes" => Ok(TransferUnit::Megabytes),
            other => Err(format!("unknown transfer unit `{other}` (expected B or MB)")),
        }
    }
}

/// Outcome of reading a human-readable size token.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeReading {
    /// Quantity converted to the active unit, rounded to 2 decimals.
    Amount(f64),
    /// No recognized magnitude; the input is handed back untouched.
    Unparsed(String),
}

impl SizeReading {
    pub fn amount(&self) -> Option<f64> {
        match self {
            SizeReading::Amount(v) => Some(*v),
            SizeReading::Unparsed(_) => None,
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a token such as `1.5 MiB` into `unit`.
///
/// Magnitudes are checked from smallest to largest. A bare trailing ` B` is read
/// as plain bytes. Anything else, including a marker whose number does not
/// parse, comes back as [`SizeReading::Unparsed`].
pub fn parse_size_token(text: &str, unit: TransferUnit) -> SizeReading {
    for (suffix, factor) in MAGNITUDES {
        if let Some(idx) = text.find(suffix) {
            return scaled(text, &text[..idx], factor, unit);
        }
    }

    if let Some(number) = text.trim_end().strip_suffix(" B") {
        return scaled(text, number, 1.0, unit);
    }

    SizeReading::Unparsed(text.to_string())
}

fn scaled(text: &str, number: &str, factor: f64, unit: TransferUnit) -> SizeReading {
    match number.trim().parse::<f64>() {
        Ok(value) => SizeReading::Amount(round2(value * factor / unit.multiplier())),
        Err(_) => SizeReading::Unparsed(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kib_in_bytes() {
        assert_eq!(
            parse_size_token("2 KiB", TransferUnit::Bytes),
            SizeReading::Amount(2048.0)
        );
        assert_eq!(
            parse_size_token("1.5 KiB", TransferUnit::Bytes),
            SizeReading::Amount(1536.0)
        );
    }

    #[test]
    fn mib_uses_rclone_rounding_constant() {
        assert_eq!(
            parse_size_token("10 MiB", TransferUnit::Megabytes),
            SizeReading::Amount(10.49)
        );
        assert_eq!(
            parse_size_token("1 MiB", TransferUnit::Bytes),
            SizeReading::Amount(1_049_000.0)
        );
    }

    #[test]
    fn gib_in_megabytes() {
        assert_eq!(
            parse_size_token("2 GiB", TransferUnit::Megabytes),
            SizeReading::Amount(2148.0)
        );
    }

    #[test]
    fn plain_bytes_are_recognized() {
        assert_eq!(
            parse_size_token("512 B", TransferUnit::Bytes),
            SizeReading::Amount(512.0)
        );
    }

    #[test]
    fn unrecognized_tokens_come_back_unchanged() {
        assert_eq!(
            parse_size_token("12 PiB", TransferUnit::Bytes),
            SizeReading::Unparsed("12 PiB".to_string())
        );
        assert_eq!(
            parse_size_token("abc KiB", TransferUnit::Bytes),
            SizeReading::Unparsed("abc KiB".to_string())
        );
        assert_eq!(parse_size_token("", TransferUnit::Bytes).amount(), None);
    }

    #[test]
    fn unit_parsing_accepts_labels_and_names() {
        assert_eq!("MB".parse::<TransferUnit>(), Ok(TransferUnit::Megabytes));
        assert_eq!("bytes".parse::<TransferUnit>(), Ok(TransferUnit::Bytes));
        assert!("GB".parse::<TransferUnit>().is_err());
    }
}
