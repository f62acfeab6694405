//! Scalar cell values
//!
//! Records hold scalars only. The textual form of each scalar is the exact text
//! written into an exported cell.

use std::fmt::{self, Display, Formatter};

/// A single cell value
///
/// # Invariants
/// - Never nested: tables are flat
/// - `Display` is the canonical stringification used by every encoder
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Free text, written verbatim
    Text(String),
    /// Whole number
    Integer(i64),
    /// Floating point measurement (linear meters, percentages)
    Number(f64),
    /// Flag such as `isCurrent`
    Bool(bool),
}

impl Scalar {
    /// Render the cell text
    #[must_use]
    pub fn to_cell(&self) -> String {
        self.to_string()
    }

    /// Borrow the text if this is a `Text` value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(x) if x.is_nan() => f.write_str("NaN"),
            Self::Number(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(x) => write_number(f, *x),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Finite float in the dashboard's number notation
///
/// Shortest round-trip digits; plain decimal for exponents in `-7 < e < 21`,
/// otherwise `<mantissa>e+<e>` / `<mantissa>e-<e>`. Negative zero prints as `0`.
fn write_number(f: &mut Formatter<'_>, x: f64) -> fmt::Result {
    if x == 0.0 {
        return f.write_str("0");
    }
    let sci = format!("{x:e}");
    match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) if exp >= 21 => write!(f, "{mantissa}e+{exp}"),
        Some((mantissa, Ok(exp))) if exp <= -7 => write!(f, "{mantissa}e{exp}"),
        _ => write!(f, "{x}"),
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(Scalar::Number(3.0).to_cell(), "3");
        assert_eq!(Scalar::Number(-0.5).to_cell(), "-0.5");
    }

    #[test]
    fn floats_use_shortest_form() {
        assert_eq!(Scalar::Number(4.37).to_cell(), "4.37");
        assert_eq!(Scalar::Number(72.5).to_cell(), "72.5");
    }

    #[test]
    fn exponent_range_matches_dashboard_notation() {
        assert_eq!(Scalar::Number(1e21).to_cell(), "1e+21");
        assert_eq!(Scalar::Number(-2.5e22).to_cell(), "-2.5e+22");
        assert_eq!(Scalar::Number(1e-7).to_cell(), "1e-7");
        assert_eq!(Scalar::Number(1.5e-7).to_cell(), "1.5e-7");
        assert_eq!(Scalar::Number(1e20).to_cell(), "100000000000000000000");
        assert_eq!(Scalar::Number(0.000001).to_cell(), "0.000001");
        assert_eq!(Scalar::Number(-0.0).to_cell(), "0");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(Scalar::Number(f64::NAN).to_cell(), "NaN");
        assert_eq!(Scalar::Number(f64::INFINITY).to_cell(), "Infinity");
        assert_eq!(Scalar::Number(f64::NEG_INFINITY).to_cell(), "-Infinity");
    }

    #[test]
    fn bools_and_integers() {
        assert_eq!(Scalar::Bool(true).to_cell(), "true");
        assert_eq!(Scalar::Bool(false).to_cell(), "false");
        assert_eq!(Scalar::Integer(-45).to_cell(), "-45");
    }

    #[test]
    fn text_is_verbatim() {
        let s = Scalar::from("User 3 (5/2/2023)");
        assert_eq!(s.to_cell(), "User 3 (5/2/2023)");
        assert_eq!(s.as_text(), Some("User 3 (5/2/2023)"));
        assert_eq!(Scalar::from(7).as_text(), None);
    }
}
