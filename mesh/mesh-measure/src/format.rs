//! Text formatting helpers for log output.

use mesh_types::{Point3, Vector3};

/// Format a count with comma thousands separators.
///
/// ```
/// use mesh_measure::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1_000_000), "1,000,000");
/// ```
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a triple as `(x, y, z)` with two decimals.
#[must_use]
pub fn format_triple(x: f64, y: f64, z: f64) -> String {
    format!("({}, {}, {})", round2(x), round2(y), round2(z))
}

/// Format a point with two decimals.
#[must_use]
pub fn format_point(p: &Point3<f64>) -> String {
    format_triple(p.x, p.y, p.z)
}

/// Format a vector with two decimals.
#[must_use]
pub fn format_vector(v: &Vector3<f64>) -> String {
    format_triple(v.x, v.y, v.z)
}

/// Two-decimal rendering that never shows `-0.00`.
fn round2(v: f64) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}
