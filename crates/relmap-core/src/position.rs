//! CSS-like position descriptors.
//!
//! Entity coordinates in the data document may be bare numbers, absolute
//! lengths (`"120px"`, `"120"`), or percentages of the container (`"50%"`).
//! Resolution never fails: anything unparseable degrades to 0.

use serde::{Deserialize, Serialize};

/// A position descriptor as it appears in the data document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PosValue {
    Number(f64),
    Text(String),
}

impl PosValue {
    pub fn px(value: f64) -> Self {
        Self::Number(value)
    }

    /// Resolve to an absolute pixel offset within a container of the given
    /// size. Percentages scale linearly with the container; absolute values
    /// pass through numerically; invalid input resolves to 0.
    pub fn resolve(&self, container: f32) -> f32 {
        match self {
            Self::Number(n) if n.is_finite() => *n as f32,
            Self::Number(_) => 0.0,
            Self::Text(s) => {
                let s = s.trim();
                if let Some(pct) = s.strip_suffix('%') {
                    match pct.trim().parse::<f32>() {
                        Ok(p) if p.is_finite() => container * p / 100.0,
                        _ => 0.0,
                    }
                } else {
                    let raw = s.strip_suffix("px").unwrap_or(s).trim();
                    match raw.parse::<f32>() {
                        Ok(v) if v.is_finite() => v,
                        _ => 0.0,
                    }
                }
            }
        }
    }
}

impl From<f64> for PosValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_scale_with_container() {
        assert_eq!(PosValue::Text("50%".into()).resolve(800.0), 400.0);
        assert_eq!(PosValue::Text("12.5%".into()).resolve(160.0), 20.0);
        assert_eq!(PosValue::Text("0%".into()).resolve(640.0), 0.0);
    }

    #[test]
    fn absolute_values_pass_through() {
        assert_eq!(PosValue::Text("120px".into()).resolve(800.0), 120.0);
        assert_eq!(PosValue::Text("120".into()).resolve(10.0), 120.0);
        assert_eq!(PosValue::Number(42.5).resolve(0.0), 42.5);
        assert_eq!(PosValue::Text(" 7px ".into()).resolve(1.0), 7.0);
    }

    #[test]
    fn garbage_resolves_to_zero() {
        assert_eq!(PosValue::Text("".into()).resolve(800.0), 0.0);
        assert_eq!(PosValue::Text("left".into()).resolve(800.0), 0.0);
        assert_eq!(PosValue::Text("%".into()).resolve(800.0), 0.0);
        assert_eq!(PosValue::Number(f64::NAN).resolve(800.0), 0.0);
    }

    #[test]
    fn deserializes_both_shapes() {
        let v: Vec<PosValue> = serde_json::from_str(r#"[100, "25%", "10px"]"#).unwrap();
        assert_eq!(v[0].resolve(0.0), 100.0);
        assert_eq!(v[1].resolve(200.0), 50.0);
        assert_eq!(v[2].resolve(200.0), 10.0);
    }
}
