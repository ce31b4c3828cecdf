//! Structural comparison of recorded and live response documents.
//!
//! Both sides are decoded into the same domain type and serialized back to
//! JSON before comparing. Attributes the application never exposes are marked
//! `#[serde(skip)]` on the domain types, so they drop out at that step; the
//! [`RuleSet`] then names the exposed fields that are still too volatile to
//! compare.

use serde::Serialize;
use serde_json::Value;

/// Fields excluded from equality for one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    name: &'static str,
    ignored_fields: &'static [&'static str],
}

impl RuleSet {
    /// Every exposed field must match.
    pub const STRICT: RuleSet = RuleSet::new("strict", &[]);

    /// Chair documents: every exposed field must match.
    pub const CHAIR: RuleSet = RuleSet::new("chair", &[]);

    /// Estate documents: coordinates are recomputed by the application and
    /// are not bit-stable across runs.
    pub const ESTATE: RuleSet = RuleSet::new("estate", &["latitude", "longitude"]);

    pub const fn new(name: &'static str, ignored_fields: &'static [&'static str]) -> Self {
        Self {
            name,
            ignored_fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ignores(&self, field: &str) -> bool {
        self.ignored_fields.contains(&field)
    }
}

/// Result of comparing two values.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareResult {
    /// Values match.
    Match,
    /// Values don't match.
    Mismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// Field present in the expected document is absent from the actual one.
    Missing { path: String },
}

impl CompareResult {
    pub fn is_match(&self) -> bool {
        matches!(self, CompareResult::Match)
    }
}

/// Compare two domain values under `rules`.
pub fn compare_documents<T: Serialize>(
    expected: &T,
    actual: &T,
    rules: &RuleSet,
) -> Result<CompareResult, serde_json::Error> {
    let expected = serde_json::to_value(expected)?;
    let actual = serde_json::to_value(actual)?;
    Ok(compare_values(&expected, &actual, rules))
}

/// Boolean form of [`compare_documents`]. A value that cannot be serialized
/// never equals anything.
pub fn equal<T: Serialize>(expected: &T, actual: &T, rules: &RuleSet) -> bool {
    compare_documents(expected, actual, rules).is_ok_and(|r| r.is_match())
}

/// Deep comparison of two JSON documents. Reports the first difference found.
pub fn compare_values(expected: &Value, actual: &Value, rules: &RuleSet) -> CompareResult {
    let mut path = String::from("$");
    compare_at(&mut path, expected, actual, rules)
}

fn compare_at(
    path: &mut String,
    expected: &Value,
    actual: &Value,
    rules: &RuleSet,
) -> CompareResult {
    match (expected, actual) {
        (Value::Object(e), Value::Object(a)) => {
            for (key, e_val) in e {
                if rules.ignores(key) {
                    continue;
                }
                let len = path.len();
                path.push('.');
                path.push_str(key);
                let result = match a.get(key) {
                    Some(a_val) => compare_at(path, e_val, a_val, rules),
                    None => CompareResult::Missing { path: path.clone() },
                };
                if !result.is_match() {
                    return result;
                }
                path.truncate(len);
            }
            match a.keys().find(|k| !rules.ignores(k) && !e.contains_key(*k)) {
                Some(extra) => CompareResult::Mismatch {
                    path: format!("{path}.{extra}"),
                    expected: "<absent>".to_string(),
                    actual: a[extra].to_string(),
                },
                None => CompareResult::Match,
            }
        }
        (Value::Array(e), Value::Array(a)) => {
            if e.len() != a.len() {
                return CompareResult::Mismatch {
                    path: path.clone(),
                    expected: format!("{} elements", e.len()),
                    actual: format!("{} elements", a.len()),
                };
            }
            for (i, (e_val, a_val)) in e.iter().zip(a).enumerate() {
                let len = path.len();
                path.push_str(&format!("[{i}]"));
                let result = compare_at(path, e_val, a_val, rules);
                if !result.is_match() {
                    return result;
                }
                path.truncate(len);
            }
            CompareResult::Match
        }
        (Value::Number(e), Value::Number(a)) => {
            let same = match (e.as_i64(), a.as_i64()) {
                (Some(e), Some(a)) => e == a,
                _ => e.as_f64() == a.as_f64(),
            };
            if same {
                CompareResult::Match
            } else {
                mismatch(path, expected, actual)
            }
        }
        _ if expected == actual => CompareResult::Match,
        _ => mismatch(path, expected, actual),
    }
}

fn mismatch(path: &str, expected: &Value, actual: &Value) -> CompareResult {
    CompareResult::Mismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
