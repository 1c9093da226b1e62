//! Canonical identity keys for individuals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order-sensitive, content-derived identity of an individual.
///
/// Keys compare, hash and serialize structurally, so two individuals with
/// the same content produce equal keys in any process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalKey {
    /// Integer component.
    Int(i64),
    /// Text component.
    Text(String),
    /// Ordered sequence of components.
    Tuple(Vec<CanonicalKey>),
}

impl CanonicalKey {
    /// Build a tuple key from its parts, preserving order.
    pub fn tuple<I, K>(parts: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<CanonicalKey>,
    {
        Self::Tuple(parts.into_iter().map(Into::into).collect())
    }

    /// Components of a tuple key, or `None` for scalar keys.
    pub fn parts(&self) -> Option<&[CanonicalKey]> {
        match self {
            Self::Tuple(parts) => Some(parts),
            _ => None,
        }
    }
}

impl From<&str> for CanonicalKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CanonicalKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CanonicalKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<CanonicalKey>> for CanonicalKey {
    fn from(value: Vec<CanonicalKey>) -> Self {
        Self::Tuple(value)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_order_sensitive() {
        let ab = CanonicalKey::tuple(["A", "B"]);
        let ba = CanonicalKey::tuple(["B", "A"]);
        assert_ne!(ab, ba);

        let set: HashSet<_> = [ab.clone(), ba, ab].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_nested_display() {
        let key = CanonicalKey::tuple(vec![
            CanonicalKey::from("LinearPipeline"),
            CanonicalKey::tuple(vec![CanonicalKey::from("PCA"), CanonicalKey::from(3)]),
        ]);
        assert_eq!(key.to_string(), r#"("LinearPipeline", ("PCA", 3))"#);
    }

    #[test]
    fn test_serialization_is_stable() {
        let key = CanonicalKey::tuple(vec![CanonicalKey::from("A"), CanonicalKey::from(7)]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"["A",7]"#);

        let parsed: CanonicalKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
