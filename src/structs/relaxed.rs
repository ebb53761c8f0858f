use std::fmt;
use serde::de::{Deserialize, Deserializer, Error, Visitor};

/// Strings and numbers can be deserialized into a RelaxedString
///
/// Quantities like `cpu: 2` or `cpu: 0.5` are as common as `cpu: "500m"` in descriptors.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelaxedString(String);

impl fmt::Display for RelaxedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RelaxedString(x) = self;
        write!(f, "{}", x)
    }
}

impl From<&str> for RelaxedString {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl RelaxedString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RelaxedString {
    fn deserialize<D>(deserializer: D) -> Result<RelaxedString, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RelaxedStringVisitor)
    }
}

struct RelaxedStringVisitor;

macro_rules! visit_tostring {
    ( $name:ident, $type:ty ) => {
        fn $name<E>(self, v: $type) -> Result<Self::Value, E> where E: Error {
            self.visit_string(v.to_string())
        }
    };
}

/// RelaxedStringVisitor will visit numbers and strings
impl<'de> Visitor<'de> for RelaxedStringVisitor {
    type Value = RelaxedString;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string or a number")
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> where E: Error {
        Ok(RelaxedString(v))
    }

    // Calls `self.visit_string(v.to_string())`
    visit_tostring!(visit_str, &str);
    visit_tostring!(visit_i64, i64);
    visit_tostring!(visit_u64, u64);
    visit_tostring!(visit_f64, f64);
}

#[cfg(test)]
mod tests {
    use super::RelaxedString;

    #[test]
    fn relaxed_numbers_and_strings() {
        let xs: Vec<RelaxedString> = serde_json::from_str(r#"["500m", 2, 0.5]"#).unwrap();
        assert_eq!(xs[0].as_str(), "500m");
        assert_eq!(xs[1].as_str(), "2");
        assert_eq!(xs[2].as_str(), "0.5");
        assert!(serde_json::from_str::<RelaxedString>("null").is_err());
        assert!(serde_json::from_str::<RelaxedString>("true").is_err());
    }
}
