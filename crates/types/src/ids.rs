//! Newtype wrappers for section and item identifiers
//!
//! Both kinds of id are plain strings in a manifest, but they index different
//! maps (the section page map and the resolved image table), so they get
//! distinct types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a checklist section; unique within a document.
    SectionId
);

string_id!(
    /// Identifies a checklist item; unique within a document.
    ItemId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_creation() {
        let id1 = SectionId::new("performance");
        let id2 = SectionId::from("performance");
        let id3 = SectionId::from(String::from("performance"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "performance");
    }

    #[test]
    fn test_ids_deserialize_from_plain_strings() {
        let ids: Vec<ItemId> = serde_json::from_str(r#"["cta-1", "cta-2"]"#).unwrap();
        assert_eq!(ids, vec![ItemId::from("cta-1"), ItemId::from("cta-2")]);
    }

    #[test]
    fn test_hash_map_usage() {
        use std::collections::HashMap;

        let mut pages = HashMap::new();
        pages.insert(SectionId::new("trust"), 3);
        pages.insert(SectionId::new("checkout"), 5);

        assert_eq!(pages.get(&SectionId::new("trust")), Some(&3));
        assert_eq!(ItemId::new("trust").to_string(), "trust");
    }
}
