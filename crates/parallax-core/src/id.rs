//! Identity types for page sections
//!
//! Section identifiers are strings chosen by the page author. They are cloned
//! on every frame (the resolver reads the active id each tick), so the
//! backing storage is shared rather than reallocated.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Section identity - unique within a page
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SectionId(Arc<str>);

impl SectionId {
    #[inline]
    pub fn new(id: impl AsRef<str>) -> Self {
        SectionId(Arc::from(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section({})", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        SectionId::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        SectionId(Arc::from(id))
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.0.as_ref().to_owned()
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_section_id_eq_str() {
        let id = SectionId::new("chest");
        assert_eq!(id, "chest");
        assert_eq!(id.to_string(), "chest");
        assert_eq!(format!("{:?}", id), "Section(chest)");
    }

    #[test]
    fn test_section_id_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(SectionId::new("back"), 1);
        assert_eq!(map.get("back"), Some(&1));
    }

    #[test]
    fn test_section_id_serde_as_string() {
        let id = SectionId::new("elbow");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"elbow\"");

        let back: SectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
