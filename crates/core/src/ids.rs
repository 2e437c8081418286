//! String identifiers for workbooks (units), sheets and comments.
//!
//! Ids are opaque: the host application chooses them and they are compared
//! byte-for-byte. Comment and thread ids can be minted locally.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(
    /// Identifies a workbook document (a "unit" in the render/command layer).
    UnitId
);
string_id!(
    /// Identifies a sheet inside a workbook. Stable across renames.
    SheetId
);
string_id!(
    /// Identifies a single comment.
    CommentId
);
string_id!(
    /// Identifies a comment thread (root comment plus replies).
    ThreadId
);

impl CommentId {
    /// Mint a fresh random comment id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

impl ThreadId {
    /// Mint a fresh random thread id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = CommentId::generate();
        let b = CommentId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = SheetId::new("sheet-01");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sheet-01\"");
        assert_eq!(format!("{}", id), "sheet-01");
    }
}
