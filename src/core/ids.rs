//! Identifier types for cards, sets and tags.
//!
//! All three are opaque strings on the wire. Wrapping them keeps a set id
//! from being passed where a card id is expected.
//!
//! - `CardId`: the card's character (or compound) itself. Immutable once the
//!   card exists.
//! - `SetId`: an integer-like string allocated by the store (`"1"`, `"2"`, ...).
//! - `TagId`: the lower-cased display name of the tag.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw ID.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check for the empty ID.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Card identifier: the character being studied.
    CardId
);

string_id!(
    /// Set identifier: an integer-like string.
    SetId
);

string_id!(
    /// Tag identifier: the lower-cased tag name.
    TagId
);

impl CardId {
    /// Number of characters in the ID (not bytes).
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl SetId {
    /// Build the ID for a numeric slot.
    #[must_use]
    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Numeric value of the ID, if it is integer-like.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl TagId {
    /// Derive a tag ID from its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(name.to_lowercase())
    }
}
