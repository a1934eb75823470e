//! Shared newtypes and utilities used across all domain modules.
//!
//! The identifier types are serialization-transparent: they serialize/deserialize
//! identically to the raw `_id` strings the backend sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod money;
pub mod serde_util;

pub use money::{format_rupees, round_currency};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok($name(s))
            }
        }
    };
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

string_id!(
    /// Tenant identifier. Every storefront, order and analytics query is scoped by it.
    SalonId
);

string_id!(
    /// Catalog product identifier (backend `_id`).
    ProductId
);

string_id!(
    /// Order identifier. Draft and finalized orders share the same id space.
    OrderId
);
