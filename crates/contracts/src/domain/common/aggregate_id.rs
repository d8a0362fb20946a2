use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate identifier types
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Raw numeric value as used by the list endpoints
    fn value(&self) -> i64;

    fn as_string(&self) -> String {
        self.value().to_string()
    }
}

/// Declares an `i64` newtype id and its `AggregateId` impl.
#[macro_export]
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $crate::domain::common::AggregateId for $name {
            fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    numeric_id!(
        /// Test id
        SampleId
    );

    #[test]
    fn test_numeric_id_is_transparent() {
        let id = SampleId::from(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.as_string(), "42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<SampleId>("7").unwrap(), SampleId(7));
    }
}
