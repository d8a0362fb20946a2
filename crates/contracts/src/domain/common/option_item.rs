use serde::{Deserialize, Serialize};

/// Identifier of any selectable row coming from a list endpoint
pub type Identifier = i64;

/// One selectable row of a dependent dropdown (country, province, city,
/// station, trip, seat). Identity is `id`; the label is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: Identifier,
    pub label: String,
}

impl OptionItem {
    pub fn new(id: Identifier, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Case-insensitive substring match on the label; empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        needle.is_empty() || self.label.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive() {
        let item = OptionItem::new(1, "Kabul");
        assert!(item.matches("kab"));
        assert!(item.matches("  "));
        assert!(!item.matches("herat"));
    }
}
