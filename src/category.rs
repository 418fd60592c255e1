use serde::Serialize;
use std::fmt;

use crate::data::ModelRecord;

/// The closed set of use-case buckets, in fixed order. The order matters:
/// the hash fallback indexes into this list, so reordering it would move
/// models between buckets.
pub const CATEGORIES: [Category; 5] = [
    Category::Writing,
    Category::Coding,
    Category::Learning,
    Category::Business,
    Category::Creative,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Writing,
    Coding,
    Learning,
    Business,
    Creative,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Writing => "Writing",
            Category::Coding => "Coding",
            Category::Learning => "Learning",
            Category::Business => "Business",
            Category::Creative => "Creative",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        CATEGORIES.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling 31-hash over the UTF-16 code units of `source`, mod 2^31 - 1.
/// The multiplier and modulus are load-bearing: bucket assignment for a
/// given id must stay identical across releases and client implementations.
fn deterministic_category(source: &str) -> Category {
    let mut hash: u64 = 0;
    for code in source.encode_utf16() {
        hash = (hash * 31 + u64::from(code)) % 2_147_483_647;
    }
    CATEGORIES[(hash % CATEGORIES.len() as u64) as usize]
}

/// Maps a model to its use-case bucket. Keyword rules are ordered and the
/// first match wins; anything unmatched falls through to the hash, which is
/// the only route into `Business`.
pub fn choose_category(model: &ModelRecord) -> Category {
    let source = format!(
        "{} {}",
        model.id.as_deref().unwrap_or(""),
        model.name.as_deref().unwrap_or("")
    )
    .to_lowercase();

    let has = |needle: &str| source.contains(needle);

    if has("code") || has("coder") || has("program") {
        return Category::Coding;
    }
    if has("vision") || has("image") || has("creative") {
        return Category::Creative;
    }
    if has("learn") || has("edu") || has("instruct") {
        return Category::Learning;
    }
    if has("chat") || has("assistant") {
        return Category::Writing;
    }

    deterministic_category(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str, name: &str) -> ModelRecord {
        ModelRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_keyword_routing() {
        assert_eq!(choose_category(&model("open/model-coder-v1", "")), Category::Coding);
        assert_eq!(choose_category(&model("vision/model", "")), Category::Creative);
        assert_eq!(choose_category(&model("edu/model", "")), Category::Learning);
        assert_eq!(choose_category(&model("assistant/model", "")), Category::Writing);
    }

    #[test]
    fn test_keyword_rules_match_name_too() {
        assert_eq!(choose_category(&model("vendor/m1", "Nightly Image Lab")), Category::Creative);
    }

    #[test]
    fn test_keyword_order_first_rule_wins() {
        // "code" outranks "vision" because the coding rule runs first.
        assert_eq!(choose_category(&model("vendor/code-vision", "")), Category::Coding);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let m = model("vendor/model-without-keywords", "Neutral Name");
        let first = choose_category(&m);
        let second = choose_category(&m);
        assert_eq!(first, second);
        assert!(CATEGORIES.contains(&first));
    }

    #[test]
    fn test_fallback_exact_buckets() {
        // Hash of " " (empty id and name) is 32 -> index 2.
        assert_eq!(
            choose_category(&ModelRecord::default()),
            Category::Learning
        );
        // Hash of "xyz " is 3_695_015 -> index 0.
        assert_eq!(choose_category(&model("xyz", "")), Category::Writing);
    }

    #[test]
    fn test_from_name_round_trips() {
        for category in CATEGORIES {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_name("Gardening"), None);
    }
}
