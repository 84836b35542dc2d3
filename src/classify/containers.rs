//! Standard-container recognition and spelling normalization helpers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config::ClassifierConfig;

/// Unqualified standard-container name -> supports a clear/reset operation.
static STL_CONTAINERS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    HashMap::from([
        ("deque", true),
        ("list", true),
        ("map", true),
        ("multiset", true),
        ("multimap", true),
        ("pair", false),
        ("priority_queue", false),
        ("queue", false),
        ("set", true),
        ("stack", false),
        ("vector", true),
    ])
});

/// Outcome of testing a normalized record spelling against the standard
/// library namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdRecognition {
    /// Not in the standard-library namespace at all.
    NotStd,
    /// A recognized standard container.
    Container { clearable: bool },
    /// In the standard-library namespace but not a supported container.
    UnknownStd,
}

/// Classify a normalized record spelling against the container table.
///
/// Any configured ABI sub-namespace spelling between `std::` and the
/// container name is tolerated, so `std::__cxx11::list<int>` and
/// `std::list<int>` resolve identically.
pub fn recognize_std(spelling: &str, config: &ClassifierConfig) -> StdRecognition {
    let rest = match strip_std_prefix(spelling, config) {
        Some(rest) => rest,
        None => return StdRecognition::NotStd,
    };

    let unqualified = rest.split(['<', ' ']).next().unwrap_or(rest);
    match STL_CONTAINERS.get(unqualified) {
        Some(&clearable) => StdRecognition::Container { clearable },
        None => StdRecognition::UnknownStd,
    }
}

/// Whether a qualified record name is a string-like wrapper under any
/// ABI-version spelling.
pub fn is_string_like(qualified_name: &str, config: &ClassifierConfig) -> bool {
    if qualified_name == "std::basic_string" {
        return true;
    }
    config
        .std_sub_namespaces
        .iter()
        .any(|ns| qualified_name == format!("std::{ns}::basic_string"))
}

/// Strip `std::` plus at most one ABI sub-namespace from a spelling.
fn strip_std_prefix<'a>(spelling: &'a str, config: &ClassifierConfig) -> Option<&'a str> {
    let rest = spelling.strip_prefix("std::")?;
    for ns in &config.std_sub_namespaces {
        if let Some(stripped) = rest
            .strip_prefix(ns.as_str())
            .and_then(|r| r.strip_prefix("::"))
        {
            return Some(stripped);
        }
    }
    Some(rest)
}

/// Drop `class `/`struct ` keyword tokens and undo the front-end rewrite of
/// the boolean builtin to its internal `_Bool` spelling.
pub fn normalize_spelling(spelling: &str) -> String {
    spelling
        .replace("class ", "")
        .replace("struct ", "")
        .replace("<_Bool", "<bool")
        .replace(" _Bool", " bool")
}

/// Drop the leading `enum ` keyword token from a printed enum spelling.
pub fn strip_enum_keyword(spelling: &str) -> String {
    match spelling.find("enum ") {
        Some(pos) => {
            let mut name = spelling.to_string();
            name.replace_range(pos..pos + 5, "");
            name
        }
        None => spelling.to_string(),
    }
}

/// Replace the unresolvable generic-parameter scope of an enum spelling with
/// a placeholder, e.g. `Wheel<T>::Kind` becomes `Wheel__Kind`. No attribute
/// data exists for such an enum, so the exact scope is unrecoverable anyway.
pub fn sanitize_uninstantiated(spelling: &str) -> String {
    let mut name = spelling.to_string();
    if let Some(start) = name.find('<') {
        if let Some(end) = name.rfind(['>', ':']) {
            if end >= start {
                name.replace_range(start..=end, "__");
            }
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_std_all_abi_spellings() {
        let config = ClassifierConfig::default();
        for spelling in [
            "std::vector<int, std::allocator<int>>",
            "std::__1::vector<int, std::__1::allocator<int>>",
            "std::__cxx11::vector<int>",
        ] {
            assert_eq!(
                recognize_std(spelling, &config),
                StdRecognition::Container { clearable: true },
                "spelling {spelling} not recognized"
            );
        }
    }

    #[test]
    fn test_recognize_std_clear_support() {
        let config = ClassifierConfig::default();
        let clearable = ["deque", "list", "map", "multiset", "multimap", "set", "vector"];
        let fixed = ["pair", "priority_queue", "queue", "stack"];
        for name in clearable {
            assert_eq!(
                recognize_std(&format!("std::{name}<int>"), &config),
                StdRecognition::Container { clearable: true }
            );
        }
        for name in fixed {
            assert_eq!(
                recognize_std(&format!("std::{name}<int>"), &config),
                StdRecognition::Container { clearable: false }
            );
        }
    }

    #[test]
    fn test_recognize_std_unknown_container() {
        let config = ClassifierConfig::default();
        assert_eq!(
            recognize_std("std::unordered_map<int, int>", &config),
            StdRecognition::UnknownStd
        );
    }

    #[test]
    fn test_recognize_non_std() {
        let config = ClassifierConfig::default();
        assert_eq!(recognize_std("Ball::State", &config), StdRecognition::NotStd);
    }

    #[test]
    fn test_is_string_like() {
        let config = ClassifierConfig::default();
        assert!(is_string_like("std::basic_string", &config));
        assert!(is_string_like("std::__1::basic_string", &config));
        assert!(is_string_like("std::__cxx11::basic_string", &config));
        assert!(!is_string_like("std::vector", &config));
    }

    #[test]
    fn test_normalize_spelling_strips_keywords() {
        assert_eq!(normalize_spelling("class Ball"), "Ball");
        assert_eq!(
            normalize_spelling("struct Outer<struct Inner>"),
            "Outer<Inner>"
        );
    }

    #[test]
    fn test_normalize_spelling_restores_bool() {
        assert_eq!(normalize_spelling("std::vector<_Bool>"), "std::vector<bool>");
        assert_eq!(
            normalize_spelling("std::map<int, _Bool>"),
            "std::map<int, bool>"
        );
    }

    #[test]
    fn test_strip_enum_keyword() {
        assert_eq!(strip_enum_keyword("enum Ball::State"), "Ball::State");
        assert_eq!(strip_enum_keyword("Ball::State"), "Ball::State");
    }

    #[test]
    fn test_sanitize_uninstantiated() {
        assert_eq!(sanitize_uninstantiated("Wheel<T>::Kind"), "Wheel__Kind");
        assert_eq!(sanitize_uninstantiated("Ball::State"), "Ball::State");
    }
}
