//! Topical scopes used to filter release sections.

use serde::Serialize;

/// Sentinel scope value that disables filtering.
pub const ALL_SCOPES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeOption {
    pub value: &'static str,
    pub label: &'static str,
}

const SCOPES: &[ScopeOption] = &[
    ScopeOption {
        value: ALL_SCOPES,
        label: "All Projects",
    },
    ScopeOption {
        value: "finance",
        label: "Finance",
    },
    ScopeOption {
        value: "yoddha",
        label: "Yoddha",
    },
    ScopeOption {
        value: "sangam",
        label: "Sangam",
    },
];

/// Every selectable scope, "All Projects" first.
pub fn list_scopes() -> &'static [ScopeOption] {
    SCOPES
}

pub fn is_all_scopes(scope: &str) -> bool {
    scope.to_lowercase() == ALL_SCOPES
}

fn find_scope(scope: &str) -> Option<&'static ScopeOption> {
    let scope = scope.to_lowercase();
    SCOPES.iter().find(|s| s.value == scope)
}

pub fn is_known_scope(scope: &str) -> bool {
    find_scope(scope).is_some()
}

/// Display label for a scope value; unknown values read as "All Projects".
pub fn scope_label(scope: &str) -> &'static str {
    find_scope(scope).unwrap_or(&SCOPES[0]).label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order() {
        let values: Vec<&str> = list_scopes().iter().map(|s| s.value).collect();
        assert_eq!(values, vec!["all", "finance", "yoddha", "sangam"]);
        assert_eq!(list_scopes()[0].label, "All Projects");
    }

    #[test]
    fn labels() {
        assert_eq!(scope_label("finance"), "Finance");
        assert_eq!(scope_label("Sangam"), "Sangam");
        assert_eq!(scope_label("marketing"), "All Projects");
    }

    #[test]
    fn known_scopes() {
        assert!(is_known_scope("yoddha"));
        assert!(is_known_scope("ALL"));
        assert!(!is_known_scope("marketing"));
        assert!(is_all_scopes("All"));
        assert!(!is_all_scopes("finance"));
        assert!(is_known_scope("FINANCE"));
        assert!(!is_known_scope("équipe"));
    }
}
