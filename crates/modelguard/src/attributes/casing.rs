//! Convention-insensitive attribute name matching.
//!
//! Pure functions only: nothing here knows about stores, models or events.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// The five renderings of one attribute name.
///
/// Order is fixed: UPPER, lower, Pascal, camel, snake. Variants may repeat
/// (`"name"` is its own lower, camel and snake form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasingVariants([String; 5]);

impl CasingVariants {
    pub fn upper(&self) -> &str {
        &self.0[0]
    }

    pub fn lower(&self) -> &str {
        &self.0[1]
    }

    pub fn pascal(&self) -> &str {
        &self.0[2]
    }

    pub fn camel(&self) -> &str {
        &self.0[3]
    }

    pub fn snake(&self) -> &str {
        &self.0[4]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Exact match against one of the variants.
    pub fn contains(&self, candidate: &str) -> bool {
        self.iter().any(|variant| variant == candidate)
    }

    /// True when the two sets share at least one non-empty rendering.
    ///
    /// Names made only of separators (`"_"`, `"__"`) lose every character in
    /// the word-split forms; those empty forms never count as a match.
    pub fn intersects(&self, other: &CasingVariants) -> bool {
        self.iter()
            .filter(|variant| !variant.is_empty())
            .any(|variant| other.contains(variant))
    }
}

/// Build the casing variants of `name`.
///
/// UPPER and lower are whole-string Unicode case mappings; the other three
/// split on word boundaries (underscores, hyphens, case changes).
pub fn casing_variants(name: &str) -> CasingVariants {
    CasingVariants([
        name.to_uppercase(),
        name.to_lowercase(),
        name.to_upper_camel_case(),
        name.to_lower_camel_case(),
        name.to_snake_case(),
    ])
}

/// Check whether `name` matches any of the `declared` names in any convention.
pub fn is_protected<S: AsRef<str>>(name: &str, declared: &[S]) -> bool {
    if declared.is_empty() {
        return false;
    }
    let variants = casing_variants(name);
    declared
        .iter()
        .any(|entry| variants.intersects(&casing_variants(entry.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_of_snake_name() {
        let variants = casing_variants("created_at");
        assert_eq!(variants.upper(), "CREATED_AT");
        assert_eq!(variants.lower(), "created_at");
        assert_eq!(variants.pascal(), "CreatedAt");
        assert_eq!(variants.camel(), "createdAt");
        assert_eq!(variants.snake(), "created_at");
    }

    #[test]
    fn variants_of_camel_name() {
        let variants = casing_variants("createdAt");
        assert_eq!(variants.upper(), "CREATEDAT");
        assert_eq!(variants.lower(), "createdat");
        assert_eq!(variants.pascal(), "CreatedAt");
        assert_eq!(variants.camel(), "createdAt");
        assert_eq!(variants.snake(), "created_at");
    }

    #[test]
    fn variants_keep_fixed_order() {
        let all: Vec<_> = casing_variants("user_id").iter().map(String::from).collect();
        assert_eq!(all, vec!["USER_ID", "user_id", "UserId", "userId", "user_id"]);
    }

    #[test]
    fn single_word_variants_repeat() {
        let variants = casing_variants("name");
        assert_eq!(variants.iter().filter(|v| *v == "name").count(), 3);
        assert!(variants.contains("NAME"));
        assert!(variants.contains("Name"));
    }

    #[test]
    fn intersects_across_conventions() {
        let snake = casing_variants("created_at");
        let camel = casing_variants("createdAt");
        let pascal = casing_variants("CreatedAt");
        assert!(snake.intersects(&camel));
        assert!(camel.intersects(&pascal));
        assert!(pascal.intersects(&snake));
    }

    #[test]
    fn protected_in_every_convention() {
        let declared = ["created_at"];
        for key in ["created_at", "createdAt", "CreatedAt", "CREATED_AT"] {
            assert!(is_protected(key, &declared), "{key} should match");
        }
    }

    #[test]
    fn declaration_in_other_convention_protects_snake_key() {
        assert!(is_protected("created_at", &["createdAt"]));
        assert!(is_protected("created_at", &["CreatedAt"]));
        assert!(is_protected("created_at", &["CREATED_AT"]));
    }

    #[test]
    fn different_names_do_not_match() {
        assert!(!is_protected("updated_at", &["created_at"]));
        assert!(!is_protected("updatedAt", &["created_at"]));
    }

    #[test]
    fn no_substring_or_prefix_matches() {
        let declared = ["name"];
        assert!(!is_protected("username", &declared));
        assert!(!is_protected("first_name", &declared));
        assert!(!is_protected("nam", &declared));
        assert!(!is_protected("names", &declared));
    }

    #[test]
    fn separator_only_names_match_exactly() {
        let declared = ["__"];
        assert!(is_protected("__", &declared));
        assert!(!is_protected("_", &declared));
        assert!(!is_protected("", &declared));
        assert!(!is_protected(" ", &declared));
        assert!(!is_protected("", &[""]));
    }

    #[test]
    fn empty_declaration_protects_nothing() {
        let declared: [&str; 0] = [];
        assert!(!is_protected("anything", &declared));
    }

    #[test]
    fn matches_any_declared_entry() {
        let declared = vec!["id".to_string(), "email_address".to_string()];
        assert!(is_protected("emailAddress", declared.as_slice()));
        assert!(is_protected("ID", declared.as_slice()));
        assert!(!is_protected("email", declared.as_slice()));
    }
}
