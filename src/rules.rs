//! Comment syntax per language.

use std::collections::HashMap;

/// Marker strings that define comment syntax for one language.
///
/// A block comment needs both `block_start` and `block_end`; registering a
/// start without an end leaves every block unterminated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRules {
    pub single_line: Option<String>,
    pub block_start: Option<String>,
    pub block_end: Option<String>,
}

impl CommentRules {
    pub fn new(
        single_line: Option<&str>,
        block_start: Option<&str>,
        block_end: Option<&str>,
    ) -> Self {
        CommentRules {
            single_line: marker(single_line),
            block_start: marker(block_start),
            block_end: marker(block_end),
        }
    }
}

// Empty markers can never match anything useful, so they are dropped here.
fn marker(value: Option<&str>) -> Option<String> {
    value.filter(|m| !m.is_empty()).map(str::to_string)
}

/// Language name to comment rules. Built once before a run and only read
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, CommentRules>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table used by the command line tool.
    pub fn with_defaults() -> Self {
        let mut registry = RuleRegistry::new();
        registry.register("python", Some("#"), Some("\"\"\""), Some("\"\"\""));
        for language in ["javascript", "go", "cpp", "java"] {
            registry.register(language, Some("//"), Some("/*"), Some("*/"));
        }
        registry
    }

    /// Insert or overwrite the rules for `language`.
    pub fn register(
        &mut self,
        language: &str,
        single_line: Option<&str>,
        block_start: Option<&str>,
        block_end: Option<&str>,
    ) {
        self.rules.insert(
            language.to_string(),
            CommentRules::new(single_line, block_start, block_end),
        );
    }

    pub fn get_rules(&self, language: &str) -> Option<&CommentRules> {
        self.rules.get(language)
    }

    /// Registered language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
