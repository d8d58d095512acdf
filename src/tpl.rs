use std::collections::BTreeMap;

/// Template processor for resolving $VARIABLE format variables.
///
/// Unregistered variables are left untouched, which lets a template carry
/// placeholders resolved at a later stage (the archiver fills in
/// `$TIMESTAMP` at creation time).
pub struct Tpl {
    variables: BTreeMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: BTreeMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a string and resolve all registered $VARIABLE references
    pub fn parse(&self, input: &str) -> String {
        let mut result = input.to_string();

        // Longest keys first so $TIMESTAMP is never clipped by a shorter
        // key sharing its prefix.
        let mut keys: Vec<&String> = self.variables.keys().collect();
        keys.sort_by_key(|k| std::cmp::Reverse(k.len()));

        for key in keys {
            if let Some(value) = self.variables.get(key) {
                result = result.replace(&format!("${}", key), value);
            }
        }

        result
    }

    /// Parse a Vec of strings
    pub fn parse_vec(&self, input: &[String]) -> Vec<String> {
        input.iter().map(|s| self.parse(s)).collect()
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parsing() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "editor");
        tpl.register("TIMESTAMP", "20260807-120000");

        let result = tpl.parse("$NAME-release-$TIMESTAMP");
        assert_eq!(result, "editor-release-20260807-120000");
    }

    #[test]
    fn test_unregistered_variable_passes_through() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "editor");

        let result = tpl.parse("$NAME-release-$TIMESTAMP");
        assert_eq!(result, "editor-release-$TIMESTAMP");
    }

    #[test]
    fn test_multiple_occurrences() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "app");

        let result = tpl.parse("$NAME/$NAME");
        assert_eq!(result, "app/app");
    }

    #[test]
    fn test_overlapping_keys() {
        let mut tpl = Tpl::new();
        tpl.register("VER", "short");
        tpl.register("VERSION", "1.2.3");

        let result = tpl.parse("app-$VERSION");
        assert_eq!(result, "app-1.2.3");
    }
}
