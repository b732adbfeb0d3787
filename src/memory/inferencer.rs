/// Pluggable symbol extraction for token nodes.
pub trait SymbolicInferencer: Send + Sync {
    /// Symbols a token refers to.
    fn infer_symbols(&self, token: &str) -> Vec<String>;

    /// Link groups a node joins given its symbols.
    fn infer_link_groups(&self, symbols: &[String]) -> Vec<String>;
}

const REFERENCES: [(&str, &str); 4] = [
    ("daffy", "Daffy Duck"),
    ("bugs", "Bugs Bunny"),
    ("elmer", "Elmer Fudd"),
    ("loony", "Looney Tunes"),
];

pub const LOONEY_TUNES_GROUP: &str = "looney_tunes_001";

/// Keyword table matched case-insensitively as a substring of the token.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordInferencer;

impl SymbolicInferencer for KeywordInferencer {
    fn infer_symbols(&self, token: &str) -> Vec<String> {
        let lowered = token.to_lowercase();
        REFERENCES
            .iter()
            .filter(|(key, _)| lowered.contains(key))
            .map(|(_, symbol)| symbol.to_string())
            .collect()
    }

    fn infer_link_groups(&self, symbols: &[String]) -> Vec<String> {
        let mut groups = Vec::new();
        if symbols.iter().any(|s| s.contains("Looney Tunes")) {
            groups.push(LOONEY_TUNES_GROUP.to_string());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_match_case_insensitively() {
        let inferencer = KeywordInferencer;
        assert_eq!(inferencer.infer_symbols("Daffy!"), vec!["Daffy Duck"]);
        assert_eq!(inferencer.infer_symbols("LOONY"), vec!["Looney Tunes"]);
        assert!(inferencer.infer_symbols("hello").is_empty());
    }

    #[test]
    fn only_looney_tunes_forms_a_group() {
        let inferencer = KeywordInferencer;
        let groups = inferencer.infer_link_groups(&["Looney Tunes".to_string()]);
        assert_eq!(groups, vec![LOONEY_TUNES_GROUP]);
        assert!(inferencer
            .infer_link_groups(&["Bugs Bunny".to_string()])
            .is_empty());
    }
}
