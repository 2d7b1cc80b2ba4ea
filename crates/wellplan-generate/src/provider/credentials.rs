use std::collections::BTreeMap;
use std::fmt;

use super::ProviderKind;

/// API keys per backend. Blank values count as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: BTreeMap<ProviderKind, String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("present", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Credentials {
    /// Read every backend's key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read keys through `lookup`, keyed by environment variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut credentials = Self::default();
        for kind in ProviderKind::PRIORITY {
            if let Some(key) = lookup(kind.credential_var()) {
                credentials = credentials.with(kind, key);
            }
        }
        credentials
    }

    pub fn with(mut self, kind: ProviderKind, key: impl Into<String>) -> Self {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            self.keys.remove(&kind);
        } else {
            self.keys.insert(kind, key);
        }
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        self.keys.get(&kind).map(String::as_str)
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.keys.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_blank_keys() {
        let credentials = Credentials::from_lookup(|var| match var {
            "OPENAI_API_KEY" => Some("   ".to_string()),
            "GEMINI_API_KEY" => Some("g-key".to_string()),
            _ => None,
        });
        assert!(!credentials.has(ProviderKind::OpenAi));
        assert_eq!(credentials.get(ProviderKind::Gemini), Some("g-key"));
    }

    #[test]
    fn debug_output_hides_keys() {
        let credentials = Credentials::default().with(ProviderKind::OpenAi, "sk-secret");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("OpenAi"));
    }
}
