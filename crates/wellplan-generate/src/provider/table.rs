use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{
    Credentials, GeminiProvider, GenerationProvider, OpenAiProvider, ProviderChoice, ProviderKind,
};
use crate::errors::ProviderError;
use crate::settings::ProviderSettings;

/// Backends that have a credential, keyed by kind.
#[derive(Clone, Default)]
pub struct ProviderTable {
    providers: BTreeMap<ProviderKind, Arc<dyn GenerationProvider>>,
}

impl fmt::Debug for ProviderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderTable")
            .field("available", &self.available())
            .finish()
    }
}

impl ProviderTable {
    /// Build an HTTP backend for every kind with a credential.
    pub fn from_credentials(
        credentials: &Credentials,
        settings: &ProviderSettings,
    ) -> Result<Self, ProviderError> {
        let mut table = Self::default();
        let timeout = settings.timeout();

        for kind in ProviderKind::PRIORITY {
            let Some(key) = credentials.get(kind) else {
                debug!(event = "provider_unavailable", provider = %kind, reason = "no credential");
                continue;
            };
            let endpoint = settings.endpoint(kind);
            let provider: Arc<dyn GenerationProvider> = match kind {
                ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(key, endpoint, timeout)?),
                ProviderKind::Gemini => Arc::new(GeminiProvider::new(key, endpoint, timeout)?),
            };
            table.insert(provider);
        }

        Ok(table)
    }

    /// Register a backend, replacing any previous one of the same kind.
    pub fn insert(&mut self, provider: Arc<dyn GenerationProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    pub fn with(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.insert(provider);
        self
    }

    /// Kinds available for selection, in priority order.
    pub fn available(&self) -> Vec<ProviderKind> {
        ProviderKind::PRIORITY
            .into_iter()
            .filter(|kind| self.providers.contains_key(kind))
            .collect()
    }

    /// Pick the backend for `choice`.
    ///
    /// `Ok(None)` means `auto` found nothing and the caller should fall back.
    /// An explicit choice without a backend is an error.
    pub fn select(
        &self,
        choice: ProviderChoice,
    ) -> Result<Option<Arc<dyn GenerationProvider>>, ProviderError> {
        match choice {
            ProviderChoice::Explicit(kind) => self
                .providers
                .get(&kind)
                .cloned()
                .map(Some)
                .ok_or(ProviderError::MissingCredential { provider: kind }),
            ProviderChoice::Auto => Ok(ProviderKind::PRIORITY
                .iter()
                .find_map(|kind| self.providers.get(kind).cloned())),
        }
    }
}
