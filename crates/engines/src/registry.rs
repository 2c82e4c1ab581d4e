//! Engine registry — memoizes expensive engine construction.
//!
//! Engines are cached by `(kind, model)` for the life of the process; there
//! is no eviction, TTL, or capacity bound. The check-then-insert sequence
//! holds one mutex guard throughout, so the registry stays correct if it is
//! ever embedded in a long-lived service with concurrent requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tasklens_config::AppConfig;
use tasklens_core::engine::{EngineKind, GenerationParams, TextEngine};
use tasklens_core::error::EngineError;
use tracing::{debug, info};

use crate::lexical::LexicalEngine;
use crate::remote::RemoteEngine;

/// Builds a fresh engine for a cache miss.
pub type EngineBuilder = Box<
    dyn Fn(EngineKind, &str, &GenerationParams) -> Result<Arc<dyn TextEngine>, EngineError>
        + Send
        + Sync,
>;

/// Central registry holding one engine handle per `(kind, model)` key.
pub struct EngineRegistry {
    builder: EngineBuilder,
    engines: Mutex<HashMap<(EngineKind, String), Arc<dyn TextEngine>>>,
}

impl EngineRegistry {
    /// Create a registry whose builder is chosen by the configured backend.
    pub fn from_config(config: &AppConfig) -> Result<Self, EngineError> {
        let builder: EngineBuilder = match config.backend.as_str() {
            "lexical" => Box::new(|kind, model, params| {
                Ok(Arc::new(LexicalEngine::new(kind, model, params.clone())) as Arc<dyn TextEngine>)
            }),
            "remote" => {
                let endpoint = config.endpoint.clone();
                let api_key = config.api_key.clone();
                Box::new(move |kind, model, params| {
                    Ok(Arc::new(RemoteEngine::new(
                        kind,
                        model,
                        &endpoint,
                        api_key.clone(),
                        params.clone(),
                    )) as Arc<dyn TextEngine>)
                })
            }
            other => {
                return Err(EngineError::NotConfigured(format!(
                    "Unknown engine backend '{other}'"
                )));
            }
        };

        Ok(Self::with_builder(builder))
    }

    /// Create a registry with an explicit builder (used by tests to inject
    /// scripted engines).
    pub fn with_builder(builder: EngineBuilder) -> Self {
        Self {
            builder,
            engines: Mutex::new(HashMap::new()),
        }
    }

    /// Get the engine for `(kind, model)`, building it on first use.
    ///
    /// The cache key deliberately excludes `params`: if the same key is
    /// requested again with a different configuration, the stored handle is
    /// returned unchanged and the new params are silently ignored — first
    /// config wins. Callers that need differing params must use distinct
    /// models.
    pub fn acquire(
        &self,
        kind: EngineKind,
        model: &str,
        params: &GenerationParams,
    ) -> Result<Arc<dyn TextEngine>, EngineError> {
        let mut engines = self.engines.lock().unwrap_or_else(|e| e.into_inner());

        let key = (kind, model.to_string());
        if let Some(engine) = engines.get(&key) {
            debug!(kind = %kind, model, "Engine cache hit");
            return Ok(engine.clone());
        }

        info!(kind = %kind, model, "Building engine");
        let engine = (self.builder)(kind, model, params)?;
        engines.insert(key, engine.clone());
        Ok(engine)
    }

    /// Number of cached engines.
    pub fn len(&self) -> usize {
        self.engines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no engine has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("cached", &self.len())
            .finish()
    }
}
