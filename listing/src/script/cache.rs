use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use tracing::trace;

use super::{Markers, Script};
use crate::ParseError;

/// Parse-once cache of scripts, keyed by template text and markers.
///
/// Safe to share between threads; parsed scripts are handed out as
/// [`Arc`]s and never change afterwards.
#[derive(Debug, Default)]
pub struct ScriptCache {
    scripts: RwLock<HashMap<(String, Markers), Arc<Script>>>,
}

impl ScriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The script for `source` with default markers, parsing it on first use.
    pub fn get(&self, source: &str) -> Result<Arc<Script>, ParseError> {
        self.get_with(source, &Markers::default())
    }

    /// The script for `source` with `markers`, parsing it on first use.
    ///
    /// Templates that fail to parse are not cached.
    pub fn get_with(&self, source: &str, markers: &Markers) -> Result<Arc<Script>, ParseError> {
        let key = (source.to_string(), markers.clone());
        {
            let scripts = self.scripts.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(script) = scripts.get(&key) {
                return Ok(Arc::clone(script));
            }
        }

        let script = Arc::new(Script::parse_with(source, markers)?);
        let mut scripts = self.scripts.write().unwrap_or_else(PoisonError::into_inner);
        let script = Arc::clone(scripts.entry(key).or_insert(script));
        trace!(cached = scripts.len(), "cached template");
        Ok(script)
    }

    /// Number of cached scripts.
    pub fn len(&self) -> usize {
        self.scripts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached script.
    pub fn clear(&self) {
        self.scripts.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
