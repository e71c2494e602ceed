//! Capability registry
//!
//! Runtimes and libraries the pipeline depends on register a named handle
//! here. Probes look handles up by name instead of poking at process-wide
//! globals, so tests can hand the checker a registry with exactly the
//! capabilities they want.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;

use handsign_core::{HandsignError, HandsignResult};

/// A registered capability and the attributes it advertises
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityHandle {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl CapabilityHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Parses `name` or `name:key=value,key=value`
impl FromStr for CapabilityHandle {
    type Err = HandsignError;

    fn from_str(s: &str) -> HandsignResult<Self> {
        let (name, attrs) = match s.split_once(':') {
            Some((name, attrs)) => (name.trim(), Some(attrs)),
            None => (s.trim(), None),
        };

        if name.is_empty() {
            return Err(HandsignError::Config(format!(
                "capability name missing in {:?}",
                s
            )));
        }

        let mut handle = CapabilityHandle::new(name);
        let pairs = attrs
            .into_iter()
            .flat_map(|a| a.split(','))
            .filter(|p| !p.trim().is_empty());
        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                HandsignError::Config(format!("expected key=value, got {:?}", pair))
            })?;
            handle = handle.with_attribute(key.trim(), value.trim());
        }

        Ok(handle)
    }
}

/// Lookup of capability handles by name
pub trait CapabilityRegistry: Send + Sync {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle>;
}

impl<R: CapabilityRegistry + ?Sized> CapabilityRegistry for Arc<R> {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle> {
        (**self).lookup(name)
    }
}

/// In-process registry that components register themselves into
#[derive(Debug, Default)]
pub struct StaticRegistry {
    handles: RwLock<HashMap<String, CapabilityHandle>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    pub fn with(self, handle: CapabilityHandle) -> Self {
        self.register(handle);
        self
    }

    /// Register or replace a handle
    pub fn register(&self, handle: CapabilityHandle) {
        self.handles.write().insert(handle.name.clone(), handle);
    }

    pub fn unregister(&self, name: &str) -> Option<CapabilityHandle> {
        self.handles.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }
}

impl CapabilityRegistry for StaticRegistry {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle> {
        self.handles.read().get(name).cloned()
    }
}

/// Registry layered over a fallback: entries in `primary` win
pub struct LayeredRegistry<P, F> {
    primary: P,
    fallback: F,
}

impl<P: CapabilityRegistry, F: CapabilityRegistry> LayeredRegistry<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: CapabilityRegistry, F: CapabilityRegistry> CapabilityRegistry for LayeredRegistry<P, F> {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle> {
        self.primary
            .lookup(name)
            .or_else(|| self.fallback.lookup(name))
    }
}

/// Capabilities the host process itself provides
///
/// Exposes the sandboxed bytecode runtime under `sandbox_name` when the
/// binary was built for a wasm target. Native builds report it absent.
#[derive(Debug, Clone)]
pub struct HostRegistry {
    sandbox_name: String,
}

impl HostRegistry {
    pub fn new(sandbox_name: impl Into<String>) -> Self {
        Self {
            sandbox_name: sandbox_name.into(),
        }
    }
}

impl CapabilityRegistry for HostRegistry {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle> {
        if name != self.sandbox_name || !cfg!(target_family = "wasm") {
            return None;
        }

        Some(
            CapabilityHandle::new(name)
                .with_attribute("type", "object")
                .with_attribute("arch", std::env::consts::ARCH),
        )
    }
}
