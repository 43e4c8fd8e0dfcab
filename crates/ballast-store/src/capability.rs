use std::fmt;
use std::sync::{Arc, Mutex};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Point-in-time storage capability of the current environment.
///
/// The signal comes from deployment configuration, never from probing the
/// filesystem. Callers re-read it on every gateway call rather than caching
/// it for the process lifetime, so environments that flip capability at
/// runtime are honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Persistent storage can be read and rewritten.
    ReadWrite,
    /// The document may exist and be readable, but writes are denied.
    ReadOnly,
    /// No persistent storage in this environment at all.
    Unavailable,
}

impl Capability {
    pub fn can_read(self) -> bool {
        matches!(self, Capability::ReadWrite | Capability::ReadOnly)
    }

    pub fn can_write(self) -> bool {
        matches!(self, Capability::ReadWrite)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Capability::ReadWrite => "read_write",
            Capability::ReadOnly => "read_only",
            Capability::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

/// Source of the capability signal, consulted once per gateway call.
pub trait CapabilitySource: Send + Sync {
    fn current(&self) -> Capability;
}

/// Capability fixed for the lifetime of the gateway. The common case: the
/// deployment target is known at startup.
#[derive(Debug, Clone, Copy)]
pub struct FixedCapability(pub Capability);

impl CapabilitySource for FixedCapability {
    fn current(&self) -> Capability {
        self.0
    }
}

/// Capability that can be flipped at runtime, shared across handles.
#[derive(Debug, Clone)]
pub struct SharedCapability(Arc<Mutex<Capability>>);

impl SharedCapability {
    pub fn new(capability: Capability) -> Self {
        Self(Arc::new(Mutex::new(capability)))
    }

    pub fn set(&self, capability: Capability) {
        if let Ok(mut current) = self.0.lock() {
            *current = capability;
        }
    }
}

impl CapabilitySource for SharedCapability {
    fn current(&self) -> Capability {
        // A poisoned slot reads as no storage at all.
        self.0
            .lock()
            .map(|capability| *capability)
            .unwrap_or(Capability::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_read_write_matrix() {
        assert!(Capability::ReadWrite.can_read());
        assert!(Capability::ReadWrite.can_write());
        assert!(Capability::ReadOnly.can_read());
        assert!(!Capability::ReadOnly.can_write());
        assert!(!Capability::Unavailable.can_read());
        assert!(!Capability::Unavailable.can_write());
    }

    #[test]
    fn shared_capability_flips_for_all_handles() {
        let shared = SharedCapability::new(Capability::ReadWrite);
        let other = shared.clone();
        other.set(Capability::ReadOnly);
        assert_eq!(shared.current(), Capability::ReadOnly);
    }

    #[test]
    fn capability_serializes_snake_case() {
        let json = serde_json::to_string(&Capability::ReadWrite).expect("serialize capability");
        assert_eq!(json, "\"read_write\"");
        let parsed: Capability =
            serde_json::from_str("\"unavailable\"").expect("deserialize capability");
        assert_eq!(parsed, Capability::Unavailable);
    }
}
