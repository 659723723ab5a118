//! Sequence configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hint::SizeHint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Let terminals adopt a caching step's buffer instead of copying element-wise.
    pub cache_handoff: bool,

    /// Upper limit (in elements) on capacity reserved from a size hint.
    pub max_prealloc: usize,

    /// Place small erased steps inline; false forces heap placement.
    pub inline_erasure: bool,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            cache_handoff: true,
            max_prealloc: 1 << 20,
            inline_erasure: true,
        }
    }
}

impl SeqConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_prealloc == 0 {
            return Err(Error::Config("max_prealloc must be > 0".into()));
        }
        Ok(())
    }

    pub fn reserve_policy(&self) -> ReservePolicy {
        ReservePolicy {
            max: self.max_prealloc,
        }
    }
}

/// Caps how much capacity a caching step reserves from its upstream hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservePolicy {
    pub max: usize,
}

impl Default for ReservePolicy {
    fn default() -> Self {
        SeqConfig::default().reserve_policy()
    }
}

impl ReservePolicy {
    pub fn capacity_for(self, hint: SizeHint) -> usize {
        hint.reserve_hint().min(self.max)
    }
}
