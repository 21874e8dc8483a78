//! Named Yes/No switches that gate every optional behavior.
//! This module exists so decisions can read toggles fresh each time without a typed config schema.
//! It does not own defaults beyond "missing means off".

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub mod keys {
    pub const DISARM_REEQUIP: &str = "DisarmReequip";
    pub const PULSE_REEQUIP: &str = "PulseReequip";
    pub const REEQUIP_SEARCH: &str = "ReequipSearch";
    pub const SAFE_GRENADES: &str = "SafeGrenades";
    pub const SAFE_MISSILES: &str = "SafeMissiles";
    pub const SAFE_QUILLS: &str = "SafeQuills";
    pub const FIRING_CONE: &str = "FiringCone";
    pub const FIRING_CONE_DEBUG: &str = "FiringConeDebug";
    pub const PASS_BY: &str = "PassBy";
    pub const META_MELEE: &str = "MetaMelee";
    pub const LOW_TONIC_PRIORITY: &str = "LowTonicPriority";

    pub const ALL: [&str; 11] = [
        DISARM_REEQUIP,
        PULSE_REEQUIP,
        REEQUIP_SEARCH,
        SAFE_GRENADES,
        SAFE_MISSILES,
        SAFE_QUILLS,
        FIRING_CONE,
        FIRING_CONE_DEBUG,
        PASS_BY,
        META_MELEE,
        LOW_TONIC_PRIORITY,
    ];
}

pub const YES: &str = "Yes";
pub const NO: &str = "No";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    switches: BTreeMap<String, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known switch set to `Yes`.
    pub fn all_enabled() -> Self {
        keys::ALL.iter().fold(Self::new(), |options, key| options.with(key, YES))
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.switches.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.switches.get(name).map(String::as_str)
    }

    /// Exactly `"Yes"` turns a switch on. Anything else, including a missing key, is off.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name) == Some(YES)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }
}
