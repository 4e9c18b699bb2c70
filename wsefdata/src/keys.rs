//! Identity types for overlays and records.
//!
//! A [`ModKey`] names one overlay in the load order (`Skyrim.esm`,
//! `WeaponSpeedMultFix.esp`). A [`FormKey`] names one record: a 24-bit local
//! id plus the overlay that originally defined it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid overlay name '{0}': expected <name>.esm, <name>.esp or <name>.esl")]
    InvalidModKey(String),
    #[error("Invalid form key '{0}': expected <hex id>:<overlay name>")]
    InvalidFormKey(String),
}

/// File type of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModType {
    Master,
    Plugin,
    Light,
}

impl ModType {
    pub fn extension(self) -> &'static str {
        match self {
            ModType::Master => "esm",
            ModType::Plugin => "esp",
            ModType::Light => "esl",
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("esm") {
            Some(ModType::Master)
        } else if ext.eq_ignore_ascii_case("esp") {
            Some(ModType::Plugin)
        } else if ext.eq_ignore_ascii_case("esl") {
            Some(ModType::Light)
        } else {
            None
        }
    }
}

/// Identity of an overlay.
///
/// Names compare case-insensitively, matching how the game resolves plugin
/// file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModKey {
    name: String,
    mod_type: ModType,
}

impl ModKey {
    pub fn new(name: impl Into<String>, mod_type: ModType) -> Self {
        Self {
            name: name.into(),
            mod_type,
        }
    }

    /// Parses `Name.ext` into a key.
    pub fn from_file_name(file_name: &str) -> Result<Self, KeyError> {
        let trimmed = file_name.trim();
        let (name, ext) = trimmed
            .rsplit_once('.')
            .ok_or_else(|| KeyError::InvalidModKey(file_name.to_string()))?;
        let mod_type = ModType::from_extension(ext)
            .ok_or_else(|| KeyError::InvalidModKey(file_name.to_string()))?;
        if name.is_empty() {
            return Err(KeyError::InvalidModKey(file_name.to_string()));
        }
        Ok(Self::new(name, mod_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mod_type(&self) -> ModType {
        self.mod_type
    }

    /// `Name.ext`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.mod_type.extension())
    }
}

impl PartialEq for ModKey {
    fn eq(&self, other: &Self) -> bool {
        self.mod_type == other.mod_type && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for ModKey {}

impl Hash for ModKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.name.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        self.mod_type.hash(state);
    }
}

impl fmt::Display for ModKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.mod_type.extension())
    }
}

impl FromStr for ModKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_file_name(s)
    }
}

impl TryFrom<String> for ModKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_file_name(&value)
    }
}

impl From<ModKey> for String {
    fn from(key: ModKey) -> Self {
        key.file_name()
    }
}

/// Largest local id a record can carry (24 bits).
pub const MAX_LOCAL_ID: u32 = 0x00FF_FFFF;

/// Global identity of a record: local id plus the overlay that defined it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormKey {
    pub id: u32,
    pub mod_key: ModKey,
}

impl FormKey {
    pub fn new(id: u32, mod_key: ModKey) -> Self {
        Self { id, mod_key }
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.id, self.mod_key)
    }
}

impl FromStr for FormKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeyError::InvalidFormKey(s.to_string());
        let (id, name) = s.trim().split_once(':').ok_or_else(invalid)?;
        let id = u32::from_str_radix(id.trim_start_matches("0x"), 16).map_err(|_| invalid())?;
        if id > MAX_LOCAL_ID {
            return Err(invalid());
        }
        let mod_key = ModKey::from_file_name(name).map_err(|_| invalid())?;
        Ok(Self { id, mod_key })
    }
}

impl TryFrom<String> for FormKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormKey> for String {
    fn from(key: FormKey) -> Self {
        key.to_string()
    }
}
