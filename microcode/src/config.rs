//! On-disk instruction set description.
//!
//! The document is plain TOML:
//!
//! ```toml
//! step_bits = 3
//! opcode_bits = 4
//! roms = ["A", "B"]
//! load_command = [["CO", "MI"], ["RO", "II", "CE"]]
//!
//! [control_word.memory_in]
//! name = "Memory address register in"
//! abbreviation = "MI"
//! rom = "A"
//! bit_position = 6
//!
//! [opcodes.load_a]
//! name = "Load A"
//! abbreviation = "LDA"
//! opcode = 1
//! t_steps = [["IO", "MI"], ["RO", "AI"]]
//! ```
//!
//! The older `abr`/`position` key spellings are accepted as aliases.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use crate::error::{MicrocodeError, Result};

/// Abbreviations of the control lines asserted in one step
pub(crate) type StepSpec = Vec<String>;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub(crate) struct ConfigDocument {
    pub(crate) step_bits: u32,
    pub(crate) opcode_bits: u32,
    pub(crate) roms: Vec<String>,
    pub(crate) control_word: BTreeMap<String, ControlLineSpec>,
    pub(crate) load_command: Vec<StepSpec>,
    pub(crate) opcodes: BTreeMap<String, OpcodeSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub(crate) struct ControlLineSpec {
    pub(crate) name: String,
    #[serde(alias = "abr")]
    pub(crate) abbreviation: String,
    pub(crate) rom: String,
    #[serde(alias = "position")]
    pub(crate) bit_position: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub(crate) struct OpcodeSpec {
    pub(crate) name: String,
    #[serde(alias = "abr")]
    pub(crate) abbreviation: String,
    pub(crate) opcode: u32,
    #[serde(default)]
    pub(crate) t_steps: Vec<StepSpec>,
}

impl ConfigDocument {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MicrocodeError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text, path)
    }

    #[cfg(test)]
    pub(crate) fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<string>"))
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e: toml::de::Error| MicrocodeError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
