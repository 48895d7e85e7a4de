use std::path::PathBuf;

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, MicrocodeError>;

#[derive(Debug, Error)]
pub(crate) enum MicrocodeError {
    #[error("Failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Control line abbreviation '{abbreviation}' defined more than once")]
    DuplicateAbbreviation { abbreviation: String },

    #[error("Control line '{abbreviation}' uses bit {bit_position} of ROM '{rom}', already taken by '{existing}'")]
    BitPositionConflict {
        abbreviation: String,
        existing: String,
        rom: String,
        bit_position: u8,
    },

    #[error("Undefined control line '{abbreviation}' in {context}")]
    UnknownControlLine {
        abbreviation: String,
        context: String,
    },

    #[error("Undefined ROM '{rom}'")]
    UnknownRom { rom: String },

    #[error("ROM id '{rom}' cannot be used as an image filename")]
    InvalidRomId { rom: String },

    #[error("ROM '{rom}' defined more than once")]
    DuplicateRom { rom: String },

    #[error("Opcode '{name}' reuses {what} '{value}'")]
    DuplicateOpcode {
        name: String,
        what: &'static str,
        value: String,
    },

    #[error("Value {value} of {field} in {context} exceeds its limit of {limit}")]
    FieldWidthExceeded {
        field: &'static str,
        context: String,
        value: u64,
        limit: u64,
    },

    #[error("Address {address:#x} out of range for ROM '{rom}' of {len} bytes")]
    AddressOutOfRange {
        rom: String,
        address: usize,
        len: usize,
    },

    #[error("Address {address:#x} of ROM '{rom}' already holds {existing:#04x}, refusing {value:#04x}")]
    AddressCollision {
        rom: String,
        address: usize,
        existing: u8,
        value: u8,
    },

    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MicrocodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MicrocodeError::Io {
            path: path.into(),
            source,
        }
    }
}
