use log::trace;

use crate::error::{MicrocodeError, Result};

/// Address-indexed image for one physical ROM chip
#[derive(Debug)]
pub(crate) struct Rom {
    id: String,
    data: Vec<u8>,
    written: Vec<bool>,
}

impl Rom {
    fn new(id: &str, address_bits: u32) -> Self {
        let len = 1usize << address_bits;
        Rom {
            id: id.to_string(),
            data: vec![0; len],
            written: vec![false; len],
        }
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn filename(&self, extension: &str) -> String {
        format!("microcode_{}.{}", self.id.to_lowercase(), extension)
    }

    /// Stores `value` at `address`. Rewriting an address is only accepted
    /// with the identical value.
    pub(crate) fn write(&mut self, address: usize, value: u8) -> Result<()> {
        if address >= self.data.len() {
            return Err(MicrocodeError::AddressOutOfRange {
                rom: self.id.clone(),
                address,
                len: self.data.len(),
            });
        }
        if self.written[address] && self.data[address] != value {
            return Err(MicrocodeError::AddressCollision {
                rom: self.id.clone(),
                address,
                existing: self.data[address],
                value,
            });
        }
        trace!("{}[{:#06x}] = {:#010b}", self.id, address, value);
        self.data[address] = value;
        self.written[address] = true;
        Ok(())
    }
}

/// The ROMs of one compile run, kept in declaration order
#[derive(Debug)]
pub(crate) struct RomSet {
    address_bits: u32,
    roms: Vec<Rom>,
}

impl RomSet {
    pub(crate) fn new(address_bits: u32) -> Self {
        RomSet {
            address_bits,
            roms: Vec::new(),
        }
    }

    /// Allocates a zero-filled ROM. Ids are compared case-insensitively since
    /// they end up in lower-cased filenames.
    pub(crate) fn create(&mut self, rom_id: &str) -> Result<&Rom> {
        if rom_id.is_empty() || rom_id.contains(['/', '\\']) || rom_id.contains("..") {
            return Err(MicrocodeError::InvalidRomId {
                rom: rom_id.to_string(),
            });
        }
        if self.roms.iter().any(|r| r.id.eq_ignore_ascii_case(rom_id)) {
            return Err(MicrocodeError::DuplicateRom {
                rom: rom_id.to_string(),
            });
        }
        self.roms.push(Rom::new(rom_id, self.address_bits));
        Ok(&self.roms[self.roms.len() - 1])
    }

    pub(crate) fn get(&self, rom_id: &str) -> Result<&Rom> {
        self.roms
            .iter()
            .find(|r| r.id == rom_id)
            .ok_or_else(|| MicrocodeError::UnknownRom {
                rom: rom_id.to_string(),
            })
    }

    pub(crate) fn write(&mut self, rom_id: &str, address: usize, value: u8) -> Result<()> {
        self.roms
            .iter_mut()
            .find(|r| r.id == rom_id)
            .ok_or_else(|| MicrocodeError::UnknownRom {
                rom: rom_id.to_string(),
            })?
            .write(address, value)
    }

    pub(crate) fn ids(&self) -> Vec<String> {
        self.roms.iter().map(|r| r.id.clone()).collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Rom> {
        self.roms.iter()
    }

    pub(crate) fn address_bits(&self) -> u32 {
        self.address_bits
    }
}
