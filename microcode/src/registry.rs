use std::collections::HashMap;

use log::debug;

use crate::{
    ds::ControlLine,
    error::{MicrocodeError, Result},
};

/// Lookup of control lines by abbreviation, guarding the `(rom, bit)` wiring
#[derive(Debug, Default)]
pub(crate) struct ControlLineRegistry {
    lines: HashMap<String, ControlLine>,
    wiring: HashMap<(String, u8), String>,
}

impl ControlLineRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, line: ControlLine) -> Result<()> {
        if self.lines.contains_key(&line.abbreviation) {
            return Err(MicrocodeError::DuplicateAbbreviation {
                abbreviation: line.abbreviation,
            });
        }
        let slot = (line.rom.clone(), line.bit_position);
        if let Some(existing) = self.wiring.get(&slot) {
            return Err(MicrocodeError::BitPositionConflict {
                abbreviation: line.abbreviation,
                existing: existing.clone(),
                rom: line.rom,
                bit_position: line.bit_position,
            });
        }
        debug!(
            "Control line {} ({}) -> {}:{}",
            line.abbreviation, line.name, line.rom, line.bit_position
        );
        self.wiring.insert(slot, line.abbreviation.clone());
        self.lines.insert(line.abbreviation.clone(), line);
        Ok(())
    }

    /// Looks up a line; `context` names the step being resolved for error reports
    pub(crate) fn resolve(&self, abbreviation: &str, context: &str) -> Result<&ControlLine> {
        self.lines
            .get(abbreviation)
            .ok_or_else(|| MicrocodeError::UnknownControlLine {
                abbreviation: abbreviation.to_string(),
                context: context.to_string(),
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}
