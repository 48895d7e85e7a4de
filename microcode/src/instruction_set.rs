use std::collections::HashMap;

use log::{debug, info};

use crate::{
    config::ConfigDocument,
    ds::{ControlLine, MicroSequence, Opcode, ROM_WORD_BITS},
    error::{MicrocodeError, Result},
    registry::ControlLineRegistry,
    resolver::resolve_sequence,
    rom::RomSet,
};

/// Widest `(opcode, step)` address accepted, giving 16 MiB images
pub(crate) const MAX_ADDRESS_BITS: u32 = 24;

/// Validated instruction set together with the ROMs it compiles into
#[derive(Debug)]
pub(crate) struct InstructionSet {
    pub(crate) step_bits: u32,
    pub(crate) opcode_bits: u32,
    pub(crate) control_lines: ControlLineRegistry,
    pub(crate) roms: RomSet,
    pub(crate) load_sequence: MicroSequence,
    pub(crate) opcodes: Vec<Opcode>,
}

impl InstructionSet {
    pub(crate) fn from_document(doc: &ConfigDocument) -> Result<Self> {
        let address_bits = doc.step_bits.saturating_add(doc.opcode_bits);
        if address_bits > MAX_ADDRESS_BITS {
            return Err(MicrocodeError::FieldWidthExceeded {
                field: "address bits",
                context: "step_bits + opcode_bits".to_string(),
                value: address_bits as u64,
                limit: MAX_ADDRESS_BITS as u64,
            });
        }

        let mut roms = RomSet::new(address_bits);
        for rom_id in &doc.roms {
            roms.create(rom_id)?;
        }

        let mut control_lines = ControlLineRegistry::new();
        for (key, spec) in &doc.control_word {
            roms.get(&spec.rom)?;
            if spec.bit_position >= ROM_WORD_BITS as u32 {
                return Err(MicrocodeError::FieldWidthExceeded {
                    field: "bit_position",
                    context: format!("control line '{}'", key),
                    value: spec.bit_position as u64,
                    limit: ROM_WORD_BITS as u64 - 1,
                });
            }
            control_lines.register(ControlLine {
                name: spec.name.clone(),
                abbreviation: spec.abbreviation.clone(),
                rom: spec.rom.clone(),
                bit_position: spec.bit_position as u8,
            })?;
        }

        let step_count = 1u64 << doc.step_bits;
        let opcode_count = 1u64 << doc.opcode_bits;

        let load_sequence = resolve_sequence(&control_lines, &doc.load_command, "load command")?;
        if load_sequence.len() as u64 > step_count {
            return Err(MicrocodeError::FieldWidthExceeded {
                field: "step index",
                context: "load command".to_string(),
                value: load_sequence.len() as u64 - 1,
                limit: step_count - 1,
            });
        }

        let mut opcodes = Vec::with_capacity(doc.opcodes.len());
        let mut codes: HashMap<u32, String> = HashMap::new();
        let mut abbreviations: HashMap<&str, String> = HashMap::new();
        for (key, spec) in &doc.opcodes {
            if spec.opcode as u64 >= opcode_count {
                return Err(MicrocodeError::FieldWidthExceeded {
                    field: "opcode",
                    context: format!("opcode '{}'", key),
                    value: spec.opcode as u64,
                    limit: opcode_count - 1,
                });
            }
            if codes.insert(spec.opcode, key.clone()).is_some() {
                return Err(MicrocodeError::DuplicateOpcode {
                    name: key.clone(),
                    what: "code",
                    value: spec.opcode.to_string(),
                });
            }
            if abbreviations
                .insert(spec.abbreviation.as_str(), key.clone())
                .is_some()
            {
                return Err(MicrocodeError::DuplicateOpcode {
                    name: key.clone(),
                    what: "abbreviation",
                    value: spec.abbreviation.clone(),
                });
            }

            let owner = format!("opcode '{}'", key);
            let micro_sequence = resolve_sequence(&control_lines, &spec.t_steps, &owner)?;
            let used_steps = (load_sequence.len() + micro_sequence.len()) as u64;
            if used_steps > step_count {
                return Err(MicrocodeError::FieldWidthExceeded {
                    field: "step index",
                    context: owner,
                    value: used_steps - 1,
                    limit: step_count - 1,
                });
            }
            debug!(
                "Opcode {} ({:#x}): {} steps",
                spec.abbreviation,
                spec.opcode,
                micro_sequence.len()
            );
            opcodes.push(Opcode {
                name: spec.name.clone(),
                abbreviation: spec.abbreviation.clone(),
                code: spec.opcode,
                micro_sequence,
            });
        }

        info!(
            "Loaded {} control lines, {} opcodes, {} ROMs of {} bytes",
            control_lines.len(),
            opcodes.len(),
            doc.roms.len(),
            1u64 << address_bits
        );

        Ok(InstructionSet {
            step_bits: doc.step_bits,
            opcode_bits: doc.opcode_bits,
            control_lines,
            roms,
            load_sequence,
            opcodes,
        })
    }
}
