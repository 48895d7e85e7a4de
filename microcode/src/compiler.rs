use log::{debug, info};

use crate::{
    ds::TStep,
    error::Result,
    instruction_set::InstructionSet,
    resolver::pack,
    rom::RomSet,
};

/// Lays every step of the instruction set out over the `(opcode, step)`
/// address space of each ROM.
///
/// Addresses are `(opcode << step_bits) | step`. The load command occupies
/// steps `0..load_len` under every opcode value, declared or not; each
/// declared opcode continues from `load_len`. Everything else stays zero.
pub(crate) fn compile(set: &mut InstructionSet) -> Result<()> {
    let rom_ids = set.roms.ids();
    let load_len = set.load_sequence.len();

    for opcode in 0..(1usize << set.opcode_bits) {
        let base = opcode << set.step_bits;
        for (i, step) in set.load_sequence.iter().enumerate() {
            write_step(&mut set.roms, &rom_ids, base | i, step)?;
        }
    }

    for opcode in &set.opcodes {
        debug!(
            "Writing {} '{}' at {:#x}",
            opcode.abbreviation, opcode.name, opcode.code
        );
        let base = (opcode.code as usize) << set.step_bits;
        for (i, step) in opcode.micro_sequence.iter().enumerate() {
            write_step(&mut set.roms, &rom_ids, base | (load_len + i), step)?;
        }
    }

    info!(
        "Compiled {} opcodes using {} control lines into {} ROMs over {} address bits",
        set.opcodes.len(),
        set.control_lines.len(),
        rom_ids.len(),
        set.roms.address_bits()
    );
    Ok(())
}

fn write_step(roms: &mut RomSet, rom_ids: &[String], address: usize, step: &TStep) -> Result<()> {
    for rom_id in rom_ids {
        roms.write(rom_id, address, pack(step, rom_id))?;
    }
    Ok(())
}
