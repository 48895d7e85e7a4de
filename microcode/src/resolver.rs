use crate::{
    ds::{MicroSequence, TStep},
    error::Result,
    registry::ControlLineRegistry,
};

/// Turns a step's abbreviations into control lines. `context` describes the
/// step (e.g. "opcode 'LDA' step 2") for error reports.
pub(crate) fn resolve_step(
    registry: &ControlLineRegistry,
    abbreviations: &[String],
    context: &str,
) -> Result<TStep> {
    let lines = abbreviations
        .iter()
        .map(|abbreviation| registry.resolve(abbreviation, context).cloned())
        .collect::<Result<Vec<_>>>()?;
    Ok(TStep { lines })
}

pub(crate) fn resolve_sequence(
    registry: &ControlLineRegistry,
    steps: &[Vec<String>],
    owner: &str,
) -> Result<MicroSequence> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| resolve_step(registry, step, &format!("{} step {}", owner, i)))
        .collect()
}

/// Output byte of `rom_id` while `step` is active. Lines wired to other ROMs
/// are ignored and unlisted bits stay inactive (0).
pub(crate) fn pack(step: &TStep, rom_id: &str) -> u8 {
    step.lines
        .iter()
        .filter(|line| line.rom == rom_id)
        .fold(0u8, |byte, line| byte | line.mask())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::ControlLine;

    fn registry() -> ControlLineRegistry {
        let mut registry = ControlLineRegistry::new();
        for (abbreviation, rom, bit_position) in [("A", "rom1", 2), ("B", "rom1", 5), ("C", "rom2", 0)]
        {
            registry
                .register(ControlLine {
                    name: abbreviation.to_lowercase(),
                    abbreviation: abbreviation.to_string(),
                    rom: rom.to_string(),
                    bit_position,
                })
                .unwrap();
        }
        registry
    }

    fn step(abbreviations: &[&str]) -> Vec<String> {
        abbreviations.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pack_sets_listed_bits() {
        let registry = registry();
        let t_step = resolve_step(&registry, &step(&["A", "B"]), "test").unwrap();
        assert_eq!(pack(&t_step, "rom1"), 0b0010_0100);
    }

    #[test]
    fn test_pack_other_rom_is_zero() {
        let registry = registry();
        let t_step = resolve_step(&registry, &step(&["A", "B"]), "test").unwrap();
        assert_eq!(pack(&t_step, "rom2"), 0x00);
    }

    #[test]
    fn test_pack_empty_step() {
        let registry = registry();
        let t_step = resolve_step(&registry, &[], "test").unwrap();
        assert_eq!(pack(&t_step, "rom1"), 0x00);
        assert_eq!(pack(&t_step, "rom2"), 0x00);
    }

    #[test]
    fn test_pack_ignores_order_and_repeats() {
        let registry = registry();
        let forward = resolve_step(&registry, &step(&["A", "C", "B"]), "test").unwrap();
        let backward = resolve_step(&registry, &step(&["B", "A", "C", "A"]), "test").unwrap();
        assert_eq!(pack(&forward, "rom1"), pack(&backward, "rom1"));
        assert_eq!(pack(&backward, "rom2"), 0x01);
    }

    #[test]
    fn test_resolve_sequence_keeps_order() {
        let registry = registry();
        let sequence =
            resolve_sequence(&registry, &[step(&["C"]), step(&[]), step(&["A"])], "load").unwrap();
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence[0].lines[0].abbreviation, "C");
        assert!(sequence[1].lines.is_empty());
        assert_eq!(sequence[2].lines[0].abbreviation, "A");
    }

    #[test]
    fn test_error_unknown_line_reports_step() {
        let registry = registry();
        let err = resolve_sequence(&registry, &[step(&["A"]), step(&["Q"])], "opcode 'NOP'")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Undefined control line 'Q' in opcode 'NOP' step 1"
        );
    }
}
