/// Number of control bits driven by one ROM output byte
pub(crate) const ROM_WORD_BITS: u8 = 8;

/// A single hardware signal wired to one bit of one ROM's output byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ControlLine {
    pub(crate) name: String,
    pub(crate) abbreviation: String,
    pub(crate) rom: String,
    pub(crate) bit_position: u8,
}

impl ControlLine {
    /// Single-bit mask of this line within its ROM byte
    pub(crate) fn mask(&self) -> u8 {
        1 << self.bit_position
    }
}

/// Control lines asserted together during one clock step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TStep {
    pub(crate) lines: Vec<ControlLine>,
}

/// Ordered T-steps; its index within the sequence drives the step address
pub(crate) type MicroSequence = Vec<TStep>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Opcode {
    pub(crate) name: String,
    pub(crate) abbreviation: String,
    pub(crate) code: u32,
    pub(crate) micro_sequence: MicroSequence,
}
