//! Cell status bits as reported by the game service.
//!
//! Cells store flags verbatim; bits unknown to this registry are retained so
//! that a newer server can add states without breaking reconciliation.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u16 {
        /// The cell has been shot at.
        const DEAD = 0x01;
        /// The cell holds a ship segment.
        const SHIP = 0x02;
        /// Revealed as empty because a neighbouring ship sank.
        const SKIP = 0x08;
        /// A ship segment that has been hit.
        const DEAD_SHIP = Self::DEAD.bits() | Self::SHIP.bits();
    }
}

impl CellFlags {
    pub const NONE: CellFlags = CellFlags::empty();

    /// Build flags from raw server bits, keeping unknown bits.
    pub const fn from_raw(bits: u16) -> Self {
        CellFlags::from_bits_retain(bits)
    }

    /// `true` when nothing is known about the cell yet.
    pub fn is_unrevealed(self) -> bool {
        self.is_empty()
    }
}
