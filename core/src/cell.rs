use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// What a cell holds. Fixed when the board is generated.
///
/// Non-mine kinds carry their adjacent mine count. Special cells are only ever placed on zero cells,
/// but the count is kept on them too so every safe cell reports it uniformly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Normal(u8),
    Mine,
    Surprise(u8),
    Question(u8),
}

impl CellKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_special(self) -> bool {
        matches!(self, Self::Surprise(_) | Self::Question(_))
    }

    /// Adjacent mine count, `-1` for mines.
    pub const fn neighbor_mines(self) -> i8 {
        match self {
            Self::Mine => -1,
            Self::Normal(count) | Self::Surprise(count) | Self::Question(count) => count as i8,
        }
    }

    pub const fn special_kind(self) -> Option<SpecialKind> {
        match self {
            Self::Surprise(_) => Some(SpecialKind::Surprise),
            Self::Question(_) => Some(SpecialKind::Question),
            Self::Normal(_) | Self::Mine => None,
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Normal(0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKind {
    Surprise,
    Question,
}

bitflags! {
    /// Mutable per-cell state.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CellFlags: u8 {
        const OPEN = 1 << 0;
        const FLAGGED = 1 << 1;
        /// Special cell was opened but its effect has not been used yet.
        const DISCOVERED = 1 << 2;
        const ACTIVATED = 1 << 3;
        /// The one-time flag placement award was already granted.
        const FLAG_SCORED = 1 << 4;
    }
}

impl Default for CellFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    flags: CellFlags,
}

impl Cell {
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            flags: CellFlags::empty(),
        }
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    pub const fn is_mine(&self) -> bool {
        self.kind.is_mine()
    }

    pub const fn neighbor_mines(&self) -> i8 {
        self.kind.neighbor_mines()
    }

    pub const fn is_open(&self) -> bool {
        self.flags.contains(CellFlags::OPEN)
    }

    pub const fn is_flagged(&self) -> bool {
        self.flags.contains(CellFlags::FLAGGED)
    }

    pub const fn is_closed(&self) -> bool {
        !self.is_open()
    }

    pub const fn is_discovered(&self) -> bool {
        self.flags.contains(CellFlags::DISCOVERED)
    }

    pub const fn is_activated(&self) -> bool {
        self.flags.contains(CellFlags::ACTIVATED)
    }

    pub const fn is_flag_scored(&self) -> bool {
        self.flags.contains(CellFlags::FLAG_SCORED)
    }

    /// Whether the cell can be opened by a click or a cascade.
    pub const fn can_open(&self) -> bool {
        !self.is_open() && !self.is_flagged()
    }

    /// Whether opening this cell spreads to its neighbours.
    pub const fn cascades(&self) -> bool {
        match self.kind {
            CellKind::Mine => false,
            CellKind::Normal(count) => count == 0,
            CellKind::Surprise(_) | CellKind::Question(_) => true,
        }
    }

    /// Opens the cell, discovering it when special. Returns `false` if nothing changed.
    pub(crate) fn open(&mut self) -> bool {
        if !self.can_open() {
            return false;
        }
        self.flags.insert(CellFlags::OPEN);
        if self.kind.is_special() {
            self.flags.insert(CellFlags::DISCOVERED);
        }
        true
    }

    /// Opens the cell regardless of flags, which stay in place so a finished board still shows them.
    /// Returns `false` if it was already open.
    pub(crate) fn force_open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.flags.insert(CellFlags::OPEN);
        if self.kind.is_special() {
            self.flags.insert(CellFlags::DISCOVERED);
        }
        true
    }

    /// Flags the cell and latches its flag award without going through a toggle.
    pub(crate) fn gift_flag(&mut self) -> bool {
        if self.is_open() || self.is_flagged() {
            return false;
        }
        self.flags.insert(CellFlags::FLAGGED | CellFlags::FLAG_SCORED);
        true
    }

    /// Toggles the flag on a closed cell.
    ///
    /// Returns `None` when the cell is open, otherwise whether the cell is flagged now and whether this was its
    /// first ever flag placement.
    pub(crate) fn toggle_flag(&mut self) -> Option<(bool, bool)> {
        if self.is_open() {
            return None;
        }
        if self.is_flagged() {
            self.flags.remove(CellFlags::FLAGGED);
            return Some((false, false));
        }
        let first = !self.is_flag_scored();
        self.flags.insert(CellFlags::FLAGGED | CellFlags::FLAG_SCORED);
        Some((true, first))
    }

    /// Marks a special cell as used. Only valid once it is discovered.
    pub(crate) fn activate(&mut self) -> bool {
        if !self.is_discovered() || self.is_activated() {
            return false;
        }
        self.flags.insert(CellFlags::ACTIVATED);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mines_report_sentinel_count() {
        assert_eq!(Cell::new(CellKind::Mine).neighbor_mines(), -1);
        assert_eq!(Cell::new(CellKind::Normal(3)).neighbor_mines(), 3);
    }

    #[test]
    fn opening_special_discovers_without_activating() {
        let mut cell = Cell::new(CellKind::Surprise(0));

        assert!(cell.open());

        assert!(cell.is_discovered());
        assert!(!cell.is_activated());
        assert!(!cell.open());
    }

    #[test]
    fn flag_score_latches_on_first_placement() {
        let mut cell = Cell::new(CellKind::Normal(1));

        assert_eq!(cell.toggle_flag(), Some((true, true)));
        assert_eq!(cell.toggle_flag(), Some((false, false)));
        assert_eq!(cell.toggle_flag(), Some((true, false)));
        assert!(cell.is_flag_scored());
    }

    #[test]
    fn open_cells_cannot_be_flagged() {
        let mut cell = Cell::new(CellKind::Normal(0));
        cell.open();

        assert_eq!(cell.toggle_flag(), None);
        assert!(!cell.is_flagged());
    }

    #[test]
    fn flagged_cells_do_not_open() {
        let mut cell = Cell::new(CellKind::Normal(0));
        cell.toggle_flag();

        assert!(!cell.open());
        assert!(cell.is_closed());
    }

    #[test]
    fn force_open_keeps_the_flag() {
        let mut cell = Cell::new(CellKind::Mine);
        cell.toggle_flag();

        assert!(cell.force_open());

        assert!(cell.is_open());
        assert!(cell.is_flagged());
        assert_eq!(cell.toggle_flag(), None);
        assert!(!cell.force_open());
    }

    #[test]
    fn activation_requires_discovery_and_happens_once() {
        let mut cell = Cell::new(CellKind::Question(0));
        assert!(!cell.activate());

        cell.open();
        assert!(cell.activate());
        assert!(!cell.activate());
    }
}
