//! The shared supply of building pieces.

use serde::{Deserialize, Serialize};

use crate::core::config::{PieceCounts, PieceKind};
use crate::core::error::{Error, Result};

/// Counts how many pieces of each kind have been placed, against fixed caps.
///
/// Invariant: `used[k] <= cap[k]` for every kind. The only mutation is
/// `consume`, which refuses to break the invariant.
///
/// ```
/// use not_santorini::board::Inventory;
/// use not_santorini::core::{PieceCounts, PieceKind};
///
/// let mut inventory = Inventory::new(PieceCounts::STANDARD);
/// inventory.consume(PieceKind::Level1).unwrap();
/// assert_eq!(inventory.remaining(PieceKind::Level1), 15);
/// assert_eq!(inventory.to_string(), "Remaining Tiles: Level 1-15 Level 2-14 Level 3-12 Dome-14");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InventoryRepr")]
pub struct Inventory {
    caps: PieceCounts,
    used: PieceCounts,
}

#[derive(Deserialize)]
struct InventoryRepr {
    caps: PieceCounts,
    used: PieceCounts,
}

impl TryFrom<InventoryRepr> for Inventory {
    type Error = Error;

    fn try_from(InventoryRepr { caps, used }: InventoryRepr) -> Result<Self> {
        if let Some(kind) = PieceKind::ALL.into_iter().find(|&k| used[k] > caps[k]) {
            return Err(Error::InvalidData {
                what: "inventory",
                detail: format!("{} of {} {kind} pieces used", used[kind], caps[kind]),
            });
        }
        Ok(Self { caps, used })
    }
}

impl Inventory {
    /// A full supply with the given caps.
    #[must_use]
    pub fn new(caps: PieceCounts) -> Self {
        Self {
            caps,
            used: PieceCounts::default(),
        }
    }

    /// Take one piece of `kind` from the supply.
    ///
    /// # Errors
    ///
    /// `InventoryExhausted` if none remain. Callers are expected to check
    /// `remaining(kind) > 0` first.
    pub fn consume(&mut self, kind: PieceKind) -> Result<()> {
        if self.remaining(kind) == 0 {
            return Err(Error::InventoryExhausted { kind });
        }
        self.used[kind] += 1;
        Ok(())
    }

    #[must_use]
    pub fn remaining(&self, kind: PieceKind) -> u8 {
        self.caps[kind] - self.used[kind]
    }

    #[must_use]
    pub fn used(&self, kind: PieceKind) -> u8 {
        self.used[kind]
    }

    #[must_use]
    pub fn cap(&self, kind: PieceKind) -> u8 {
        self.caps[kind]
    }

    /// Remaining counts for every kind, `[L1, L2, L3, Dome]`.
    #[must_use]
    pub fn remaining_counts(&self) -> PieceCounts {
        PieceCounts(PieceKind::ALL.map(|k| self.remaining(k)))
    }

    /// Used counts for every kind, `[L1, L2, L3, Dome]`.
    #[must_use]
    pub fn used_counts(&self) -> PieceCounts {
        self.used
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Remaining Tiles:")?;
        for (kind, remaining) in self.remaining_counts().iter() {
            write!(f, " {}-{}", kind, remaining)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_inventory_is_full() {
        let inv = Inventory::new(PieceCounts::STANDARD);
        assert_eq!(inv.remaining_counts(), PieceCounts::STANDARD);
        assert_eq!(inv.used_counts(), PieceCounts::default());
        assert_eq!(inv.cap(PieceKind::Level3), 12);
    }

    #[test]
    fn test_consume() {
        let mut inv = Inventory::new(PieceCounts::STANDARD);
        inv.consume(PieceKind::Dome).unwrap();
        inv.consume(PieceKind::Dome).unwrap();

        assert_eq!(inv.used(PieceKind::Dome), 2);
        assert_eq!(inv.remaining(PieceKind::Dome), 12);
        assert_eq!(inv.remaining(PieceKind::Level1), 16);
    }

    #[test]
    fn test_consume_exhausted() {
        let mut inv = Inventory::new(PieceCounts::new(1, 0, 0, 0));
        assert!(inv.consume(PieceKind::Level1).is_ok());
        assert_eq!(
            inv.consume(PieceKind::Level1),
            Err(Error::InventoryExhausted {
                kind: PieceKind::Level1
            })
        );
        assert_eq!(
            inv.consume(PieceKind::Dome),
            Err(Error::InventoryExhausted {
                kind: PieceKind::Dome
            })
        );
        assert_eq!(inv.used_counts(), PieceCounts::new(1, 0, 0, 0));
    }

    #[test]
    fn test_deserialize_checks_caps() {
        let mut inv = Inventory::new(PieceCounts::new(1, 1, 1, 1));
        inv.consume(PieceKind::Level1).unwrap();
        let json = serde_json::to_string(&inv).unwrap();
        assert_eq!(json, r#"{"caps":[1,1,1,1],"used":[1,0,0,0]}"#);
        assert_eq!(serde_json::from_str::<Inventory>(&json).unwrap(), inv);

        let over = r#"{"caps":[1,1,1,1],"used":[2,0,0,0]}"#;
        let err = serde_json::from_str::<Inventory>(over).unwrap_err();
        assert!(err.to_string().contains("2 of 1 Level 1 pieces used"), "{err}");
    }

    #[test]
    fn test_display() {
        let inv = Inventory::new(PieceCounts::STANDARD);
        assert_eq!(
            inv.to_string(),
            "Remaining Tiles: Level 1-16 Level 2-14 Level 3-12 Dome-14"
        );
    }
}
