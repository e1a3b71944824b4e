//! Cross-lane permute capability table.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::{row, CapabilityTable, ElementKind};
use crate::requirement::TierRequirement;

/// The permute table. Every width shares one predicate: AVX at XMM, AVX2 at
/// YMM, and at ZMM the Foundation plus VBMI (preferred) or BW (workaround
/// sequence).
pub fn table() -> &'static CapabilityTable<ElementKind> {
    static TABLE: OnceLock<CapabilityTable<ElementKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "permute",
            vec![
                (
                    ElementKind::Int,
                    smallvec![
                        row(8, Some(TierRequirement::PERMUTE)),
                        row(16, Some(TierRequirement::PERMUTE)),
                        row(32, Some(TierRequirement::PERMUTE)),
                        row(64, Some(TierRequirement::PERMUTE)),
                    ],
                ),
                (
                    ElementKind::Float,
                    smallvec![
                        row(32, Some(TierRequirement::PERMUTE)),
                        row(64, Some(TierRequirement::PERMUTE)),
                    ],
                ),
            ],
        )
    })
}
