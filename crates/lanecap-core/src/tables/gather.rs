//! Gather capability table.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::{row, CapabilityTable, ElementKind};
use crate::requirement::TierRequirement;

/// The gather table, used for both the gathered-element width and the
/// index/offset width; the oracle takes the narrower of the two resolutions.
/// Subword elements have no gather instruction.
pub fn table() -> &'static CapabilityTable<ElementKind> {
    static TABLE: OnceLock<CapabilityTable<ElementKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "gather",
            vec![
                (
                    ElementKind::Int,
                    smallvec![
                        row(8, None),
                        row(16, None),
                        row(32, Some(TierRequirement::AVX2_AVX512F_VL)),
                        row(64, Some(TierRequirement::AVX2_AVX512F_VL)),
                    ],
                ),
                (
                    ElementKind::Float,
                    smallvec![
                        row(32, Some(TierRequirement::AVX2_AVX512F_VL)),
                        row(64, Some(TierRequirement::AVX2_AVX512F_VL)),
                    ],
                ),
            ],
        )
    })
}
