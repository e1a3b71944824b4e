//! Lane compress/expand capability table.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::{row, CapabilityTable, ElementKind};
use crate::requirement::TierRequirement;

/// The compress/expand table: vpcompress/vpexpand on 32/64-bit elements need
/// only the Foundation, the byte/word forms arrived with VBMI2.
pub fn table() -> &'static CapabilityTable<ElementKind> {
    static TABLE: OnceLock<CapabilityTable<ElementKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "compress-expand",
            vec![
                (
                    ElementKind::Int,
                    smallvec![
                        row(8, Some(TierRequirement::AVX512_VBMI2_VL)),
                        row(16, Some(TierRequirement::AVX512_VBMI2_VL)),
                        row(32, Some(TierRequirement::AVX512F_VL)),
                        row(64, Some(TierRequirement::AVX512F_VL)),
                    ],
                ),
                (
                    ElementKind::Float,
                    smallvec![
                        row(32, Some(TierRequirement::AVX512F_VL)),
                        row(64, Some(TierRequirement::AVX512F_VL)),
                    ],
                ),
            ],
        )
    })
}
