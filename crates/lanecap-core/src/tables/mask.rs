//! Opmask-register logic capability table.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::{row, CapabilityTable, Rows};
use crate::ops::MaskOp;
use crate::requirement::TierRequirement;

/// Mask-register instruction demand by mask width: the 8-bit k-ops (kandb,
/// korb, ...) arrived with DQ, the 16-bit ones with the Foundation, the 32
/// and 64-bit ones with BW.
fn mask_rows() -> Rows {
    smallvec![
        row(8, Some(TierRequirement::AVX512DQ_VL)),
        row(16, Some(TierRequirement::AVX512F_VL)),
        row(32, Some(TierRequirement::AVX512BW_VL)),
        row(64, Some(TierRequirement::AVX512BW_VL)),
    ]
}

/// The opmask logic table, keyed by mask operator and mask width in bits.
pub fn table() -> &'static CapabilityTable<MaskOp> {
    static TABLE: OnceLock<CapabilityTable<MaskOp>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "logic-mask",
            vec![
                (MaskOp::Not, mask_rows()),
                (MaskOp::And, mask_rows()),
                (MaskOp::Or, mask_rows()),
                (MaskOp::Xor, mask_rows()),
                (MaskOp::Reinterpret, mask_rows()),
            ],
        )
    })
}
