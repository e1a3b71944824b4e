//! Blend/select capability table.

use std::sync::OnceLock;

use super::arithmetic::{regular_float_arithmetic, regular_int_arithmetic};
use super::{CapabilityTable, ElementKind};

/// The blend table: mask-driven selects price like the regular arithmetic of
/// their element category. ZMM blends additionally go through the blend
/// legalization policy in the oracle.
pub fn table() -> &'static CapabilityTable<ElementKind> {
    static TABLE: OnceLock<CapabilityTable<ElementKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "blend",
            vec![
                (ElementKind::Int, regular_int_arithmetic()),
                (ElementKind::Float, regular_float_arithmetic()),
            ],
        )
    })
}
