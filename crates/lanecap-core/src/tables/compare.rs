//! Comparison capability table, keyed by element category and condition.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::arithmetic::{regular_int_arithmetic, regular_float_arithmetic};
use super::{row, CapabilityTable, ElementKind};
use crate::ops::CompareCondition;
use crate::requirement::TierRequirement;

/// Table key: element category plus canonical condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompareKey {
    /// Element category.
    pub kind: ElementKind,
    /// Canonical condition.
    pub condition: CompareCondition,
}

/// The comparison table. Unsigned-below rows exist only under EVEX; on
/// AVX/AVX2-only machines the oracle simulates them via a signed compare.
pub fn table() -> &'static CapabilityTable<CompareKey> {
    static TABLE: OnceLock<CapabilityTable<CompareKey>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "compare",
            vec![
                (
                    CompareKey {
                        kind: ElementKind::Int,
                        condition: CompareCondition::Eq,
                    },
                    regular_int_arithmetic(),
                ),
                (
                    CompareKey {
                        kind: ElementKind::Int,
                        condition: CompareCondition::Lt,
                    },
                    regular_int_arithmetic(),
                ),
                (
                    CompareKey {
                        kind: ElementKind::Int,
                        condition: CompareCondition::BelowThan,
                    },
                    smallvec![
                        row(8, Some(TierRequirement::AVX512BW_VL)),
                        row(16, Some(TierRequirement::AVX512BW_VL)),
                        row(32, Some(TierRequirement::AVX512F_VL)),
                        row(64, Some(TierRequirement::AVX512F_VL)),
                    ],
                ),
                (
                    CompareKey {
                        kind: ElementKind::Float,
                        condition: CompareCondition::Eq,
                    },
                    regular_float_arithmetic(),
                ),
                (
                    CompareKey {
                        kind: ElementKind::Float,
                        condition: CompareCondition::Lt,
                    },
                    regular_float_arithmetic(),
                ),
            ],
        )
    })
}
