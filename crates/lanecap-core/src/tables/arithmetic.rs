//! Arithmetic capability table, including the scalar-shift-count variant.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::{row, CapabilityTable, Rows};
use crate::ops::{ArithOp, FloatOp, IntOp, MaskOp};
use crate::requirement::TierRequirement;

const BYTE: u32 = 8;
const WORD: u32 = 16;
const DWORD: u32 = 32;
const QWORD: u32 = 64;
const SINGLE: u32 = 32;
const DOUBLE: u32 = 64;

/// Add/sub/neg-style integer rows: subword needs BW at ZMM.
pub(crate) fn regular_int_arithmetic() -> Rows {
    smallvec![
        row(BYTE, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        row(QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
    ]
}

fn regular_int_bitwise() -> Rows {
    smallvec![
        row(BYTE, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        row(QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
    ]
}

fn regular_int_minmax() -> Rows {
    smallvec![
        row(BYTE, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        row(QWORD, Some(TierRequirement::AVX512F_VL)),
    ]
}

/// Float add/sub/mul/div/sqrt rows.
pub(crate) fn regular_float_arithmetic() -> Rows {
    smallvec![
        row(SINGLE, Some(TierRequirement::AVX1_AVX512F_VL)),
        row(DOUBLE, Some(TierRequirement::AVX1_AVX512F_VL)),
    ]
}

fn regular_float_bitwise_minmax() -> Rows {
    smallvec![
        row(SINGLE, Some(TierRequirement::AVX1_AVX512DQ_VL)),
        row(DOUBLE, Some(TierRequirement::AVX1_AVX512DQ_VL)),
    ]
}

fn no_int_rows() -> Rows {
    smallvec![
        row(BYTE, None),
        row(WORD, None),
        row(DWORD, None),
        row(QWORD, None),
    ]
}

fn regular_mask() -> Rows {
    smallvec![
        row(BYTE, Some(TierRequirement::AVX512DQ_VL)),
        row(WORD, Some(TierRequirement::AVX512F_VL)),
        row(DWORD, Some(TierRequirement::AVX512BW_VL)),
        row(QWORD, Some(TierRequirement::AVX512BW_VL)),
    ]
}

/// The arithmetic table: per-lane operations, including the general shifts of
/// two vectors (vpsllvd and friends). Shifts by one shared scalar count are a
/// separate table below.
pub fn table() -> &'static CapabilityTable<ArithOp> {
    static TABLE: OnceLock<CapabilityTable<ArithOp>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "arithmetic",
            vec![
                // Neg(x) is lowered to 0 - x, so it matches the Sub rows.
                (ArithOp::Int(IntOp::Neg), regular_int_arithmetic()),
                (ArithOp::Int(IntOp::Add), regular_int_arithmetic()),
                (ArithOp::Int(IntOp::Sub), regular_int_arithmetic()),
                (
                    ArithOp::Int(IntOp::Mul),
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                        row(QWORD, Some(TierRequirement::AVX512DQ_VL)),
                    ],
                ),
                (
                    ArithOp::Int(IntOp::MulHigh),
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        row(DWORD, None),
                        row(QWORD, None),
                    ],
                ),
                (
                    ArithOp::Int(IntOp::UMulHigh),
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        row(DWORD, None),
                        row(QWORD, None),
                    ],
                ),
                (ArithOp::Int(IntOp::Div), no_int_rows()),
                (ArithOp::Int(IntOp::Rem), no_int_rows()),
                (ArithOp::Int(IntOp::Not), regular_int_bitwise()),
                (ArithOp::Int(IntOp::And), regular_int_bitwise()),
                (ArithOp::Int(IntOp::Or), regular_int_bitwise()),
                (ArithOp::Int(IntOp::Xor), regular_int_bitwise()),
                (
                    ArithOp::Int(IntOp::Shl),
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX2_AVX512F_VL)),
                        row(QWORD, Some(TierRequirement::AVX2_AVX512F_VL)),
                    ],
                ),
                (
                    ArithOp::Int(IntOp::Shr),
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX2_AVX512F_VL)),
                        // vpsravq exists only under EVEX.
                        row(QWORD, Some(TierRequirement::AVX512F_VL)),
                    ],
                ),
                (
                    ArithOp::Int(IntOp::UShr),
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX2_AVX512F_VL)),
                        row(QWORD, Some(TierRequirement::AVX2_AVX512F_VL)),
                    ],
                ),
                (ArithOp::Int(IntOp::Abs), regular_int_minmax()),
                (ArithOp::Int(IntOp::Max), regular_int_minmax()),
                (ArithOp::Int(IntOp::Min), regular_int_minmax()),
                (ArithOp::Int(IntOp::UMax), regular_int_minmax()),
                (ArithOp::Int(IntOp::UMin), regular_int_minmax()),
                // Per-lane bit compress/expand never vectorizes; lane
                // compress/expand is its own category.
                (ArithOp::Int(IntOp::Compress), no_int_rows()),
                (ArithOp::Int(IntOp::Expand), no_int_rows()),
                (ArithOp::Float(FloatOp::Neg), regular_float_bitwise_minmax()),
                (ArithOp::Float(FloatOp::Add), regular_float_arithmetic()),
                (ArithOp::Float(FloatOp::Sub), regular_float_arithmetic()),
                (ArithOp::Float(FloatOp::Mul), regular_float_arithmetic()),
                (ArithOp::Float(FloatOp::Div), regular_float_arithmetic()),
                (
                    ArithOp::Float(FloatOp::Rem),
                    smallvec![row(SINGLE, None), row(DOUBLE, None)],
                ),
                (ArithOp::Float(FloatOp::Not), regular_float_arithmetic()),
                (ArithOp::Float(FloatOp::And), regular_float_bitwise_minmax()),
                (ArithOp::Float(FloatOp::Or), regular_float_bitwise_minmax()),
                (ArithOp::Float(FloatOp::Xor), regular_float_bitwise_minmax()),
                (ArithOp::Float(FloatOp::Abs), regular_float_bitwise_minmax()),
                (ArithOp::Float(FloatOp::Sqrt), regular_float_arithmetic()),
                (ArithOp::Float(FloatOp::Max), regular_float_bitwise_minmax()),
                (ArithOp::Float(FloatOp::Min), regular_float_bitwise_minmax()),
                (
                    ArithOp::Float(FloatOp::Fma),
                    smallvec![
                        row(SINGLE, Some(TierRequirement::FMA)),
                        row(DOUBLE, Some(TierRequirement::FMA)),
                    ],
                ),
                (ArithOp::Mask(MaskOp::Not), regular_mask()),
                (ArithOp::Mask(MaskOp::And), regular_mask()),
                (ArithOp::Mask(MaskOp::Or), regular_mask()),
                (ArithOp::Mask(MaskOp::Xor), regular_mask()),
                (ArithOp::Mask(MaskOp::Reinterpret), regular_mask()),
            ],
        )
    })
}

/// Shifts where every lane shifts by one shared scalar count. The feature
/// demand differs from the two-vector shifts, and the arithmetic right shift
/// differs again at QWORD (vpsraq is EVEX-only).
pub fn scalar_shift_table() -> &'static CapabilityTable<IntOp> {
    static TABLE: OnceLock<CapabilityTable<IntOp>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CapabilityTable::new(
            "scalar-shift",
            vec![
                (
                    IntOp::Shl,
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                        row(QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                    ],
                ),
                (
                    IntOp::Shr,
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                        row(QWORD, Some(TierRequirement::AVX512F_VL)),
                    ],
                ),
                (
                    IntOp::UShr,
                    smallvec![
                        row(BYTE, None),
                        row(WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        row(DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                        row(QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                    ],
                ),
            ],
        )
    })
}
