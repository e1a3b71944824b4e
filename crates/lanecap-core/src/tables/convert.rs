//! Conversion capability table, keyed by operator class and (from, to) pair.

use std::sync::OnceLock;

use smallvec::smallvec;

use super::{convert_row, ConvertCapabilityTable, ConvertRows};
use crate::ops::{ConvertClass, FloatConvertClass, IntConvertClass};
use crate::requirement::TierRequirement;

const BYTE: u32 = 8;
const WORD: u32 = 16;
const DWORD: u32 = 32;
const QWORD: u32 = 64;
const SINGLE: u32 = 32;
const DOUBLE: u32 = 64;

/// Table key: the conversion operator class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertKey {
    /// Zero-extending integer widen.
    ZeroExtend,
    /// Sign-extending integer widen.
    SignExtend,
    /// Truncating integer narrow.
    Narrow,
    /// Integer to floating-point.
    IntToFloat,
    /// Floating-point to integer.
    FloatToInt,
    /// Floating-point width change.
    FloatToFloat,
}

impl From<IntConvertClass> for ConvertKey {
    fn from(class: IntConvertClass) -> Self {
        match class {
            IntConvertClass::ZeroExtend => ConvertKey::ZeroExtend,
            IntConvertClass::SignExtend => ConvertKey::SignExtend,
            IntConvertClass::Narrow => ConvertKey::Narrow,
        }
    }
}

impl From<FloatConvertClass> for ConvertKey {
    fn from(class: FloatConvertClass) -> Self {
        match class {
            FloatConvertClass::IntToFloat => ConvertKey::IntToFloat,
            FloatConvertClass::FloatToInt => ConvertKey::FloatToInt,
            FloatConvertClass::FloatToFloat => ConvertKey::FloatToFloat,
        }
    }
}

impl From<ConvertClass> for ConvertKey {
    fn from(class: ConvertClass) -> Self {
        match class {
            ConvertClass::Int(c) => c.into(),
            ConvertClass::Float(c) => c.into(),
        }
    }
}

/// Widening moves share one row set: byte sources to word need BW at ZMM,
/// everything wider needs only F.
fn integer_extends() -> ConvertRows {
    smallvec![
        convert_row(BYTE, WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
        convert_row(BYTE, DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        convert_row(BYTE, QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        convert_row(WORD, DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        convert_row(WORD, QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
        convert_row(DWORD, QWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
    ]
}

/// The conversion table.
pub fn table() -> &'static ConvertCapabilityTable<ConvertKey> {
    static TABLE: OnceLock<ConvertCapabilityTable<ConvertKey>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ConvertCapabilityTable::new(
            "convert",
            vec![
                (ConvertKey::ZeroExtend, integer_extends()),
                (ConvertKey::SignExtend, integer_extends()),
                (
                    ConvertKey::Narrow,
                    smallvec![
                        convert_row(WORD, BYTE, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        convert_row(DWORD, BYTE, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        convert_row(DWORD, WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        convert_row(QWORD, BYTE, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        convert_row(QWORD, WORD, Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)),
                        convert_row(QWORD, DWORD, Some(TierRequirement::AVX1_AVX2_AVX512F_VL)),
                    ],
                ),
                (
                    ConvertKey::IntToFloat,
                    smallvec![
                        convert_row(DWORD, SINGLE, Some(TierRequirement::AVX1_AVX512F_VL)),
                        convert_row(QWORD, SINGLE, Some(TierRequirement::AVX512DQ_VL)),
                        convert_row(DWORD, DOUBLE, Some(TierRequirement::AVX1_AVX512F_VL)),
                        // QWORD to DOUBLE has no AVX/AVX2 instruction; the row
                        // is optimistic and the mantissa feasibility policy in
                        // the oracle corrects it for out-of-envelope inputs.
                        convert_row(QWORD, DOUBLE, Some(TierRequirement::AVX1_AVX2_AVX512DQ_VL)),
                    ],
                ),
                // These instructions truncate instead of following IR
                // semantics for NaN and overflow, so the oracle only admits
                // them for inputs proven free of both.
                (
                    ConvertKey::FloatToInt,
                    smallvec![
                        convert_row(SINGLE, DWORD, Some(TierRequirement::AVX1_AVX512F_VL)),
                        convert_row(SINGLE, QWORD, Some(TierRequirement::AVX512DQ_VL)),
                        convert_row(DOUBLE, DWORD, Some(TierRequirement::AVX1_AVX512F_VL)),
                        convert_row(DOUBLE, QWORD, Some(TierRequirement::AVX512DQ_VL)),
                    ],
                ),
                (
                    ConvertKey::FloatToFloat,
                    smallvec![
                        convert_row(SINGLE, DOUBLE, Some(TierRequirement::AVX1_AVX512F_VL)),
                        convert_row(DOUBLE, SINGLE, Some(TierRequirement::AVX1_AVX512F_VL)),
                    ],
                ),
            ],
        )
    })
}
