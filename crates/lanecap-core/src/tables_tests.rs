//! Tests for the `tables` modules: construction validation and row contents.

use crate::ops::{ArithOp, CompareCondition, IntOp, MaskOp};
use crate::requirement::TierRequirement;
use crate::tables::compare::CompareKey;
use crate::tables::convert::ConvertKey;
use crate::tables::{arithmetic, blend, compare, compress, convert, gather, mask, permute};
use crate::tables::{CapabilityTable, ElementKind};

#[test]
fn every_table_builds_and_validates() {
    // Construction itself runs the duplicate-key and power-of-two asserts.
    let _ = arithmetic::table();
    let _ = arithmetic::scalar_shift_table();
    let _ = convert::table();
    let _ = compare::table();
    let _ = blend::table();
    let _ = gather::table();
    let _ = permute::table();
    let _ = compress::table();
    let _ = mask::table();
}

#[test]
fn arithmetic_rows_match_the_instruction_families() {
    let table = arithmetic::table();
    assert_eq!(
        table.requirement(&ArithOp::Int(IntOp::Add), 8),
        Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)
    );
    assert_eq!(
        table.requirement(&ArithOp::Int(IntOp::Add), 64),
        Some(TierRequirement::AVX1_AVX2_AVX512F_VL)
    );
    // Explicit "no instruction" rows.
    assert_eq!(table.requirement(&ArithOp::Int(IntOp::Mul), 8), None);
    assert_eq!(table.requirement(&ArithOp::Int(IntOp::MulHigh), 32), None);
    assert_eq!(table.requirement(&ArithOp::Int(IntOp::Div), 32), None);
    assert_eq!(table.requirement(&ArithOp::Int(IntOp::Shl), 8), None);
    // Unsigned min/max share the min/max rows.
    assert_eq!(
        table.requirement(&ArithOp::Int(IntOp::UMin), 64),
        Some(TierRequirement::AVX512F_VL)
    );
}

#[test]
#[should_panic(expected = "does not specify width")]
fn missing_width_row_is_a_table_defect() {
    let _ = arithmetic::table().requirement(&ArithOp::Int(IntOp::Add), 128);
}

#[test]
#[should_panic(expected = "missing entry")]
fn missing_key_is_a_table_defect() {
    let _ = compare::table().requirement(
        &CompareKey {
            kind: ElementKind::Float,
            condition: CompareCondition::BelowThan,
        },
        32,
    );
}

#[test]
fn unsigned_compare_rows_are_evex_only() {
    let table = compare::table();
    let key = |bits: u32| {
        table.requirement(
            &CompareKey {
                kind: ElementKind::Int,
                condition: CompareCondition::BelowThan,
            },
            bits,
        )
    };
    assert_eq!(key(8), Some(TierRequirement::AVX512BW_VL));
    assert_eq!(key(16), Some(TierRequirement::AVX512BW_VL));
    assert_eq!(key(32), Some(TierRequirement::AVX512F_VL));
    assert_eq!(key(64), Some(TierRequirement::AVX512F_VL));
}

#[test]
fn convert_pairs_cover_the_supported_lattice() {
    let table = convert::table();
    assert_eq!(
        table.requirement_opt(&ConvertKey::SignExtend, 8, 16),
        Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)
    );
    assert_eq!(
        table.requirement_opt(&ConvertKey::Narrow, 64, 32),
        Some(TierRequirement::AVX1_AVX2_AVX512F_VL)
    );
    assert_eq!(
        table.requirement_opt(&ConvertKey::IntToFloat, 64, 64),
        Some(TierRequirement::AVX1_AVX2_AVX512DQ_VL)
    );
    assert_eq!(
        table.requirement_opt(&ConvertKey::FloatToInt, 32, 64),
        Some(TierRequirement::AVX512DQ_VL)
    );
    // Absent pairs are ordinary "no instruction" on the public path...
    assert_eq!(table.requirement_opt(&ConvertKey::SignExtend, 8, 8), None);
}

#[test]
#[should_panic(expected = "does not specify conversion")]
fn absent_pair_on_the_required_path_is_a_table_defect() {
    let _ = convert::table().requirement_required(&ConvertKey::SignExtend, 8, 8);
}

#[test]
fn gather_has_no_subword_rows() {
    let table = gather::table();
    assert_eq!(table.requirement(&ElementKind::Int, 8), None);
    assert_eq!(table.requirement(&ElementKind::Int, 16), None);
    assert_eq!(
        table.requirement(&ElementKind::Int, 32),
        Some(TierRequirement::AVX2_AVX512F_VL)
    );
    assert_eq!(
        table.requirement(&ElementKind::Float, 64),
        Some(TierRequirement::AVX2_AVX512F_VL)
    );
}

#[test]
fn compress_splits_on_vbmi2() {
    let table = compress::table();
    assert_eq!(
        table.requirement(&ElementKind::Int, 8),
        Some(TierRequirement::AVX512_VBMI2_VL)
    );
    assert_eq!(
        table.requirement(&ElementKind::Int, 32),
        Some(TierRequirement::AVX512F_VL)
    );
    assert_eq!(
        table.requirement(&ElementKind::Float, 64),
        Some(TierRequirement::AVX512F_VL)
    );
}

#[test]
fn mask_rows_follow_the_k_instruction_subsets() {
    let table = mask::table();
    for op in [MaskOp::Not, MaskOp::And, MaskOp::Or, MaskOp::Xor, MaskOp::Reinterpret] {
        assert_eq!(table.requirement(&op, 8), Some(TierRequirement::AVX512DQ_VL));
        assert_eq!(table.requirement(&op, 16), Some(TierRequirement::AVX512F_VL));
        assert_eq!(table.requirement(&op, 32), Some(TierRequirement::AVX512BW_VL));
        assert_eq!(table.requirement(&op, 64), Some(TierRequirement::AVX512BW_VL));
    }
}

#[test]
fn permute_uses_one_predicate_everywhere() {
    let table = permute::table();
    for bits in [8, 16, 32, 64] {
        assert_eq!(
            table.requirement(&ElementKind::Int, bits),
            Some(TierRequirement::PERMUTE)
        );
    }
    for bits in [32, 64] {
        assert_eq!(
            table.requirement(&ElementKind::Float, bits),
            Some(TierRequirement::PERMUTE)
        );
    }
}

#[test]
fn blend_mirrors_the_arithmetic_families() {
    let table = blend::table();
    assert_eq!(
        table.requirement(&ElementKind::Int, 8),
        Some(TierRequirement::AVX1_AVX2_AVX512BW_VL)
    );
    assert_eq!(
        table.requirement(&ElementKind::Float, 32),
        Some(TierRequirement::AVX1_AVX512F_VL)
    );
}

#[test]
#[should_panic(expected = "duplicate width")]
fn duplicate_widths_fail_construction() {
    use crate::tables::row;
    use smallvec::smallvec;
    let _ = CapabilityTable::new(
        "test",
        vec![(
            ArithOp::Int(IntOp::Add),
            smallvec![
                row(32, Some(TierRequirement::AVX1_AVX512F_VL)),
                row(32, None),
            ],
        )],
    );
}

#[test]
#[should_panic(expected = "not a power of two")]
fn non_power_of_two_widths_fail_construction() {
    use crate::tables::row;
    use smallvec::smallvec;
    let _ = CapabilityTable::new(
        "test",
        vec![(
            ArithOp::Int(IntOp::Add),
            smallvec![row(24, Some(TierRequirement::AVX1_AVX512F_VL))],
        )],
    );
}
