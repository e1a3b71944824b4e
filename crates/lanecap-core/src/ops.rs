//! Operation vocabulary: everything a vectorization candidate can ask about.

use crate::stamp::ElementStamp;

/// Integer arithmetic operators with vector forms (or explicit non-forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntOp {
    /// Negation (lowered as `0 - x`, so it shares the subtract rows).
    Neg,
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Low-half multiplication.
    Mul,
    /// Signed high-half multiplication.
    MulHigh,
    /// Unsigned high-half multiplication.
    UMulHigh,
    /// Division. No vector form at any width.
    Div,
    /// Remainder. No vector form at any width.
    Rem,
    /// Bitwise not.
    Not,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise xor.
    Xor,
    /// Left shift by a per-lane count.
    Shl,
    /// Arithmetic right shift by a per-lane count.
    Shr,
    /// Logical right shift by a per-lane count.
    UShr,
    /// Absolute value.
    Abs,
    /// Signed maximum.
    Max,
    /// Signed minimum.
    Min,
    /// Unsigned maximum.
    UMax,
    /// Unsigned minimum.
    UMin,
    /// Bit compress (per-lane PEXT-alike). No vector form.
    Compress,
    /// Bit expand (per-lane PDEP-alike). No vector form.
    Expand,
}

/// Floating-point arithmetic operators with vector forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatOp {
    /// Negation (sign-bit flip).
    Neg,
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Remainder. No vector form.
    Rem,
    /// Bitwise not of the raw representation.
    Not,
    /// Bitwise and of the raw representation.
    And,
    /// Bitwise or of the raw representation.
    Or,
    /// Bitwise xor of the raw representation.
    Xor,
    /// Absolute value (sign-bit clear).
    Abs,
    /// Square root.
    Sqrt,
    /// Maximum.
    Max,
    /// Minimum.
    Min,
    /// Fused multiply-add.
    Fma,
}

/// Opmask-register operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskOp {
    /// Mask complement.
    Not,
    /// Mask intersection.
    And,
    /// Mask union.
    Or,
    /// Mask symmetric difference.
    Xor,
    /// Reinterpretation between mask widths.
    Reinterpret,
}

/// Any arithmetic-table operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// Integer operator.
    Int(IntOp),
    /// Floating-point operator.
    Float(FloatOp),
    /// Opmask operator.
    Mask(MaskOp),
}

/// Integer conversion classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntConvertClass {
    /// Widening with zero fill.
    ZeroExtend,
    /// Widening with sign fill.
    SignExtend,
    /// Truncating narrow.
    Narrow,
}

/// Floating-point conversion classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatConvertClass {
    /// Integer source, floating-point result.
    IntToFloat,
    /// Floating-point source, integer result.
    FloatToInt,
    /// Floating-point source and result of different widths.
    FloatToFloat,
}

/// Either conversion class, for the uniform descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertClass {
    /// Integer-to-integer conversion.
    Int(IntConvertClass),
    /// Conversion involving a floating-point side.
    Float(FloatConvertClass),
}

/// Canonical comparison conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareCondition {
    /// Equality.
    Eq,
    /// Signed (or floating-point ordered) less-than.
    Lt,
    /// Unsigned less-than ("below").
    BelowThan,
}

/// Whether an unsupported unsigned comparison may be answered by pricing the
/// signed-compare simulation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaySimulateUnsigned {
    /// Allow the sign-flip simulation.
    Yes,
    /// Direct instruction only.
    No,
}

/// A logic operation whose vectorized result width the lowering phase needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogicOp {
    /// A comparison of two values of the given stamp.
    Compare {
        /// Stamp of the compared values.
        stamp: ElementStamp,
        /// Comparison condition.
        condition: CompareCondition,
    },
    /// A null check on an object reference.
    IsNull,
    /// An integer `(x & y) == 0` test.
    IntegerTest {
        /// Width of the tested values in bits.
        bits: u32,
    },
    /// A constant truth value.
    Constant,
}

impl LogicOp {
    /// Stamp describing a representative input, whose width is the width of
    /// the bitmask a vectorized form of this operation produces. `None` when
    /// no simple representative exists.
    #[must_use]
    pub fn representative_stamp(&self) -> Option<ElementStamp> {
        match self {
            LogicOp::Compare { stamp, .. } => Some(*stamp),
            LogicOp::IsNull => Some(ElementStamp::Object),
            LogicOp::IntegerTest { bits } => Some(ElementStamp::int(*bits)),
            LogicOp::Constant => None,
        }
    }
}

/// Uniform operation descriptor over the eight capability categories.
///
/// A plain value: the caller builds one per vectorization candidate and may
/// reuse it freely as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorOp {
    /// Lane-wise arithmetic.
    Arithmetic {
        /// Operator.
        op: ArithOp,
        /// Element stamp.
        stamp: ElementStamp,
    },
    /// Lane-wise conversion.
    Convert {
        /// Conversion class.
        class: ConvertClass,
        /// Source stamp.
        from: ElementStamp,
        /// Result stamp.
        to: ElementStamp,
    },
    /// Lane-wise comparison.
    Compare {
        /// Comparison condition.
        condition: CompareCondition,
        /// Stamp of the compared values.
        stamp: ElementStamp,
    },
    /// Mask-driven blend/select.
    Blend {
        /// Element stamp.
        stamp: ElementStamp,
    },
    /// Indexed gather from memory.
    Gather {
        /// Stamp of the gathered elements.
        element: ElementStamp,
        /// Stamp of the index/offset vector. Must be an integer stamp.
        offset: ElementStamp,
    },
    /// Cross-lane permutation.
    Permute {
        /// Element stamp.
        stamp: ElementStamp,
    },
    /// Mask-driven lane compress or expand.
    CompressExpand {
        /// Element stamp.
        stamp: ElementStamp,
    },
    /// Opmask-register logic.
    LogicMask {
        /// Mask operator.
        op: MaskOp,
        /// Mask width in bits.
        mask_bits: u32,
    },
}
