//! The capability oracle: widest legal element count per operation.
//!
//! For the maximum number of vector elements one machine instruction can
//! handle, four constraints combine:
//!
//! - which SIMD instruction set is available,
//! - the broadest machine instruction for the operation being vectorized,
//! - whether a register exists for that element type and count,
//! - how many elements the caller wants at most.
//!
//! The oracle layers the cross-cutting policies (object-vector capping,
//! mask/blend legalization, unsigned-compare simulation, conversion range
//! feasibility, scalar-shift special cases) on top of the capability tables.
//! Every query returns a power of two between 1 and the requested maximum;
//! 1 is the ordinary "stay scalar" answer, never an error.

use crate::config::VectorizerConfig;
use crate::error::Result;
use crate::features::{CpuFeature, FeatureSet};
use crate::ops::{
    ArithOp, CompareCondition, ConvertClass, FloatConvertClass, IntConvertClass, IntOp, LogicOp,
    MaskOp, MaySimulateUnsigned, VectorOp,
};
use crate::profile::{MachineProfile, TargetDescription};
use crate::resolver::resolve;
use crate::stamp::ElementStamp;
use crate::tables::compare::CompareKey;
use crate::tables::{arithmetic, blend, compare, compress, convert, gather, mask, permute};
use crate::tables::{convert::ConvertKey, ElementKind};
use crate::width::VectorWidth;

/// Largest power of two not exceeding `n` (0 for 0).
const fn pow2_floor(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}

/// Smallest power of two not below `n`, saturating at the largest
/// representable power of two.
fn pow2_ceil(n: usize) -> usize {
    n.checked_next_power_of_two().unwrap_or_else(|| pow2_floor(usize::MAX))
}

/// Byte budget of a request: element count times element stride, saturating.
fn byte_budget(max_length: usize, stride_bytes: usize) -> usize {
    max_length.saturating_mul(stride_bytes)
}

/// The vector-instruction capability oracle for one machine profile.
///
/// Pure over `(descriptor, profile, requested count)`; safe for concurrent
/// queries from independent compilation threads as long as nobody calls
/// [`MachineProfile::retarget`] concurrently.
#[derive(Debug)]
pub struct VectorOracle {
    profile: MachineProfile,
}

impl VectorOracle {
    /// Oracle over an explicit profile.
    #[must_use]
    pub fn new(profile: MachineProfile) -> Self {
        Self { profile }
    }

    /// Oracle for the feature set and knobs of `config`.
    pub fn from_config(config: &VectorizerConfig) -> Result<Self> {
        let features = config.feature_set()?;
        Ok(Self::new(MachineProfile::new(features, config)))
    }

    /// The underlying machine profile (for retargeting and introspection).
    #[must_use]
    pub fn profile(&self) -> &MachineProfile {
        &self.profile
    }

    // ------------------------------------------------------------------
    // Uniform facade
    // ------------------------------------------------------------------

    /// Widest legal element count for `op`, at most `max_length`.
    ///
    /// Always a power of two in `1..=max_length`; 1 means "do not vectorize
    /// this operation".
    #[must_use]
    pub fn supported_length(&self, op: &VectorOp, max_length: usize) -> usize {
        match op {
            VectorOp::Arithmetic { op, stamp } => {
                self.supported_arithmetic_length(stamp, max_length, *op)
            }
            VectorOp::Convert { class, from, to } => match class {
                ConvertClass::Int(class) => {
                    self.supported_int_convert_length(to, from, max_length, *class)
                }
                ConvertClass::Float(class) => {
                    self.supported_float_convert_length(to, from, max_length, *class)
                }
            },
            VectorOp::Compare { condition, stamp } => {
                self.supported_comparison_length(stamp, *condition, max_length)
            }
            VectorOp::Blend { stamp } => self.supported_blend_length(stamp, max_length),
            VectorOp::Gather { element, offset } => {
                self.supported_gather_length(element, offset, max_length)
            }
            VectorOp::Permute { stamp } => self.supported_permute_length(stamp, max_length),
            VectorOp::CompressExpand { stamp } => {
                self.supported_compress_expand_length(stamp, max_length)
            }
            VectorOp::LogicMask { op, mask_bits } => {
                self.supported_mask_op_length(*op, *mask_bits, max_length)
            }
        }
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Widest legal element count for plain vector moves of `stamp`.
    #[must_use]
    pub fn supported_move_length(&self, stamp: &ElementStamp, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }
        let mut width = max_supported_width(&target);
        if stamp.is_object() && width > VectorWidth::Ymm {
            // Reference vectors stay one tier below the maximum: the GC
            // barriers only handle up to YMM-sized reference vectors.
            width = VectorWidth::Ymm;
        }
        self.supported_length_for(stamp, max_length, Some(width))
    }

    /// Unbounded variant of [`supported_move_length`](Self::supported_move_length).
    #[must_use]
    pub fn max_length(&self, stamp: &ElementStamp) -> usize {
        self.supported_move_length(stamp, usize::MAX)
    }

    /// Maximum element count for an unconstrained byte-wide primitive.
    /// Cached on the profile; the cache drops on retarget.
    #[must_use]
    pub fn unconstrained_max_length(&self) -> usize {
        if let Some(cached) = self.profile.cached_unconstrained() {
            return cached;
        }
        let length = self.supported_move_length(&ElementStamp::int(8), usize::MAX);
        self.profile.store_unconstrained(length);
        length
    }

    /// Widest legal element count for masked (predicated) moves of `stamp`.
    ///
    /// Masked moves never use partial registers, and the subword forms need
    /// BW+VL.
    #[must_use]
    pub fn supported_masked_move_length(&self, stamp: &ElementStamp, max_length: usize) -> usize {
        let length = self.supported_move_length(stamp, max_length);
        if length == 1 {
            return 1;
        }

        let element_bits = stamp.primitive_bits() as usize;
        if element_bits * length < VectorWidth::Xmm.bits() {
            return 1;
        }

        let features = self.profile.target().features;
        if element_bits < 32
            && !(features.has(CpuFeature::Avx512bw) && features.has(CpuFeature::Avx512vl))
        {
            return 1;
        }
        length
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// Widest legal element count for lane-wise arithmetic.
    #[must_use]
    pub fn supported_arithmetic_length(
        &self,
        stamp: &ElementStamp,
        max_length: usize,
        op: ArithOp,
    ) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        if matches!(stamp, ElementStamp::LogicValue { .. }) {
            // Opmask values live in mask registers whatever the operation;
            // their width is the mask register width.
            let mask_bits = mask_register_bits(target.features);
            return mask_bits.min(pow2_floor(max_length));
        }

        let bits = stamp.primitive_bits();
        let requirement = arithmetic::table().requirement(&op, bits);
        let budget = byte_budget(max_length, (bits / 8) as usize);
        let width = resolve(requirement, budget, &target);
        self.supported_length_for(stamp, max_length, width)
    }

    /// Widest legal element count for shifts where every lane shifts by one
    /// shared scalar count. Byte lanes have no such instruction and always
    /// stay scalar.
    #[must_use]
    pub fn supported_shift_scalar_count_length(
        &self,
        stamp: &ElementStamp,
        max_length: usize,
        op: IntOp,
    ) -> usize {
        debug_assert!(
            matches!(op, IntOp::Shl | IntOp::Shr | IntOp::UShr),
            "not a shift: {op:?}"
        );
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let bits = stamp.primitive_bits();
        if bits == 8 {
            return 1;
        }

        let requirement = arithmetic::scalar_shift_table().requirement(&op, bits);
        let budget = byte_budget(max_length, (bits / 8) as usize);
        let width = resolve(requirement, budget, &target);
        self.supported_length_for(stamp, max_length, width)
    }

    /// Should a variable scalar shift count be broadcast to a vector before
    /// shifting? Constants are encoded immediately; for the rest the answer
    /// depends on whether the scalar-count instruction forms exist at this
    /// width.
    #[must_use]
    pub fn should_broadcast_shift_count(
        &self,
        element_bits: u32,
        vector_length: usize,
        count_is_constant: bool,
    ) -> bool {
        if count_is_constant {
            return false;
        }
        let features = self.profile.target().features;
        match element_bits {
            16 => {
                if vector_length == VectorWidth::Zmm.bytes() / 2 {
                    assert!(
                        features.has(CpuFeature::Avx512bw),
                        "a ZMM's worth of word lanes requires avx512bw"
                    );
                    return true;
                }
                features.has(CpuFeature::Avx512bw) && features.has(CpuFeature::Avx512vl)
            }
            32 | 64 => features.has(CpuFeature::Avx2),
            _ => unreachable!("shift counts broadcast only for 16/32/64-bit lanes"),
        }
    }

    // ------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------

    /// Widest legal element count for an integer-to-integer conversion.
    #[must_use]
    pub fn supported_int_convert_length(
        &self,
        to: &ElementStamp,
        from: &ElementStamp,
        max_length: usize,
        class: IntConvertClass,
    ) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let from_bits = from.primitive_bits();
        let to_bits = to.primitive_bits();
        let requirement =
            convert::table().requirement_opt(&class.into(), from_bits, to_bits);
        let width = resolve(requirement, convert_budget(max_length, from_bits, to_bits), &target);
        self.supported_length_for(to, max_length, width)
            .min(self.supported_length_for(from, max_length, width))
    }

    /// Widest legal element count for a conversion with a floating-point
    /// side.
    ///
    /// Two feasibility policies apply before the table: a 64-bit integer to
    /// 64-bit float conversion without the dedicated wide-range instruction
    /// is only legal when the input provably fits the 52-bit double
    /// mantissa, and a float-to-integer conversion is only legal when the
    /// input can neither be NaN nor overflow the result range (the machine
    /// instructions truncate instead of following IR semantics there).
    #[must_use]
    pub fn supported_float_convert_length(
        &self,
        to: &ElementStamp,
        from: &ElementStamp,
        max_length: usize,
        class: FloatConvertClass,
    ) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        if self.is_impossible_long_to_double(to, from) {
            return 1;
        }

        let from_bits = from.primitive_bits();
        let to_bits = to.primitive_bits();
        if class == FloatConvertClass::FloatToInt {
            let ElementStamp::Float(float_stamp) = from else {
                unreachable!("float-to-int conversion from a non-float stamp: {from:?}")
            };
            if float_stamp.range.can_be_nan || float_stamp.range.can_overflow_integer(to_bits) {
                return 1;
            }
        }

        let requirement = convert::table().requirement_opt(&class.into(), from_bits, to_bits);
        let width = resolve(requirement, convert_budget(max_length, from_bits, to_bits), &target);
        self.supported_length_for(to, max_length, width)
            .min(self.supported_length_for(from, max_length, width))
    }

    /// Does the target have the dedicated wide-range long-to-double
    /// instruction (vcvtqq2pd)?
    #[must_use]
    pub fn supports_long_to_double_convert(&self) -> bool {
        let features = self.profile.target().features;
        features.has(CpuFeature::Avx512dq) && features.has(CpuFeature::Avx512vl)
    }

    fn is_impossible_long_to_double(&self, to: &ElementStamp, from: &ElementStamp) -> bool {
        let (ElementStamp::Float(to_stamp), ElementStamp::Int(from_stamp)) = (to, from) else {
            return false;
        };
        if to_stamp.bits != 64 || from_stamp.bits != 64 {
            return false;
        }
        if self.supports_long_to_double_convert() {
            return false;
        }
        !from_stamp.range.fits_unsigned_52_bits() && !from_stamp.range.fits_signed_52_bits()
    }

    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    /// Widest legal element count for a comparison, allowing the
    /// unsigned-compare simulation.
    #[must_use]
    pub fn supported_comparison_length(
        &self,
        stamp: &ElementStamp,
        condition: CompareCondition,
        max_length: usize,
    ) -> usize {
        self.comparison_length(stamp, condition, max_length, MaySimulateUnsigned::Yes)
    }

    /// Widest legal element count for a comparison.
    ///
    /// AVX and AVX2 have no unsigned compares, but `x |<| y` can be priced
    /// as the signed `(x ^ sign_bit) < (y ^ sign_bit)`: when the direct
    /// instruction is unavailable and `simulate` allows it, the result is
    /// the signed-compare length further bounded by the XOR arithmetic
    /// length at that size. Vector lowering legalizes the simulated form.
    #[must_use]
    pub fn comparison_length(
        &self,
        stamp: &ElementStamp,
        condition: CompareCondition,
        max_length: usize,
        simulate: MaySimulateUnsigned,
    ) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let (kind, bits) = self.element_kind(stamp);
        debug_assert!(
            !stamp.is_object() || condition == CompareCondition::Eq,
            "reference compares are equality checks"
        );
        let requirement = compare::table().requirement(&CompareKey { kind, condition }, bits);
        let budget = byte_budget(max_length, (bits / 8) as usize);
        let width = resolve(requirement, budget, &target);
        let mut supported = self.supported_length_for(stamp, max_length, width);

        if supported == 1
            && condition == CompareCondition::BelowThan
            && simulate == MaySimulateUnsigned::Yes
        {
            debug_assert!(matches!(stamp, ElementStamp::Int(_)), "unsigned compare on {stamp:?}");
            let signed_length =
                self.comparison_length(stamp, CompareCondition::Lt, max_length, MaySimulateUnsigned::No);
            supported =
                self.supported_arithmetic_length(stamp, signed_length, ArithOp::Int(IntOp::Xor));
            tracing::trace!(
                signed_length,
                supported,
                "priced unsigned compare via sign-flip simulation"
            );
        }
        supported
    }

    // ------------------------------------------------------------------
    // Blend / conditional
    // ------------------------------------------------------------------

    /// Widest legal element count for a mask-driven blend of `stamp` lanes.
    #[must_use]
    pub fn supported_blend_length(&self, stamp: &ElementStamp, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let (kind, bits) = self.element_kind(stamp);
        let requirement = blend::table().requirement(&kind, bits);
        let rounded = pow2_ceil(max_length);
        let budget = byte_budget(rounded, (bits / 8) as usize);
        let width = legalize_blend_width(resolve(requirement, budget, &target), target.features);
        let supported = self.supported_length_for(stamp, rounded, width);
        supported.min(pow2_floor(max_length))
    }

    /// Widest legal element count for a vectorized conditional on `stamp`
    /// lanes.
    ///
    /// Beyond the blend itself, the mask feeding it may have to be widened
    /// or narrowed from whatever width the condition was computed at, so the
    /// result is additionally bounded by the sign-extend and narrow
    /// conversions into the element width.
    #[must_use]
    pub fn supported_conditional_length(&self, stamp: &ElementStamp, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let (kind, bits) = self.element_kind(stamp);
        let requirement = blend::table().requirement(&kind, bits);
        let budget = byte_budget(max_length, (bits / 8) as usize);
        let mut width = resolve(requirement, budget, &target);

        let stamp_bits = (self.stride_bytes(stamp) * 8) as u32;
        if matches!(width, Some(VectorWidth::Ymm | VectorWidth::Zmm)) {
            let mut source_bits = stamp_bits >> 1;
            while source_bits >= 8 {
                let extend = convert::table().requirement_required(
                    &ConvertKey::SignExtend,
                    source_bits,
                    stamp_bits,
                );
                match resolve(extend, convert_budget(max_length, source_bits, stamp_bits), &target) {
                    Some(extend_width) => {
                        if width.is_some_and(|w| w > extend_width) {
                            width = Some(extend_width);
                        }
                    }
                    None => return 1,
                }
                source_bits >>= 1;
            }
        }

        if matches!(width, Some(VectorWidth::Ymm | VectorWidth::Zmm)) {
            let mut source_bits = stamp_bits << 1;
            while source_bits <= 64 {
                let narrow = convert::table().requirement_required(
                    &ConvertKey::Narrow,
                    source_bits,
                    stamp_bits,
                );
                match resolve(narrow, convert_budget(max_length, source_bits, stamp_bits), &target) {
                    Some(narrow_width) => {
                        if width.is_some_and(|w| w > narrow_width) {
                            width = Some(narrow_width);
                        }
                    }
                    None => return 1,
                }
                source_bits <<= 1;
            }
        }

        let width = legalize_blend_width(width, target.features);
        self.supported_length_for(stamp, max_length, width)
    }

    // ------------------------------------------------------------------
    // Logic results
    // ------------------------------------------------------------------

    /// Widest legal element count for the vectorized result of a logic
    /// operation.
    ///
    /// With the AVX-512 Foundation but without the BW+DQ+VL companions, the
    /// result could land in a mask register some consumers cannot use; the
    /// consumer is unknown at this level, so the result is capped one tier
    /// below the maximum and AVX/AVX2 instructions are used instead.
    #[must_use]
    pub fn supported_logic_length(&self, op: &LogicOp, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let features = target.features;
        let mut upper_bound = max_length;
        if features.has(CpuFeature::Avx512f)
            && !(features.has(CpuFeature::Avx512bw)
                && features.has(CpuFeature::Avx512dq)
                && features.has(CpuFeature::Avx512vl))
        {
            let Some(representative) = op.representative_stamp() else {
                return 1;
            };
            let element_bytes = self.stride_bytes(&representative);
            upper_bound = upper_bound.min(VectorWidth::Ymm.bytes() / element_bytes);
        }

        match op {
            LogicOp::Compare { stamp, condition } => {
                self.supported_comparison_length(stamp, *condition, upper_bound)
            }
            LogicOp::IsNull => self.supported_comparison_length(
                &ElementStamp::Object,
                CompareCondition::Eq,
                upper_bound,
            ),
            LogicOp::IntegerTest { bits } => self.supported_arithmetic_length(
                &ElementStamp::int(*bits),
                upper_bound,
                ArithOp::Int(IntOp::And),
            ),
            LogicOp::Constant => pow2_floor(upper_bound).min(self.unconstrained_max_length()),
        }
    }

    /// Widest legal element count for opmask-register logic on masks of
    /// `mask_bits` lanes.
    ///
    /// Mask registers are not tiered like vector registers: a k-instruction
    /// of a given width either exists on the feature set or it does not, and
    /// an N-bit mask covers N lanes.
    #[must_use]
    pub fn supported_mask_op_length(&self, op: MaskOp, mask_bits: u32, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }
        let Some(requirement) = mask::table().requirement(&op, mask_bits) else {
            return 1;
        };
        if !requirement.supports(target.features, VectorWidth::Zmm) {
            return 1;
        }
        (mask_bits as usize).min(pow2_floor(max_length))
    }

    /// Widest element count at which a vector of `stamp` comparisons can be
    /// turned into a scalar bitmask (vpmovmskb and friends, or the BW mask
    /// extraction at ZMM).
    #[must_use]
    pub fn supported_mask_logic_length(&self, stamp: &ElementStamp, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }
        let stride = self.stride_bytes(stamp);
        let features = target.features;
        let width = if features.has(CpuFeature::Avx512bw) {
            VectorWidth::Zmm
        } else if features.has(CpuFeature::Avx2) {
            VectorWidth::Ymm
        } else if features.has(CpuFeature::Avx) {
            VectorWidth::Xmm
        } else {
            return 1;
        };
        (width.bytes() / stride).min(pow2_floor(max_length))
    }

    /// Maximum lane count for vectors of logic values of `stamp` elements.
    #[must_use]
    pub fn max_logic_length(&self, stamp: &ElementStamp) -> usize {
        if self.logic_vectors_are_bitmasks() {
            self.max_length(stamp)
        } else {
            mask_register_bits(self.profile.target().features)
        }
    }

    /// AVX and AVX2 represent logic vectors as element-wide bitmasks;
    /// full AVX-512 uses the dedicated mask registers.
    #[must_use]
    pub fn logic_vectors_are_bitmasks(&self) -> bool {
        !self.profile.target().features.has_full_avx512()
    }

    // ------------------------------------------------------------------
    // Gather / permute / compress
    // ------------------------------------------------------------------

    /// Widest legal element count for an indexed gather: the gathered
    /// element width and the offset width resolve independently and the
    /// narrower result wins.
    ///
    /// # Panics
    ///
    /// When `offset` is not an integer stamp — offsets are addresses, a
    /// non-integer offset is a caller bug.
    #[must_use]
    pub fn supported_gather_length(
        &self,
        element: &ElementStamp,
        offset: &ElementStamp,
        max_length: usize,
    ) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }

        let ElementStamp::Int(offset_stamp) = offset else {
            unreachable!("gather offset stamp must be an integer stamp, got: {offset:?}")
        };
        let (element_kind, element_bits) = self.element_kind(element);
        let element_requirement = gather::table().requirement(&element_kind, element_bits);
        let offset_requirement =
            gather::table().requirement(&ElementKind::Int, offset_stamp.bits);

        let element_width = resolve(
            element_requirement,
            byte_budget(max_length, (element_bits / 8) as usize),
            &target,
        );
        let offset_width = resolve(
            offset_requirement,
            byte_budget(max_length, (offset_stamp.bits / 8) as usize),
            &target,
        );
        self.supported_length_for(element, max_length, element_width)
            .min(self.supported_length_for(offset, max_length, offset_width))
    }

    /// Widest legal element count for a cross-lane permute.
    ///
    /// Legality is defined at power-of-two granularities only, so the
    /// request rounds up to the next power of two for resolution and the
    /// result clamps back to the request.
    #[must_use]
    pub fn supported_permute_length(&self, stamp: &ElementStamp, max_length: usize) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }
        let (kind, bits) = self.element_kind(stamp);
        let requirement = permute::table().requirement(&kind, bits);
        let rounded = pow2_ceil(max_length);
        let width = resolve(requirement, byte_budget(rounded, (bits / 8) as usize), &target);
        let supported = self.supported_length_for(stamp, rounded, width);
        supported.min(pow2_floor(max_length))
    }

    /// Widest legal element count for a mask-driven lane compress or expand,
    /// with the same power-of-two rounding as permutes.
    #[must_use]
    pub fn supported_compress_expand_length(
        &self,
        stamp: &ElementStamp,
        max_length: usize,
    ) -> usize {
        let target = self.profile.target();
        if !self.meets_minimum_requirements(&target, max_length) {
            return 1;
        }
        let (kind, bits) = self.element_kind(stamp);
        let requirement = compress::table().requirement(&kind, bits);
        let rounded = pow2_ceil(max_length);
        let width = resolve(requirement, byte_budget(rounded, (bits / 8) as usize), &target);
        let supported = self.supported_length_for(stamp, rounded, width);
        supported.min(pow2_floor(max_length))
    }

    // ------------------------------------------------------------------
    // Shape queries
    // ------------------------------------------------------------------

    /// Element count of the narrowest register tier covering `length`
    /// elements of `stamp`.
    ///
    /// # Panics
    ///
    /// When no tier of this target can cover the request; callers guarantee
    /// the length came from an earlier oracle answer.
    #[must_use]
    pub fn shortest_covering_length(&self, stamp: &ElementStamp, length: usize) -> usize {
        let target = self.profile.target();
        let stride = self.stride_bytes(stamp);
        let size_bytes = stride * length;
        let max_bytes = max_supported_width(&target).bytes();
        assert!(
            size_bytes <= max_bytes,
            "unable to cover {length} lanes of {stride} bytes within {max_bytes} bytes"
        );
        for width in [VectorWidth::Xmm, VectorWidth::Ymm, VectorWidth::Zmm] {
            if width.bytes() >= size_bytes {
                return width.bytes() / stride;
            }
        }
        unreachable!("tier walk exhausted below the checked maximum")
    }

    /// Can two vectors of `input_bytes` be concatenated into one register?
    #[must_use]
    pub fn supports_vector_concat(&self, input_bytes: usize) -> bool {
        let max_bytes = max_supported_width(&self.profile.target()).bytes();
        (input_bytes == 16 && max_bytes >= 32) || (input_bytes == 32 && max_bytes >= 64)
    }

    /// Floating-point conditional moves vectorize as blends, which need AVX;
    /// without it such loops must not be vectorized at all.
    #[must_use]
    pub fn supports_fp_conditional_moves(&self) -> bool {
        self.profile.target().features.has(CpuFeature::Avx)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn meets_minimum_requirements(&self, target: &TargetDescription, max_length: usize) -> bool {
        // Nothing vectorizes below the AVX baseline.
        self.profile.enabled()
            && max_length > 1
            && target.features.has(CpuFeature::Avx)
            && target.max_vector_bytes >= VectorWidth::Xmm.bytes()
    }

    /// Convert a resolved tier to an element count: clamp to the request,
    /// then halve past (element, count) pairs without a register encoding.
    fn supported_length_for(
        &self,
        stamp: &ElementStamp,
        max_length: usize,
        width: Option<VectorWidth>,
    ) -> usize {
        if stamp.is_object() && !self.profile.object_vectorization() {
            return 1;
        }
        let Some(width) = width else {
            return 1;
        };

        let stride = self.stride_bytes(stamp);
        let supported = width.bytes() / stride;
        debug_assert!(supported.is_power_of_two(), "{supported}");

        let mut result = if max_length <= supported {
            pow2_floor(max_length)
        } else {
            supported
        };
        while result > 1 && !has_register_encoding(stamp, result) {
            result >>= 1;
        }
        result.max(1)
    }

    fn stride_bytes(&self, stamp: &ElementStamp) -> usize {
        match stamp {
            ElementStamp::Int(s) => (s.bits / 8) as usize,
            ElementStamp::Float(s) => (s.bits / 8) as usize,
            ElementStamp::LogicValue { bits } => ((bits / 8).max(1)) as usize,
            ElementStamp::Object => self.profile.reference_bytes(),
        }
    }

    /// Table category and width of a stamp; references price as integers of
    /// their stride width.
    fn element_kind(&self, stamp: &ElementStamp) -> (ElementKind, u32) {
        match stamp {
            ElementStamp::Int(s) => (ElementKind::Int, s.bits),
            ElementStamp::Float(s) => (ElementKind::Float, s.bits),
            ElementStamp::Object => (ElementKind::Int, self.profile.reference_bits()),
            ElementStamp::LogicValue { .. } => {
                unreachable!("opmask values have no element-kind table")
            }
        }
    }
}

/// Widest register the feature set and configured capacity allow, before any
/// per-operation constraint.
fn max_supported_width(target: &TargetDescription) -> VectorWidth {
    if target.features.has(CpuFeature::Avx512f) && target.max_vector_bytes >= 64 {
        VectorWidth::Zmm
    } else if target.features.has(CpuFeature::Avx) && target.max_vector_bytes >= 32 {
        VectorWidth::Ymm
    } else {
        debug_assert!(target.features.has(CpuFeature::Sse2), "{:?}", target.features);
        VectorWidth::Xmm
    }
}

/// Width of the widest opmask register: 64 lanes with BW, 16 with the
/// Foundation alone.
fn mask_register_bits(features: FeatureSet) -> usize {
    if features.has(CpuFeature::Avx512bw) {
        64
    } else if features.has(CpuFeature::Avx512f) {
        16
    } else {
        1
    }
}

/// Computing a ZMM blend mask may involve mask moves that only exist with
/// BW+DQ+VL. The condition is unknown here, so be conservative and stay at
/// YMM on partial subsets.
fn legalize_blend_width(
    width: Option<VectorWidth>,
    features: FeatureSet,
) -> Option<VectorWidth> {
    if width == Some(VectorWidth::Zmm)
        && !(features.has(CpuFeature::Avx512bw)
            && features.has(CpuFeature::Avx512dq)
            && features.has(CpuFeature::Avx512vl))
    {
        return Some(VectorWidth::Ymm);
    }
    width
}

/// Conversions budget with the wider of the two element sizes, avoiding
/// overflow from the narrower one.
fn convert_budget(max_length: usize, from_bits: u32, to_bits: u32) -> usize {
    byte_budget(max_length, (from_bits.max(to_bits) / 8) as usize)
}

/// Not every (element, count) pair has a register: there are no moves for
/// 2×byte and no register kind for 2×float32.
fn has_register_encoding(stamp: &ElementStamp, length: usize) -> bool {
    if length == 2 {
        match stamp {
            ElementStamp::Int(s) if s.bits == 8 => return false,
            ElementStamp::Float(s) if s.bits == 32 => return false,
            _ => {}
        }
    }
    true
}
