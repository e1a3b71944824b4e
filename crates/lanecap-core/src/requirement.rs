//! Per-tier feature predicates attached to capability table entries.
//!
//! A [`TierRequirement`] answers "is this instruction family encodable at this
//! register width on this feature set?" It has two independent sides:
//!
//! - a legacy VEX side, covering the 128/256-bit AVX encodings, and
//! - an EVEX side, covering the 512-bit encodings and — with the VL
//!   extension — their 128/256-bit forms.
//!
//! ZMM is only reachable through the EVEX side; XMM and YMM are reachable
//! through either. This is why a single predicate can require different
//! features at different tiers: `AVX1_AVX2_AVX512BW_VL` needs plain AVX at
//! XMM, AVX2 at YMM, and AVX-512 F+BW at ZMM.

use crate::features::{CpuFeature, FeatureSet};
use crate::width::VectorWidth;

/// Feature demand of the legacy VEX (128/256-bit) encoding of an instruction
/// family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VexAssertion {
    /// AVX suffices at both XMM and YMM.
    Avx1,
    /// AVX at XMM, AVX2 at YMM (integer 256-bit ops arrived with AVX2).
    Avx1Avx2,
    /// AVX2 at both XMM and YMM.
    Avx2,
    /// FMA3 at both XMM and YMM.
    Fma,
}

impl VexAssertion {
    fn supports(self, features: FeatureSet, width: VectorWidth) -> bool {
        match self {
            VexAssertion::Avx1 => features.has(CpuFeature::Avx),
            VexAssertion::Avx1Avx2 => match width {
                VectorWidth::Xmm => features.has(CpuFeature::Avx),
                _ => features.has(CpuFeature::Avx2),
            },
            VexAssertion::Avx2 => features.has(CpuFeature::Avx2),
            VexAssertion::Fma => features.has(CpuFeature::Fma),
        }
    }
}

/// Feature demand of the EVEX encoding: AVX-512 F plus the named subset at
/// ZMM, and additionally VL for the 128/256-bit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvexAssertion {
    /// AVX-512 Foundation alone.
    F,
    /// Foundation + BW.
    Bw,
    /// Foundation + DQ.
    Dq,
    /// Foundation + VBMI2.
    Vbmi2,
    /// Foundation + either VBMI or BW. Full-width byte permutes prefer VBMI
    /// (VPERMB); BW offers a two-instruction workaround, so either unlocks
    /// the tier.
    VbmiOrBw,
}

impl EvexAssertion {
    fn supports_zmm(self, features: FeatureSet) -> bool {
        if !features.has(CpuFeature::Avx512f) {
            return false;
        }
        match self {
            EvexAssertion::F => true,
            EvexAssertion::Bw => features.has(CpuFeature::Avx512bw),
            EvexAssertion::Dq => features.has(CpuFeature::Avx512dq),
            EvexAssertion::Vbmi2 => features.has(CpuFeature::Avx512vbmi2),
            EvexAssertion::VbmiOrBw => {
                features.has(CpuFeature::Avx512vbmi) || features.has(CpuFeature::Avx512bw)
            }
        }
    }

    fn supports_narrow(self, features: FeatureSet) -> bool {
        self.supports_zmm(features) && features.has(CpuFeature::Avx512vl)
    }
}

/// The required-feature predicate of one capability entry.
///
/// Evaluated per tier by the width-tier resolver; carries no state and never
/// names features outside its two assertion sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRequirement {
    vex: Option<VexAssertion>,
    evex: Option<EvexAssertion>,
}

impl TierRequirement {
    const fn new(vex: Option<VexAssertion>, evex: Option<EvexAssertion>) -> Self {
        Self { vex, evex }
    }

    /// AVX at XMM/YMM; AVX-512 F at ZMM.
    pub const AVX1_AVX512F_VL: Self =
        Self::new(Some(VexAssertion::Avx1), Some(EvexAssertion::F));
    /// AVX at XMM, AVX2 at YMM; AVX-512 F at ZMM.
    pub const AVX1_AVX2_AVX512F_VL: Self =
        Self::new(Some(VexAssertion::Avx1Avx2), Some(EvexAssertion::F));
    /// AVX at XMM, AVX2 at YMM; AVX-512 F+BW at ZMM.
    pub const AVX1_AVX2_AVX512BW_VL: Self =
        Self::new(Some(VexAssertion::Avx1Avx2), Some(EvexAssertion::Bw));
    /// AVX at XMM, AVX2 at YMM; AVX-512 F+DQ at ZMM.
    pub const AVX1_AVX2_AVX512DQ_VL: Self =
        Self::new(Some(VexAssertion::Avx1Avx2), Some(EvexAssertion::Dq));
    /// AVX at XMM/YMM; AVX-512 F+DQ at ZMM.
    pub const AVX1_AVX512DQ_VL: Self =
        Self::new(Some(VexAssertion::Avx1), Some(EvexAssertion::Dq));
    /// AVX2 at XMM/YMM; AVX-512 F at ZMM.
    pub const AVX2_AVX512F_VL: Self =
        Self::new(Some(VexAssertion::Avx2), Some(EvexAssertion::F));
    /// EVEX only: F (+VL below ZMM).
    pub const AVX512F_VL: Self = Self::new(None, Some(EvexAssertion::F));
    /// EVEX only: F+BW (+VL below ZMM).
    pub const AVX512BW_VL: Self = Self::new(None, Some(EvexAssertion::Bw));
    /// EVEX only: F+DQ (+VL below ZMM).
    pub const AVX512DQ_VL: Self = Self::new(None, Some(EvexAssertion::Dq));
    /// EVEX only: F+VBMI2 (+VL below ZMM).
    pub const AVX512_VBMI2_VL: Self = Self::new(None, Some(EvexAssertion::Vbmi2));
    /// FMA3 at XMM/YMM; AVX-512 F at ZMM.
    pub const FMA: Self = Self::new(Some(VexAssertion::Fma), Some(EvexAssertion::F));
    /// Cross-lane permutes: AVX at XMM, AVX2 at YMM, F plus VBMI-or-BW at
    /// ZMM.
    pub const PERMUTE: Self =
        Self::new(Some(VexAssertion::Avx1Avx2), Some(EvexAssertion::VbmiOrBw));

    /// Is the instruction family encodable at `width` on `features`?
    #[must_use]
    pub fn supports(self, features: FeatureSet, width: VectorWidth) -> bool {
        match width {
            VectorWidth::Zmm => self.evex.is_some_and(|e| e.supports_zmm(features)),
            _ => {
                self.vex.is_some_and(|v| v.supports(features, width))
                    || self.evex.is_some_and(|e| e.supports_narrow(features))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVX2_ONLY: FeatureSet =
        FeatureSet::of(&[CpuFeature::Sse2, CpuFeature::Avx, CpuFeature::Avx2]);
    const FULL_512: FeatureSet = FeatureSet::of(&[
        CpuFeature::Sse2,
        CpuFeature::Avx,
        CpuFeature::Avx2,
        CpuFeature::Avx512f,
        CpuFeature::Avx512bw,
        CpuFeature::Avx512dq,
        CpuFeature::Avx512vl,
    ]);

    #[test]
    fn avx1_avx2_splits_xmm_and_ymm() {
        let avx_only = FeatureSet::of(&[CpuFeature::Sse2, CpuFeature::Avx]);
        let req = TierRequirement::AVX1_AVX2_AVX512BW_VL;
        assert!(req.supports(avx_only, VectorWidth::Xmm));
        assert!(!req.supports(avx_only, VectorWidth::Ymm));
        assert!(req.supports(AVX2_ONLY, VectorWidth::Ymm));
        assert!(!req.supports(AVX2_ONLY, VectorWidth::Zmm));
    }

    #[test]
    fn evex_only_requirements_need_avx512() {
        let req = TierRequirement::AVX512BW_VL;
        assert!(!req.supports(AVX2_ONLY, VectorWidth::Xmm));
        assert!(req.supports(FULL_512, VectorWidth::Zmm));
        assert!(req.supports(FULL_512, VectorWidth::Xmm));
        // Without VL the narrow EVEX forms vanish but ZMM stays.
        let no_vl = FULL_512.without(CpuFeature::Avx512vl);
        assert!(req.supports(no_vl, VectorWidth::Zmm));
        assert!(!req.supports(no_vl, VectorWidth::Xmm));
    }

    #[test]
    fn bw_only_is_not_enough_without_foundation() {
        let orphan_bw = FeatureSet::of(&[CpuFeature::Avx512bw, CpuFeature::Avx512vl]);
        assert!(!TierRequirement::AVX512BW_VL.supports(orphan_bw, VectorWidth::Zmm));
        assert!(!TierRequirement::AVX512BW_VL.supports(orphan_bw, VectorWidth::Xmm));
    }

    #[test]
    fn permute_zmm_accepts_vbmi_or_bw() {
        let with_vbmi = FeatureSet::of(&[
            CpuFeature::Avx,
            CpuFeature::Avx2,
            CpuFeature::Avx512f,
            CpuFeature::Avx512vbmi,
        ]);
        let with_bw = FeatureSet::of(&[
            CpuFeature::Avx,
            CpuFeature::Avx2,
            CpuFeature::Avx512f,
            CpuFeature::Avx512bw,
        ]);
        let with_neither =
            FeatureSet::of(&[CpuFeature::Avx, CpuFeature::Avx2, CpuFeature::Avx512f]);
        assert!(TierRequirement::PERMUTE.supports(with_vbmi, VectorWidth::Zmm));
        assert!(TierRequirement::PERMUTE.supports(with_bw, VectorWidth::Zmm));
        assert!(!TierRequirement::PERMUTE.supports(with_neither, VectorWidth::Zmm));
    }

    #[test]
    fn fma_requires_the_fma_flag_below_zmm() {
        assert!(!TierRequirement::FMA.supports(AVX2_ONLY, VectorWidth::Ymm));
        let with_fma = AVX2_ONLY.with(CpuFeature::Fma);
        assert!(TierRequirement::FMA.supports(with_fma, VectorWidth::Ymm));
        assert!(TierRequirement::FMA.supports(FULL_512, VectorWidth::Zmm));
    }
}
