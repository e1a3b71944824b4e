//! Width-tier resolver: from a feature predicate and a byte budget to the
//! widest qualifying register tier.

use crate::profile::TargetDescription;
use crate::requirement::TierRequirement;
use crate::width::VectorWidth;

/// Resolve the widest register tier for `requirement` under `byte_budget`.
///
/// Walks tiers widest-first. ZMM and YMM qualify only when
/// `min(target.max_vector_bytes, byte_budget)` covers their capacity and the
/// predicate holds at that tier; XMM is exempt from the budget — an operation
/// may use only part of an XMM register — and needs just the configured
/// capacity floor. A `None` requirement is the explicit "no instruction
/// exists" marker and resolves to no tier.
///
/// Total and side-effect free.
#[must_use]
pub fn resolve(
    requirement: Option<TierRequirement>,
    byte_budget: usize,
    target: &TargetDescription,
) -> Option<VectorWidth> {
    let requirement = requirement?;
    let features = target.features;
    let bounded = target.max_vector_bytes.min(byte_budget);
    for width in VectorWidth::WIDEST_FIRST {
        let fits = match width {
            VectorWidth::Xmm => target.max_vector_bytes >= width.bytes(),
            _ => bounded >= width.bytes(),
        };
        if fits && requirement.supports(features, width) {
            return Some(width);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{CpuFeature, FeatureSet};

    fn target(features: FeatureSet, max_bytes: usize) -> TargetDescription {
        TargetDescription::with_max_bytes(features, max_bytes)
    }

    const AVX2: FeatureSet =
        FeatureSet::of(&[CpuFeature::Sse2, CpuFeature::Avx, CpuFeature::Avx2]);

    #[test]
    fn explicit_none_resolves_to_no_tier() {
        assert_eq!(resolve(None, usize::MAX, &target(AVX2, 64)), None);
    }

    #[test]
    fn budget_bounds_wide_tiers() {
        let t = target(AVX2, 64);
        let req = Some(TierRequirement::AVX1_AVX2_AVX512F_VL);
        assert_eq!(resolve(req, 64, &t), Some(VectorWidth::Ymm)); // no AVX-512
        assert_eq!(resolve(req, 32, &t), Some(VectorWidth::Ymm));
        assert_eq!(resolve(req, 31, &t), Some(VectorWidth::Xmm));
    }

    #[test]
    fn xmm_ignores_the_byte_budget() {
        let t = target(AVX2, 64);
        let req = Some(TierRequirement::AVX1_AVX2_AVX512F_VL);
        assert_eq!(resolve(req, 4, &t), Some(VectorWidth::Xmm));
    }

    #[test]
    fn configured_capacity_caps_everything() {
        let req = Some(TierRequirement::AVX1_AVX2_AVX512F_VL);
        assert_eq!(resolve(req, usize::MAX, &target(AVX2, 16)), Some(VectorWidth::Xmm));
        assert_eq!(resolve(req, usize::MAX, &target(AVX2, 8)), None);
    }

    #[test]
    fn zmm_needs_the_evex_side() {
        let full = AVX2
            .with(CpuFeature::Avx512f)
            .with(CpuFeature::Avx512bw)
            .with(CpuFeature::Avx512dq)
            .with(CpuFeature::Avx512vl);
        let t = target(full, 64);
        assert_eq!(
            resolve(Some(TierRequirement::AVX1_AVX2_AVX512F_VL), usize::MAX, &t),
            Some(VectorWidth::Zmm)
        );
        // A predicate whose EVEX subset is missing stops at YMM.
        let no_bw = full.without(CpuFeature::Avx512bw);
        assert_eq!(
            resolve(
                Some(TierRequirement::AVX1_AVX2_AVX512BW_VL),
                usize::MAX,
                &target(no_bw, 64)
            ),
            Some(VectorWidth::Ymm)
        );
    }
}
