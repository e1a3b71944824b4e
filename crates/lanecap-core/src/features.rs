//! CPU feature flags and feature sets.
//!
//! A [`FeatureSet`] describes what the target machine can execute: the SSE/AVX
//! baseline plus the independently-composable AVX-512 subsets. Capability
//! tables never inspect individual flags directly; they attach a
//! [`TierRequirement`](crate::requirement::TierRequirement) predicate that is
//! evaluated against a `FeatureSet` per register tier.
//!
//! # Host detection
//!
//! [`FeatureSet::detect_host`] probes the running CPU once and caches the
//! result, so repeated profile construction is free.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::Error;

/// One independent instruction-set capability of the target.
///
/// Flags never imply one another: a `FeatureSet` containing `Avx512bw` but not
/// `Avx512f` is representable (and simply satisfies fewer predicates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CpuFeature {
    /// SSE2 baseline (always present on x86_64).
    Sse2 = 0,
    /// AVX: 128/256-bit VEX encodings, the vectorization baseline.
    Avx = 1,
    /// AVX2: integer operations on 256-bit registers.
    Avx2 = 2,
    /// FMA3 fused multiply-add.
    Fma = 3,
    /// AVX-512 Foundation: 512-bit registers and opmasks.
    Avx512f = 4,
    /// AVX-512 Byte and Word instructions.
    Avx512bw = 5,
    /// AVX-512 Doubleword and Quadword instructions.
    Avx512dq = 6,
    /// AVX-512 Vector Length extensions (EVEX at 128/256 bits).
    Avx512vl = 7,
    /// AVX-512 Vector Byte Manipulation Instructions.
    Avx512vbmi = 8,
    /// AVX-512 VBMI2 (compress/expand on byte and word elements).
    Avx512vbmi2 = 9,
}

impl CpuFeature {
    /// All known features, in bit order.
    pub const ALL: [CpuFeature; 10] = [
        CpuFeature::Sse2,
        CpuFeature::Avx,
        CpuFeature::Avx2,
        CpuFeature::Fma,
        CpuFeature::Avx512f,
        CpuFeature::Avx512bw,
        CpuFeature::Avx512dq,
        CpuFeature::Avx512vl,
        CpuFeature::Avx512vbmi,
        CpuFeature::Avx512vbmi2,
    ];

    /// Canonical lowercase name, matching `is_x86_feature_detected!` spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CpuFeature::Sse2 => "sse2",
            CpuFeature::Avx => "avx",
            CpuFeature::Avx2 => "avx2",
            CpuFeature::Fma => "fma",
            CpuFeature::Avx512f => "avx512f",
            CpuFeature::Avx512bw => "avx512bw",
            CpuFeature::Avx512dq => "avx512dq",
            CpuFeature::Avx512vl => "avx512vl",
            CpuFeature::Avx512vbmi => "avx512vbmi",
            CpuFeature::Avx512vbmi2 => "avx512vbmi2",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for CpuFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CpuFeature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CpuFeature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_owned()))
    }
}

/// An unordered set of [`CpuFeature`] flags, stored as a bitset.
///
/// `Copy` and cheap to pass by value; all set operations are `const`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureSet(u16);

impl FeatureSet {
    /// The empty set (no vector support at all).
    pub const NONE: Self = Self(0);

    /// Build a set from a slice of features.
    #[must_use]
    pub const fn of(features: &[CpuFeature]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < features.len() {
            bits |= features[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Does this set contain `feature`?
    #[inline]
    #[must_use]
    pub const fn has(self, feature: CpuFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// This set plus `feature`.
    #[must_use]
    pub const fn with(self, feature: CpuFeature) -> Self {
        Self(self.0 | feature.bit())
    }

    /// This set minus `feature`.
    #[must_use]
    pub const fn without(self, feature: CpuFeature) -> Self {
        Self(self.0 & !feature.bit())
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Is this the empty set?
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The "full" AVX-512 subset: F, BW, DQ and VL together.
    ///
    /// Several policies key on this combination: ZMM registers are only worth
    /// using, and opmask registers only fully usable, when all four are
    /// present.
    #[must_use]
    pub const fn has_full_avx512(self) -> bool {
        self.has(CpuFeature::Avx512f)
            && self.has(CpuFeature::Avx512bw)
            && self.has(CpuFeature::Avx512dq)
            && self.has(CpuFeature::Avx512vl)
    }

    /// Iterate over the contained features.
    pub fn iter(self) -> impl Iterator<Item = CpuFeature> {
        CpuFeature::ALL.into_iter().filter(move |f| self.has(*f))
    }

    /// Probe the running CPU. Detected once, then cached.
    #[must_use]
    pub fn detect_host() -> Self {
        static HOST_FEATURES: OnceLock<FeatureSet> = OnceLock::new();
        *HOST_FEATURES.get_or_init(Self::detect_host_uncached)
    }

    #[cfg(target_arch = "x86_64")]
    fn detect_host_uncached() -> Self {
        let mut set = Self::NONE;
        if is_x86_feature_detected!("sse2") {
            set = set.with(CpuFeature::Sse2);
        }
        if is_x86_feature_detected!("avx") {
            set = set.with(CpuFeature::Avx);
        }
        if is_x86_feature_detected!("avx2") {
            set = set.with(CpuFeature::Avx2);
        }
        if is_x86_feature_detected!("fma") {
            set = set.with(CpuFeature::Fma);
        }
        if is_x86_feature_detected!("avx512f") {
            set = set.with(CpuFeature::Avx512f);
        }
        if is_x86_feature_detected!("avx512bw") {
            set = set.with(CpuFeature::Avx512bw);
        }
        if is_x86_feature_detected!("avx512dq") {
            set = set.with(CpuFeature::Avx512dq);
        }
        if is_x86_feature_detected!("avx512vl") {
            set = set.with(CpuFeature::Avx512vl);
        }
        if is_x86_feature_detected!("avx512vbmi") {
            set = set.with(CpuFeature::Avx512vbmi);
        }
        if is_x86_feature_detected!("avx512vbmi2") {
            set = set.with(CpuFeature::Avx512vbmi2);
        }
        set
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn detect_host_uncached() -> Self {
        // Non-x86 hosts cross-compiling for x86 targets configure features
        // explicitly; the host probe reports nothing.
        Self::NONE
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for feature in self.iter() {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(feature.name())?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

impl FromIterator<CpuFeature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = CpuFeature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, FeatureSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership_roundtrip() {
        let set = FeatureSet::of(&[CpuFeature::Avx, CpuFeature::Avx2]);
        assert!(set.has(CpuFeature::Avx));
        assert!(set.has(CpuFeature::Avx2));
        assert!(!set.has(CpuFeature::Avx512f));
        assert_eq!(set.without(CpuFeature::Avx2), FeatureSet::of(&[CpuFeature::Avx]));
    }

    #[test]
    fn full_avx512_requires_all_four_subsets() {
        let mut set = FeatureSet::of(&[
            CpuFeature::Avx512f,
            CpuFeature::Avx512bw,
            CpuFeature::Avx512dq,
        ]);
        assert!(!set.has_full_avx512());
        set = set.with(CpuFeature::Avx512vl);
        assert!(set.has_full_avx512());
    }

    #[test]
    fn feature_names_parse_back() {
        for feature in CpuFeature::ALL {
            assert_eq!(feature.name().parse::<CpuFeature>().unwrap(), feature);
        }
        assert!("avx1024".parse::<CpuFeature>().is_err());
    }

    #[test]
    fn host_detection_is_stable() {
        assert_eq!(FeatureSet::detect_host(), FeatureSet::detect_host());
    }

    #[test]
    fn display_joins_names() {
        let set = FeatureSet::of(&[CpuFeature::Avx, CpuFeature::Fma]);
        assert_eq!(set.to_string(), "avx+fma");
        assert_eq!(FeatureSet::NONE.to_string(), "none");
    }
}
