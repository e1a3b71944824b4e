//! Machine profile: the target description and its one reconfiguration
//! operation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::VectorizerConfig;
use crate::features::{CpuFeature, FeatureSet};

/// Immutable snapshot of the retargetable part of a machine profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDescription {
    /// Instruction-set features of the target.
    pub features: FeatureSet,
    /// Effective maximum vector register bytes the compiler will use.
    pub max_vector_bytes: usize,
}

impl TargetDescription {
    /// Build a snapshot, deriving the effective vector byte capacity.
    ///
    /// The effective capacity is the configured cap bounded by the physical
    /// register capacity the feature set implies, and additionally by 32
    /// bytes unless the full AVX-512 subset (F+BW+DQ+VL) is present — ZMM
    /// registers are not worth using on partial subsets.
    #[must_use]
    pub fn new(features: FeatureSet, configured_max_bytes: usize) -> Self {
        let physical = if features.has(CpuFeature::Avx512f) {
            64
        } else if features.has(CpuFeature::Avx) {
            32
        } else {
            16
        };
        let desired = if features.has_full_avx512() { 64 } else { 32 };
        Self {
            features,
            max_vector_bytes: configured_max_bytes.min(physical).min(desired),
        }
    }

    /// Build a snapshot with an exact byte capacity, no derivation. Intended
    /// for tests and tools that model hypothetical targets.
    #[must_use]
    pub const fn with_max_bytes(features: FeatureSet, max_vector_bytes: usize) -> Self {
        Self {
            features,
            max_vector_bytes,
        }
    }
}

/// The target machine as the oracle sees it.
///
/// Read-only for the lifetime of a compilation; [`retarget`](Self::retarget)
/// is the single reconfiguration entry point and must happen-before any
/// subsequent query (do it during the single-threaded reconfiguration phase,
/// before parallel compilation resumes). Concurrent queries without a
/// concurrent retarget are safe and lock-free.
#[derive(Debug)]
pub struct MachineProfile {
    target: ArcSwap<TargetDescription>,
    enabled: bool,
    object_vectorization: bool,
    reference_bytes: usize,
    object_alignment: usize,
    /// Cached unconstrained maximum length; 0 means "not computed".
    /// Recomputing is idempotent, so a race only costs a duplicate compute.
    cached_unconstrained: AtomicUsize,
}

impl MachineProfile {
    /// Profile for an explicit feature set, with the remaining knobs taken
    /// from `config`.
    #[must_use]
    pub fn new(features: FeatureSet, config: &VectorizerConfig) -> Self {
        Self {
            target: ArcSwap::from_pointee(TargetDescription::new(
                features,
                config.max_vector_bytes,
            )),
            enabled: config.enabled,
            object_vectorization: config.object_vectorization,
            reference_bytes: if config.compressed_references { 4 } else { 8 },
            object_alignment: config.object_alignment,
            cached_unconstrained: AtomicUsize::new(0),
        }
    }

    /// Profile for the running host.
    #[must_use]
    pub fn for_host(config: &VectorizerConfig) -> Self {
        Self::new(FeatureSet::detect_host(), config)
    }

    /// Current target snapshot (cheap copy).
    #[inline]
    #[must_use]
    pub fn target(&self) -> TargetDescription {
        **self.target.load()
    }

    /// Is vectorization enabled at all?
    #[inline]
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// May object-reference vectors be formed?
    #[inline]
    #[must_use]
    pub const fn object_vectorization(&self) -> bool {
        self.object_vectorization
    }

    /// Byte stride of an object reference lane (4 with compressed
    /// references, 8 without).
    #[inline]
    #[must_use]
    pub const fn reference_bytes(&self) -> usize {
        self.reference_bytes
    }

    /// Reference lane width in bits.
    #[inline]
    #[must_use]
    pub const fn reference_bits(&self) -> u32 {
        (self.reference_bytes * 8) as u32
    }

    /// Heap object alignment in bytes.
    #[inline]
    #[must_use]
    pub const fn object_alignment(&self) -> usize {
        self.object_alignment
    }

    /// Replace the target and drop every cached derived value.
    ///
    /// To be called only when reconfiguring the compiler for a different
    /// runtime target; at most once between compilation sessions, never
    /// concurrently with queries on the same profile.
    pub fn retarget(&self, features: FeatureSet, configured_max_bytes: usize) {
        let next = TargetDescription::new(features, configured_max_bytes);
        tracing::debug!(features = %features, max_vector_bytes = next.max_vector_bytes, "retargeting machine profile");
        self.target.store(Arc::new(next));
        self.cached_unconstrained.store(0, Ordering::Release);
    }

    pub(crate) fn cached_unconstrained(&self) -> Option<usize> {
        match self.cached_unconstrained.load(Ordering::Acquire) {
            0 => None,
            n => Some(n),
        }
    }

    pub(crate) fn store_unconstrained(&self, length: usize) {
        self.cached_unconstrained
            .store(length.max(1), Ordering::Release);
    }
}
