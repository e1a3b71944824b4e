//! # LaneCap Core
//!
//! SIMD legality oracle for auto-vectorizing compiler backends.
//!
//! For every SIMD-eligible operation an auto-vectorizer wants to emit,
//! LaneCap answers exactly one question: *what is the maximum element count
//! N (a power of two) for which this operation on this element width is
//! guaranteed available on the target machine?* Legality is encoded as
//! per-category capability tables over independently-composable AVX feature
//! extensions, with the numeric edge cases (range-dependent conversion
//! legality, unsigned-compare simulation) and downgrade policies layered on
//! top.
//!
//! ## Features
//!
//! - **Eight capability categories**: arithmetic, convert, compare,
//!   blend/select, gather, permute, compress/expand and opmask logic
//! - **Per-tier predicates**: one entry can demand AVX at XMM, AVX2 at YMM
//!   and an AVX-512 subset at ZMM
//! - **Cross-cutting policies**: reference-vector capping, mask/blend
//!   legalization, unsigned-compare simulation, mantissa-envelope checks
//! - **Retargetable**: one profile swap for cross-compilation, lock-free
//!   queries everywhere else
//!
//! ## Quick Start
//!
//! ```rust
//! use lanecap_core::{
//!     ArithOp, CpuFeature, ElementStamp, FeatureSet, IntOp, MachineProfile, VectorOracle,
//!     VectorizerConfig,
//! };
//!
//! let config = VectorizerConfig::default();
//! let features = FeatureSet::of(&[CpuFeature::Sse2, CpuFeature::Avx, CpuFeature::Avx2]);
//! let oracle = VectorOracle::new(MachineProfile::new(features, &config));
//!
//! // A 32-bit integer add on an AVX2 machine runs 8 lanes per instruction.
//! let lanes = oracle.supported_arithmetic_length(
//!     &ElementStamp::int(32),
//!     16,
//!     ArithOp::Int(IntOp::Add),
//! );
//! assert_eq!(lanes, 8);
//! ```
//!
//! A result of 1 is the ordinary "stay scalar" answer — callers must treat
//! it as a normal outcome, not an error.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod features;
pub mod ops;
pub mod oracle;
pub mod profile;
pub mod requirement;
pub mod resolver;
pub mod stamp;
pub mod tables;
#[cfg(test)]
mod tables_tests;
pub mod width;

pub use config::VectorizerConfig;
pub use error::{Error, Result};
pub use features::{CpuFeature, FeatureSet};
pub use ops::{
    ArithOp, CompareCondition, ConvertClass, FloatConvertClass, FloatOp, IntConvertClass, IntOp,
    LogicOp, MaskOp, MaySimulateUnsigned, VectorOp,
};
pub use oracle::VectorOracle;
pub use profile::{MachineProfile, TargetDescription};
pub use requirement::TierRequirement;
pub use stamp::{ElementStamp, FloatRange, FloatStamp, IntRange, IntStamp};
pub use width::VectorWidth;
