//! Prints a capability report for the running host (or a feature set given
//! on the command line).
//!
//! ```bash
//! cargo run --example probe
//! cargo run --example probe -- avx avx2 fma
//! ```

use anyhow::Result;
use serde_json::json;

use lanecap_core::{
    ArithOp, CompareCondition, CpuFeature, ElementStamp, FeatureSet, FloatOp, IntOp,
    MachineProfile, VectorOracle, VectorizerConfig,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let features = if args.is_empty() {
        FeatureSet::detect_host()
    } else {
        let mut set = FeatureSet::NONE;
        for name in &args {
            set = set.with(name.parse::<CpuFeature>()?);
        }
        set
    };

    let config = VectorizerConfig::default();
    let oracle = VectorOracle::new(MachineProfile::new(features, &config));

    let mut arithmetic = serde_json::Map::new();
    for bits in [8u32, 16, 32, 64] {
        let stamp = ElementStamp::int(bits);
        arithmetic.insert(
            format!("i{bits}_add"),
            oracle
                .supported_arithmetic_length(&stamp, usize::MAX, ArithOp::Int(IntOp::Add))
                .into(),
        );
        arithmetic.insert(
            format!("i{bits}_mul"),
            oracle
                .supported_arithmetic_length(&stamp, usize::MAX, ArithOp::Int(IntOp::Mul))
                .into(),
        );
    }
    for bits in [32u32, 64] {
        let stamp = ElementStamp::float(bits);
        arithmetic.insert(
            format!("f{bits}_fma"),
            oracle
                .supported_arithmetic_length(&stamp, usize::MAX, ArithOp::Float(FloatOp::Fma))
                .into(),
        );
    }

    let report = json!({
        "features": features.to_string(),
        "max_vector_bytes": oracle.profile().target().max_vector_bytes,
        "unconstrained_max_length": oracle.unconstrained_max_length(),
        "logic_vectors_are_bitmasks": oracle.logic_vectors_are_bitmasks(),
        "arithmetic": arithmetic,
        "unsigned_i32_compare": oracle.supported_comparison_length(
            &ElementStamp::int(32),
            CompareCondition::BelowThan,
            usize::MAX,
        ),
        "reference_move": oracle.supported_move_length(&ElementStamp::Object, usize::MAX),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
