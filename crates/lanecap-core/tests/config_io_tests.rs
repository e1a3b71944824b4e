//! Integration tests for configuration loading: TOML files and environment
//! overrides layered over defaults.

use std::io::Write;

use lanecap_core::{CpuFeature, VectorizerConfig};
use serial_test::serial;

// Every test here goes through `load`, which reads the process environment,
// so they are serialized against the env-mutating test below.

#[test]
#[serial]
fn toml_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
enabled = true
max_vector_bytes = 32
compressed_references = false
features = ["sse2", "avx", "avx2", "fma"]
"#
    )
    .unwrap();

    let config = VectorizerConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.max_vector_bytes, 32);
    assert!(!config.compressed_references);
    // Untouched fields keep their defaults.
    assert!(config.object_vectorization);
    assert_eq!(config.object_alignment, 8);

    let features = config.feature_set().unwrap();
    assert!(features.has(CpuFeature::Fma));
    assert!(!features.has(CpuFeature::Avx512f));
}

#[test]
#[serial]
fn bad_feature_name_in_file_fails_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"features = ["avx", "avx1024"]"#).unwrap();
    assert!(VectorizerConfig::load(Some(file.path())).is_err());
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_vector_bytes = 64").unwrap();

    std::env::set_var("LANECAP_MAX_VECTOR_BYTES", "16");
    let config = VectorizerConfig::load(Some(file.path()));
    std::env::remove_var("LANECAP_MAX_VECTOR_BYTES");

    assert_eq!(config.unwrap().max_vector_bytes, 16);
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    let config = VectorizerConfig::load(Some(std::path::Path::new(
        "/nonexistent/lanecap.toml",
    )))
    .unwrap();
    assert_eq!(config, VectorizerConfig::default());
}
