//! Vectorizer configuration.
//!
//! A [`VectorizerConfig`] collects the knobs a compiler embedding the oracle
//! exposes: whether vectorization is on, the vector byte cap, reference
//! vector handling, and the target feature set. Values merge from built-in
//! defaults, an optional TOML file, and `LANECAP_*` environment variables,
//! in that order.
//!
//! ```toml
//! # lanecap.toml
//! enabled = true
//! max_vector_bytes = 32
//! features = ["sse2", "avx", "avx2", "fma"]
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::{CpuFeature, FeatureSet};

/// Environment variable prefix for overrides (`LANECAP_ENABLED`, ...).
const ENV_PREFIX: &str = "LANECAP_";

/// Configuration of the vectorization capability oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VectorizerConfig {
    /// Master switch; when off every query answers 1.
    pub enabled: bool,
    /// Configured maximum vector register bytes. May be set below the
    /// hardware maximum to keep the vectorizer narrow; must be a power of
    /// two.
    pub max_vector_bytes: usize,
    /// Whether object-reference vectors may be formed at all.
    pub object_vectorization: bool,
    /// Whether object references are compressed (4-byte lanes) or full
    /// width (8-byte lanes).
    pub compressed_references: bool,
    /// Heap object alignment in bytes.
    pub object_alignment: usize,
    /// Target feature names, or the single entry `"host"` to probe the
    /// running CPU.
    pub features: Vec<String>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_vector_bytes: 64,
            object_vectorization: true,
            compressed_references: true,
            object_alignment: 8,
            features: vec!["host".to_owned()],
        }
    }
}

impl VectorizerConfig {
    /// Load configuration from defaults, then `path` (if given), then
    /// `LANECAP_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        tracing::debug!(?config, "loaded vectorizer configuration");
        Ok(config)
    }

    /// Check the invariants the oracle depends on.
    pub fn validate(&self) -> Result<()> {
        if !self.max_vector_bytes.is_power_of_two() {
            return Err(Error::InvalidVectorWidth(self.max_vector_bytes));
        }
        // Resolve feature names eagerly so typos fail at load time.
        self.feature_set().map(|_| ())
    }

    /// Resolve the configured feature names to a [`FeatureSet`].
    ///
    /// The single entry `"host"` probes the running CPU; anything else must
    /// be a known feature name.
    pub fn feature_set(&self) -> Result<FeatureSet> {
        if self.features.len() == 1 && self.features[0] == "host" {
            return Ok(FeatureSet::detect_host());
        }
        let mut set = FeatureSet::NONE;
        for name in &self.features {
            set = set.with(name.parse::<CpuFeature>()?);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = VectorizerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert_eq!(config.max_vector_bytes, 64);
    }

    #[test]
    fn explicit_features_parse() {
        let config = VectorizerConfig {
            features: vec!["sse2".into(), "avx".into(), "avx2".into()],
            ..VectorizerConfig::default()
        };
        let set = config.feature_set().unwrap();
        assert!(set.has(CpuFeature::Avx2));
        assert!(!set.has(CpuFeature::Avx512f));
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let config = VectorizerConfig {
            features: vec!["avx99".into()],
            ..VectorizerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::UnknownFeature(name)) if name == "avx99"
        ));
    }

    #[test]
    fn non_power_of_two_cap_is_rejected() {
        let config = VectorizerConfig {
            max_vector_bytes: 48,
            ..VectorizerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidVectorWidth(48))
        ));
    }
}
