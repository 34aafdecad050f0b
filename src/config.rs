// ⚙️ Settings - Where the reference data lives and what the decoder derives
//
// Environment:
//   SIN_REGION_TABLE  path to region.json      (default: region.json)
//   SIN_TIER          minimal | full           (default: full)
//   SIN_BIND_ADDR     server listen address    (default: 127.0.0.1:3000)

use crate::decoder::{Decoder, FeatureTier};
use crate::region::RegionTable;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

pub const ENV_REGION_TABLE: &str = "SIN_REGION_TABLE";
pub const ENV_TIER: &str = "SIN_TIER";
pub const ENV_BIND_ADDR: &str = "SIN_BIND_ADDR";

pub const DEFAULT_REGION_TABLE: &str = "region.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub region_table: PathBuf,
    pub tier: FeatureTier,
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            region_table: PathBuf::from(DEFAULT_REGION_TABLE),
            tier: FeatureTier::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Settings {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by any key → value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = lookup(ENV_REGION_TABLE).filter(|v| !v.is_empty()) {
            settings.region_table = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_TIER) {
            match raw.parse::<FeatureTier>() {
                Ok(tier) => settings.tier = tier,
                Err(e) => tracing::warn!(%e, "ignoring {}, using {}", ENV_TIER, settings.tier),
            }
        }

        if let Some(addr) = lookup(ENV_BIND_ADDR).filter(|v| !v.is_empty()) {
            settings.bind_addr = addr;
        }

        settings
    }

    /// Load the region table once and wrap it in a decoder
    ///
    /// Failing here is a startup failure; callers should abort.
    pub fn build_decoder(&self) -> Result<Decoder> {
        let table = RegionTable::load(&self.region_table).with_context(|| {
            format!(
                "failed to load region table from {}",
                self.region_table.display()
            )
        })?;

        Ok(Decoder::new(Arc::new(table)).with_tier(self.tier))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[]));

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.region_table, PathBuf::from("region.json"));
        assert_eq!(settings.tier, FeatureTier::Full);
        assert_eq!(settings.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_REGION_TABLE, "/data/region.json"),
            (ENV_TIER, "minimal"),
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
        ]));

        assert_eq!(settings.region_table, PathBuf::from("/data/region.json"));
        assert_eq!(settings.tier, FeatureTier::Minimal);
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_unknown_tier_keeps_default() {
        let settings = Settings::from_lookup(lookup_from(&[(ENV_TIER, "everything")]));
        assert_eq!(settings.tier, FeatureTier::Full);
    }

    #[test]
    fn test_build_decoder_missing_table() {
        let settings = Settings {
            region_table: PathBuf::from("/definitely/not/here/region.json"),
            ..Settings::default()
        };

        let err = settings.build_decoder().unwrap_err();
        assert!(err.to_string().contains("failed to load region table"));
    }

    #[test]
    fn test_build_decoder_bundled_table() {
        let settings = Settings {
            region_table: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_REGION_TABLE),
            tier: FeatureTier::Minimal,
            ..Settings::default()
        };

        let decoder = settings.build_decoder().unwrap();
        assert_eq!(decoder.tier(), FeatureTier::Minimal);
        assert!(!decoder.table().is_empty());
    }
}
