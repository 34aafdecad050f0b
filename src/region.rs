// 🗺️ Region Table - Administrative division reference data
//
// Three-level mapping: category → numeric code → display name.
// District names are composite: "<district name> -- <postal code>".
//
// Loaded once at startup, immutable afterwards. A missing key resolves to an
// empty string, never an error.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Separator inside composite district entries
pub const DISTRICT_DELIMITER: &str = " -- ";

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionCategory {
    Province,
    City,
    District,
}

impl RegionCategory {
    pub const ALL: [RegionCategory; 3] = [
        RegionCategory::Province,
        RegionCategory::City,
        RegionCategory::District,
    ];

    /// Key used in the reference data file
    pub fn key(&self) -> &'static str {
        match self {
            RegionCategory::Province => "province",
            RegionCategory::City => "city",
            RegionCategory::District => "district",
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum RegionTableError {
    #[error("cannot read region table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed region table: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// DISTRICT
// ============================================================================

/// A composite district entry split into its two parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct District<'a> {
    pub name: &'a str,
    pub postal_code: &'a str,
}

impl<'a> District<'a> {
    /// Split "<name> -- <postal code>"; anything but exactly two parts is rejected
    pub fn split(entry: &'a str) -> Option<Self> {
        let mut parts = entry.split(DISTRICT_DELIMITER);
        let name = parts.next()?;
        let postal_code = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(District { name, postal_code })
    }
}

// ============================================================================
// REGION TABLE
// ============================================================================

/// On-disk shape of the reference data
#[derive(Debug, Default, Deserialize)]
struct RawTable {
    #[serde(default)]
    province: BTreeMap<String, String>,
    #[serde(default)]
    city: BTreeMap<String, String>,
    #[serde(default)]
    district: BTreeMap<String, String>,
}

/// Read-only lookup of province, city and district names
#[derive(Debug, Clone)]
pub struct RegionTable {
    province: BTreeMap<String, String>,
    city: BTreeMap<String, String>,
    district: BTreeMap<String, String>,
    digest: String,
}

impl RegionTable {
    /// Load the table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegionTableError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading region table");

        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;

        tracing::info!(
            path = %path.display(),
            provinces = table.len(RegionCategory::Province),
            cities = table.len(RegionCategory::City),
            districts = table.len(RegionCategory::District),
            digest = %table.digest(),
            "region table loaded"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegionTableError> {
        let raw: RawTable = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegionTableError> {
        let raw: RawTable = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Start an in-memory table
    pub fn builder() -> RegionTableBuilder {
        RegionTableBuilder::default()
    }

    fn from_raw(raw: RawTable) -> Self {
        let mut table = RegionTable {
            province: raw.province,
            city: raw.city,
            district: raw.district,
            digest: String::new(),
        };
        table.digest = table.compute_digest();
        table
    }

    fn entries(&self, category: RegionCategory) -> &BTreeMap<String, String> {
        match category {
            RegionCategory::Province => &self.province,
            RegionCategory::City => &self.city,
            RegionCategory::District => &self.district,
        }
    }

    /// Raw entry for a string key, or "" when absent
    pub fn lookup(&self, category: RegionCategory, key: &str) -> &str {
        self.entries(category)
            .get(key)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Entry for a numeric code, keyed by its decimal form
    pub fn name(&self, category: RegionCategory, code: u32) -> &str {
        self.lookup(category, &code.to_string())
    }

    /// Composite district entry split into name and postal code
    pub fn district(&self, code: u32) -> Option<District<'_>> {
        District::split(self.name(RegionCategory::District, code))
    }

    pub fn len(&self, category: RegionCategory) -> usize {
        self.entries(category).len()
    }

    pub fn is_empty(&self) -> bool {
        RegionCategory::ALL.iter().all(|c| self.entries(*c).is_empty())
    }

    /// SHA-256 over the table contents, hex encoded
    ///
    /// Independent of file formatting and key order, so two files with the
    /// same entries share a digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    fn compute_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for category in RegionCategory::ALL {
            hasher.update(category.key());
            hasher.update([0u8]);
            for (code, name) in self.entries(category) {
                hasher.update(code);
                hasher.update([0u8]);
                hasher.update(name);
                hasher.update([0u8]);
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Debug, Default)]
pub struct RegionTableBuilder {
    raw: RawTable,
}

impl RegionTableBuilder {
    pub fn province(mut self, code: &str, name: &str) -> Self {
        self.raw.province.insert(code.to_string(), name.to_string());
        self
    }

    pub fn city(mut self, code: &str, name: &str) -> Self {
        self.raw.city.insert(code.to_string(), name.to_string());
        self
    }

    /// Add a district, composing the entry from name and postal code
    pub fn district(mut self, code: &str, name: &str, postal_code: &str) -> Self {
        self.raw.district.insert(
            code.to_string(),
            format!("{}{}{}", name, DISTRICT_DELIMITER, postal_code),
        );
        self
    }

    /// Add a district entry verbatim (may be malformed)
    pub fn district_raw(mut self, code: &str, entry: &str) -> Self {
        self.raw.district.insert(code.to_string(), entry.to_string());
        self
    }

    pub fn build(self) -> RegionTable {
        RegionTable::from_raw(self.raw)
    }
}

// ============================================================================
// TESTS
// ============================================================================
