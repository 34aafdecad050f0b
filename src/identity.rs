// 🪪 Parsed Identity - Output record of the decoder
//
// Built fresh per call and never mutated afterwards. Holds copies of the
// resolved names, not references into the region table.

use crate::zodiac::Zodiac;
use serde::Serialize;

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PARSED IDENTITY
// ============================================================================

/// Demographic fields decoded from one Single Identity Number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsedIdentity {
    // Region
    #[serde(rename = "ProvinceID")]
    pub province_id: u32,
    pub province_name: String,
    #[serde(rename = "CityID")]
    pub city_id: u32,
    pub city_name: String,
    #[serde(rename = "DistrictID")]
    pub district_id: u32,
    pub district_name: String,
    pub postal_code: String,

    // Person
    pub gender: Gender,
    pub born_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zodiac: Option<Zodiac>,

    /// Trailing serial, opaque
    pub unique_code: String,

    pub is_valid: bool,
}

impl ParsedIdentity {
    /// Every region name resolved against the table
    pub fn region_resolved(&self) -> bool {
        !self.province_name.is_empty()
            && !self.city_name.is_empty()
            && !self.district_name.is_empty()
            && !self.postal_code.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
