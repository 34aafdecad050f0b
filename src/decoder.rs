// 🔍 SIN Decoder
//
// Field layout (0-indexed, half-open):
//   [0,2)   province code
//   [0,4)   city code      (province + 2 digits)
//   [0,6)   district code  (city + 2 digits)
//   [6,8)   day of month, +40 for women
//   [8,10)  month
//   [10,12) two-digit year
//   [12,16) unique serial, opaque
//
// Pure function of the input, the region table and the reference date.

use crate::birth::{self, BirthDate};
use crate::error::{DecodeError, DecodeResult, Field};
use crate::identity::ParsedIdentity;
use crate::region::{RegionCategory, RegionTable};
use crate::zodiac::Zodiac;
use chrono::{Local, NaiveDate};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Length of a Single Identity Number, in characters
pub const SIN_LENGTH: usize = 16;

/// Start of the opaque serial
const UNIQUE_CODE_START: usize = 12;

// ============================================================================
// FEATURE TIER
// ============================================================================

/// How much the decoder derives beyond region, gender and born date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureTier {
    /// No age, no zodiac
    Minimal,
    /// Age and zodiac; validity also requires a non-zero age
    #[default]
    Full,
}

impl FeatureTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureTier::Minimal => "minimal",
            FeatureTier::Full => "full",
        }
    }
}

impl std::fmt::Display for FeatureTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown feature tier {0:?} (expected \"minimal\" or \"full\")")]
pub struct ParseTierError(pub String);

impl FromStr for FeatureTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(FeatureTier::Minimal),
            "full" => Ok(FeatureTier::Full),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

// ============================================================================
// RAW FIELDS
// ============================================================================

/// Numeric fields sliced out of a well-formed number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawFields<'a> {
    province: u32,
    city: u32,
    district: u32,
    day: u32,
    month: u32,
    year: u32,
    unique_code: &'a str,
}

impl<'a> RawFields<'a> {
    fn slice(sin: &'a str) -> DecodeResult<Self> {
        let length = sin.chars().count();
        if length != SIN_LENGTH {
            return Err(DecodeError::Format { length });
        }

        let province = two_digits(sin, Field::Province)?;
        let city = province * 100 + two_digits(sin, Field::City)?;
        let district = city * 100 + two_digits(sin, Field::District)?;
        let day = two_digits(sin, Field::Day)?;
        let month = two_digits(sin, Field::Month)?;
        let year = two_digits(sin, Field::Year)?;

        // Everything before the serial is ASCII by now, so this is a char boundary
        let unique_code = &sin[UNIQUE_CODE_START..];

        Ok(RawFields {
            province,
            city,
            district,
            day,
            month,
            year,
            unique_code,
        })
    }
}

/// Value of a two-digit field, or `FieldFormat` naming it
fn two_digits(sin: &str, field: Field) -> DecodeResult<u32> {
    let range = field.range();
    let bytes = &sin.as_bytes()[range.clone()];

    if !bytes.iter().all(u8::is_ascii_digit) {
        let value = sin.chars().skip(range.start).take(range.len()).collect();
        return Err(DecodeError::FieldFormat { field, value });
    }

    Ok(bytes
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
}

// ============================================================================
// DECODER
// ============================================================================

/// Decodes Single Identity Numbers against a shared, read-only region table
#[derive(Debug, Clone)]
pub struct Decoder {
    table: Arc<RegionTable>,
    tier: FeatureTier,
}

impl Decoder {
    pub fn new(table: Arc<RegionTable>) -> Self {
        Decoder {
            table,
            tier: FeatureTier::default(),
        }
    }

    /// Builder pattern: choose the feature tier
    pub fn with_tier(mut self, tier: FeatureTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn tier(&self) -> FeatureTier {
        self.tier
    }

    pub fn table(&self) -> &RegionTable {
        &self.table
    }

    /// Decode using today's local date as the reference
    pub fn parse(&self, sin: &str) -> DecodeResult<ParsedIdentity> {
        self.parse_at(sin, Local::now().date_naive())
    }

    /// Decode with an explicit reference date
    ///
    /// `today` picks the century of the two-digit year and is the date the
    /// age is measured on.
    pub fn parse_at(&self, sin: &str, today: NaiveDate) -> DecodeResult<ParsedIdentity> {
        let fields = RawFields::slice(sin)?;

        // Birth
        let (gender, day) = birth::decode_day(fields.day);
        let year = birth::expand_year(fields.year, today);
        let born = BirthDate::new(day, fields.month, year);

        let (age, zodiac) = match self.tier {
            FeatureTier::Minimal => (None, None),
            FeatureTier::Full => {
                let born_on = born.to_naive_date()?;
                (
                    Some(birth::age_on(born_on, today)),
                    Some(Zodiac::from_month_day(fields.month, day)),
                )
            }
        };

        // Region
        let province_name = self.table.name(RegionCategory::Province, fields.province);
        let city_name = self.table.name(RegionCategory::City, fields.city);
        let (district_name, postal_code) = self
            .table
            .district(fields.district)
            .map(|d| (d.name, d.postal_code))
            .unwrap_or_default();

        let mut identity = ParsedIdentity {
            province_id: fields.province,
            province_name: province_name.to_string(),
            city_id: fields.city,
            city_name: city_name.to_string(),
            district_id: fields.district,
            district_name: district_name.to_string(),
            postal_code: postal_code.to_string(),
            gender,
            born_date: born.display(),
            age,
            zodiac,
            unique_code: fields.unique_code.to_string(),
            is_valid: false,
        };
        identity.is_valid = is_valid(&identity);

        Ok(identity)
    }
}

/// All region names resolved, and a non-zero age when age is computed
fn is_valid(identity: &ParsedIdentity) -> bool {
    identity.region_resolved() && identity.age.map_or(true, |age| age != 0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Gender;

    fn table() -> Arc<RegionTable> {
        Arc::new(
            RegionTable::builder()
                .province("32", "West Java")
                .city("3204", "Bandung")
                .district("320411", "Sumur Bandung", "40123")
                .build(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_raw_fields_slice() {
        let fields = RawFields::slice("3204110609970001").unwrap();

        assert_eq!(fields.province, 32);
        assert_eq!(fields.city, 3204);
        assert_eq!(fields.district, 320411);
        assert_eq!(fields.day, 6);
        assert_eq!(fields.month, 9);
        assert_eq!(fields.year, 97);
        assert_eq!(fields.unique_code, "0001");
    }

    #[test]
    fn test_unique_code_is_opaque() {
        let fields = RawFields::slice("320411060997AB-é").unwrap();
        assert_eq!(fields.unique_code, "AB-é");
    }

    #[test]
    fn test_wrong_length() {
        let decoder = Decoder::new(table());

        for sin in ["", "320411060997000", "32041106099700011"] {
            let err = decoder.parse_at(sin, today()).unwrap_err();
            assert_eq!(err, DecodeError::Format { length: sin.len() });
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // 16 characters, 17 bytes
        let fields = RawFields::slice("32041106099700é1").unwrap();
        assert_eq!(fields.unique_code, "00é1");

        // 15 characters, 16 bytes
        let err = RawFields::slice("320411060997é01").unwrap_err();
        assert_eq!(err, DecodeError::Format { length: 15 });
    }

    #[test]
    fn test_non_digit_names_field() {
        let cases = [
            ("X204110609970001", Field::Province, "X2"),
            ("32A4110609970001", Field::City, "A4"),
            ("32041-0609970001", Field::District, "1-"),
            ("3204110 09970001", Field::Day, "0 "),
            ("320411060x970001", Field::Month, "0x"),
            ("32041106099?0001", Field::Year, "9?"),
            ("é204110609970001", Field::Province, "é2"),
        ];

        for (sin, field, value) in cases {
            let err = RawFields::slice(sin).unwrap_err();
            assert_eq!(
                err,
                DecodeError::FieldFormat {
                    field,
                    value: value.to_string()
                },
                "{}",
                sin
            );
        }
    }

    #[test]
    fn test_parse_full_tier() {
        let decoder = Decoder::new(table());
        let identity = decoder.parse_at("3204110609970001", today()).unwrap();

        assert_eq!(identity.province_id, 32);
        assert_eq!(identity.province_name, "West Java");
        assert_eq!(identity.city_id, 3204);
        assert_eq!(identity.city_name, "Bandung");
        assert_eq!(identity.district_id, 320411);
        assert_eq!(identity.district_name, "Sumur Bandung");
        assert_eq!(identity.postal_code, "40123");
        assert_eq!(identity.gender, Gender::Male);
        assert_eq!(identity.born_date, "6 September 1997");
        assert_eq!(identity.age, Some(29));
        assert_eq!(identity.zodiac, Some(Zodiac::Virgo));
        assert_eq!(identity.unique_code, "0001");
        assert!(identity.is_valid);
    }

    #[test]
    fn test_parse_minimal_tier() {
        let decoder = Decoder::new(table()).with_tier(FeatureTier::Minimal);
        let identity = decoder.parse_at("3204110609970001", today()).unwrap();

        assert_eq!(identity.age, None);
        assert_eq!(identity.zodiac, None);
        assert!(identity.is_valid);
    }

    #[test]
    fn test_parse_female() {
        let decoder = Decoder::new(table());
        let identity = decoder.parse_at("3204114609970001", today()).unwrap();

        assert_eq!(identity.gender, Gender::Female);
        assert_eq!(identity.born_date, "6 September 1997");
    }

    #[test]
    fn test_day_forty() {
        // Male, day 40: kept as-is without the age step
        let minimal = Decoder::new(table()).with_tier(FeatureTier::Minimal);
        let identity = minimal.parse_at("3204114009970001", today()).unwrap();
        assert_eq!(identity.gender, Gender::Male);
        assert_eq!(identity.born_date, "40 September 1997");

        // ...but it is not a real date, so the age step fails
        let full = Decoder::new(table());
        let err = full.parse_at("3204114009970001", today()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::DateParse {
                date: "40 September 1997".to_string()
            }
        );
    }

    #[test]
    fn test_unresolved_district_is_invalid() {
        let decoder = Decoder::new(table());
        let identity = decoder.parse_at("3204120609970001", today()).unwrap();

        assert_eq!(identity.province_name, "West Java");
        assert_eq!(identity.city_name, "Bandung");
        assert_eq!(identity.district_name, "");
        assert_eq!(identity.postal_code, "");
        assert!(!identity.is_valid);
    }

    #[test]
    fn test_zero_age_is_invalid() {
        let decoder = Decoder::new(table());

        // Born this year, before today → age 0
        let identity = decoder.parse_at("3204110101260001", today()).unwrap();
        assert_eq!(identity.born_date, "1 January 2026");
        assert_eq!(identity.age, Some(0));
        assert!(!identity.is_valid);

        // Same number without the age tier is valid
        let minimal = decoder.clone().with_tier(FeatureTier::Minimal);
        assert!(minimal.parse_at("3204110101260001", today()).unwrap().is_valid);
    }

    #[test]
    fn test_decoder_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();

        let decoder = Arc::new(Decoder::new(table()));
        let expected = decoder.parse_at("3204110609970001", today()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let decoder = Arc::clone(&decoder);
                std::thread::spawn(move || decoder.parse_at("3204110609970001", today()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(expected.clone()));
        }
    }

    #[test]
    fn test_feature_tier_from_str() {
        assert_eq!("minimal".parse::<FeatureTier>(), Ok(FeatureTier::Minimal));
        assert_eq!(" FULL ".parse::<FeatureTier>(), Ok(FeatureTier::Full));
        assert!("extended".parse::<FeatureTier>().is_err());
        assert_eq!(FeatureTier::default(), FeatureTier::Full);
    }
}
