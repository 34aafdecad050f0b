// 🚫 Decode Errors
// Hard failures for structurally malformed numbers.
//
// Lookup misses (unknown region code, no zodiac range) are NOT errors:
// they degrade to empty fields and show up only through `is_valid`.

use thiserror::Error;

// ============================================================================
// FIELD
// ============================================================================

/// Numeric sub-field of a SIN, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Positions [0,2)
    Province,
    /// Positions [2,4), the city digits after the province prefix
    City,
    /// Positions [4,6), the district digits after the city prefix
    District,
    /// Positions [6,8), gender-encoded day of month
    Day,
    /// Positions [8,10)
    Month,
    /// Positions [10,12), two-digit year
    Year,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Province,
        Field::City,
        Field::District,
        Field::Day,
        Field::Month,
        Field::Year,
    ];

    /// Half-open byte range of this field inside the number
    pub fn range(&self) -> std::ops::Range<usize> {
        match self {
            Field::Province => 0..2,
            Field::City => 2..4,
            Field::District => 4..6,
            Field::Day => 6..8,
            Field::Month => 8..10,
            Field::Year => 10..12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Province => "province",
            Field::City => "city",
            Field::District => "district",
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// DECODE ERROR
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input is not exactly 16 characters long.
    #[error("invalid Single Identity Number format: expected 16 characters, got {length}")]
    Format { length: usize },

    /// A numeric field contains something other than ASCII digits.
    #[error("invalid {field} field: {value:?} is not numeric")]
    FieldFormat { field: Field, value: String },

    /// The composed born date does not exist on the calendar.
    #[error("cannot parse born date {date:?}")]
    DateParse { date: String },
}

impl DecodeError {
    /// Which field failed, for field-level errors
    pub fn field(&self) -> Option<Field> {
        match self {
            DecodeError::FieldFormat { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ranges_cover_numeric_prefix() {
        let mut next = 0;
        for field in Field::ALL {
            let range = field.range();
            assert_eq!(range.start, next, "gap before {}", field);
            assert_eq!(range.len(), 2);
            next = range.end;
        }
        assert_eq!(next, 12);
    }

    #[test]
    fn test_error_messages() {
        let err = DecodeError::Format { length: 15 };
        assert_eq!(
            err.to_string(),
            "invalid Single Identity Number format: expected 16 characters, got 15"
        );

        let err = DecodeError::FieldFormat {
            field: Field::Month,
            value: "1x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid month field: \"1x\" is not numeric");
        assert_eq!(err.field(), Some(Field::Month));
    }
}
