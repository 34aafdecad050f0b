// SIN Parser - Core Library
// Decodes Single Identity Numbers; shared by the CLI, the API server, and tests

pub mod error;
pub mod region;
pub mod birth;
pub mod zodiac;
pub mod identity;
pub mod decoder;
pub mod config;

// Re-export commonly used types
pub use error::{DecodeError, DecodeResult, Field};
pub use region::{District, RegionCategory, RegionTable, RegionTableBuilder, RegionTableError};
pub use birth::BirthDate;
pub use zodiac::Zodiac;
pub use identity::{Gender, ParsedIdentity};
pub use decoder::{Decoder, FeatureTier, ParseTierError, SIN_LENGTH};
pub use config::Settings;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
