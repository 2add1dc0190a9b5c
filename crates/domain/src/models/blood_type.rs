//! ABO/Rh blood type enumeration.

use serde::{Deserialize, Serialize};

/// The eight ABO/Rh blood types.
///
/// Blood types are exchanged as their conventional string form ("O-",
/// "AB+", ...) everywhere: in JSON payloads, in the database and in SMS
/// text. Unknown strings are not an error at the API boundary; they are
/// simply incompatible with everything (see
/// [`crate::services::compatibility`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "O-")]
    ONeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "AB-")]
    ABNeg,
    #[serde(rename = "AB+")]
    ABPos,
}

impl BloodType {
    /// All eight blood types.
    pub const ALL: [BloodType; 8] = [
        BloodType::ONeg,
        BloodType::OPos,
        BloodType::ANeg,
        BloodType::APos,
        BloodType::BNeg,
        BloodType::BPos,
        BloodType::ABNeg,
        BloodType::ABPos,
    ];

    /// The conventional string form of this blood type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::ONeg => "O-",
            BloodType::OPos => "O+",
            BloodType::ANeg => "A-",
            BloodType::APos => "A+",
            BloodType::BNeg => "B-",
            BloodType::BPos => "B+",
            BloodType::ABNeg => "AB-",
            BloodType::ABPos => "AB+",
        }
    }

    /// Parses a conventional blood type string. Returns `None` for anything
    /// that is not one of the eight known types.
    pub fn parse(s: &str) -> Option<BloodType> {
        match s {
            "O-" => Some(BloodType::ONeg),
            "O+" => Some(BloodType::OPos),
            "A-" => Some(BloodType::ANeg),
            "A+" => Some(BloodType::APos),
            "B-" => Some(BloodType::BNeg),
            "B+" => Some(BloodType::BPos),
            "AB-" => Some(BloodType::ABNeg),
            "AB+" => Some(BloodType::ABPos),
            _ => None,
        }
    }
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::parse(s).ok_or_else(|| UnknownBloodType(s.to_string()))
    }
}

/// Error returned when parsing an unrecognized blood type string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown blood type: {0}")]
pub struct UnknownBloodType(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for bt in BloodType::ALL {
            assert_eq!(BloodType::parse(bt.as_str()), Some(bt));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(BloodType::parse("C+"), None);
        assert_eq!(BloodType::parse("o-"), None);
        assert_eq!(BloodType::parse(""), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "XYZ".parse::<BloodType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown blood type: XYZ");
    }

    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&BloodType::ABPos).unwrap();
        assert_eq!(json, "\"AB+\"");
        let parsed: BloodType = serde_json::from_str("\"O-\"").unwrap();
        assert_eq!(parsed, BloodType::ONeg);
    }
}
