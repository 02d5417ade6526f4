use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::PayloadError;

/// Scanner severity, carried on the wire as its integer code. The scale is fixed
/// at 1 to 4; the `severities` config table is keyed on these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Severity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Severity {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Severity {
    type Error = PayloadError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Severity::Low),
            2 => Ok(Severity::Medium),
            3 => Ok(Severity::High),
            4 => Ok(Severity::Critical),
            other => Err(PayloadError::UnknownSeverity(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_scanner_scale() {
        assert_eq!(Severity::Low.code(), 1);
        assert_eq!(Severity::Critical.code(), 4);
        assert_eq!(Severity::try_from(3).unwrap(), Severity::High);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = Severity::try_from(99).unwrap_err();
        assert!(matches!(err, PayloadError::UnknownSeverity(99)));
    }

    #[test]
    fn deserializes_from_integer() {
        let severity: Severity = serde_json::from_str("4").unwrap();
        assert_eq!(severity, Severity::Critical);
        assert!(serde_json::from_str::<Severity>("7").is_err());
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "2");
    }
}
