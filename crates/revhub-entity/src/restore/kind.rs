//! Restore kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a restore operation was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "restore_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RestoreKind {
    /// Requested by an operator.
    Manual,
    /// Performed by an automated process.
    Automated,
}

impl RestoreKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automated => "automated",
        }
    }
}

impl fmt::Display for RestoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RestoreKind {
    type Err = revhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "automated" => Ok(Self::Automated),
            _ => Err(revhub_core::AppError::validation(format!(
                "Invalid restore kind: '{s}'. Expected one of: manual, automated"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("manual".parse::<RestoreKind>().unwrap(), RestoreKind::Manual);
        assert_eq!(
            "AUTOMATED".parse::<RestoreKind>().unwrap(),
            RestoreKind::Automated
        );
        assert!("scheduled".parse::<RestoreKind>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&RestoreKind::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
    }
}
