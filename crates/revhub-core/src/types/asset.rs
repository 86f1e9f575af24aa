//! The closed set of editable asset files under revision control.
//!
//! Every revision and restore-log entry is keyed by an [`AssetKind`].
//! The set is deliberately closed: the product manages exactly one
//! user-owned animation script and one stylesheet. Values are stored
//! as `TEXT` in PostgreSQL via the manual sqlx impls below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifies which editable file a revision belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// The user-owned animation script.
    Script,
    /// The user-owned animation stylesheet.
    Stylesheet,
}

impl AssetKind {
    /// Every managed asset kind, in display order.
    pub const ALL: [AssetKind; 2] = [AssetKind::Script, AssetKind::Stylesheet];

    /// Stable string form used as the persisted file key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
        }
    }

    /// File name of the live asset on disk.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Script => "custom-animations.js",
            Self::Stylesheet => "animation-styles.css",
        }
    }

    /// Starter content written when the live file is first seeded.
    pub fn starter_content(&self) -> &'static str {
        match self {
            Self::Script => {
                "// Custom animation script.\n// Edits are versioned; use the history to roll back.\n"
            }
            Self::Stylesheet => {
                "/* Custom animation styles. */\n/* Edits are versioned; use the history to roll back. */\n"
            }
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "script" => Ok(Self::Script),
            "stylesheet" => Ok(Self::Stylesheet),
            other => Err(AppError::validation(format!(
                "Unknown file key '{other}'. Expected 'script' or 'stylesheet'"
            ))),
        }
    }
}

impl sqlx::Type<sqlx::Postgres> for AssetKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for AssetKind {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for AssetKind {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_str(raw)?)
    }
}
