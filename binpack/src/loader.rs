//! Plans as JSON documents.
//!
//! ```
//! use binpack::{load, Plan};
//! use serde_json::json;
//!
//! let plan = load(&json!({
//!     "$schema": "tag:sourcemeta.com,2024:jsonbinpack/encoding/v1",
//!     "binpackEncoding": "FLOOR_MULTIPLE_ENUM_VARINT",
//!     "binpackOptions": { "minimum": -10, "multiplier": 1 }
//! })).unwrap();
//! assert_eq!(plan, Plan::FloorMultipleEnumVarint { minimum: -10, multiplier: 1 });
//! ```
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::string::{String, ToString};

use core::fmt;
use serde::Deserialize;
use serde_json::Value;

use crate::plan::Plan;

/// The `$schema` of version 1 plan documents.
pub const ENCODING_V1: &str = "tag:sourcemeta.com,2024:jsonbinpack/encoding/v1";

const SCHEMA_KEY: &str = "$schema";

/// Plan loader error
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The `$schema` of the document is not [`ENCODING_V1`]
    UnsupportedVersion,
    /// The document does not describe a plan
    Plan(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl serde::de::StdError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedVersion => f.write_str("Unsupported encoding plan version"),
            Error::Plan(msg) => write!(f, "{} while loading an encoding plan", msg)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Plan(err.to_string())
    }
}

/// Load a [`Plan`] from its JSON `document`.
///
/// The `$schema` member is optional. If present it must be [`ENCODING_V1`].
/// Every plan, including the nested ones, needs both `binpackEncoding`
/// and `binpackOptions`.
pub fn load(document: &Value) -> Result<Plan> {
    if let Some(version) = document.get(SCHEMA_KEY) {
        if version.as_str() != Some(ENCODING_V1) {
            tracing::debug!(?version, "rejected encoding plan");
            return Err(Error::UnsupportedVersion)
        }
    }
    let plan = Plan::deserialize(document)?;
    tracing::debug!(encoding = plan.name(), "loaded encoding plan");
    Ok(plan)
}

impl Plan {
    /// Return the JSON document of this plan, tagged with [`ENCODING_V1`].
    pub fn to_value(&self) -> Result<Value> {
        let mut document = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut document {
            map.insert(SCHEMA_KEY.into(), Value::String(ENCODING_V1.into()));
        }
        Ok(document)
    }
}
