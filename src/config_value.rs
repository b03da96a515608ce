use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ParamError;

/// Which command-line group a param came from. The group decides how the
/// param is applied, not how it is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Delete,
    Number,
    String,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub path: Vec<String>,
    pub raw: String,
    pub value: Option<ParamValue>,
    pub kind: ParamKind,
}

impl Param {
    /// Parses `segment(.segment)*[=value]`.
    ///
    /// The right-hand side is tried as an `f64` first and only falls back to
    /// the literal string when that fails. Anything that looks like a number
    /// (`10`, `1e3`, `-0.5`) therefore becomes a number, whatever the kind;
    /// there is no way to force such a value to stay a string.
    ///
    /// Number, string and set params must carry `=value`. Without one they fail
    /// with [`ParamError::MissingValue`] instead of being dropped or set to
    /// `null`. Only delete params may omit the value.
    ///
    /// ```JSON
    /// "protocolParams.maxTxSize=16384"  -> path [protocolParams, maxTxSize], value 16384.0
    /// "systemStart=2021-07-01T00:00:00Z" -> path [systemStart], value "2021-07-01T00:00:00Z"
    /// "initialFunds"                     -> path [initialFunds], no value
    /// ```
    pub fn parse(raw: &str, kind: ParamKind) -> Result<Self, ParamError> {
        let (lhs, rhs) = match raw.split_once('=') {
            Some((lhs, rhs)) => (lhs, Some(rhs)),
            None => (raw, None),
        };

        let path = lhs.split('.').map(str::to_owned).collect();

        let value = match rhs {
            Some(rhs) => Some(parse_value(raw, rhs)?),
            None => None,
        };

        match (kind, &value) {
            (ParamKind::Delete, Some(_)) => {
                warn!(param = raw, "ignoring value on delete param");
            }
            (ParamKind::Number | ParamKind::String | ParamKind::Set, None) => {
                return Err(ParamError::MissingValue { raw: raw.to_owned() });
            }
            (ParamKind::Number, Some(ParamValue::String(s))) => {
                warn!(param = raw, value = %s, "numeric param is not a number; treating as string");
            }
            _ => {}
        }

        Ok(Param {
            path,
            raw: raw.to_owned(),
            value,
            kind,
        })
    }
}

fn parse_value(raw: &str, rhs: &str) -> Result<ParamValue, ParamError> {
    match rhs.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(ParamValue::Number(n)),
        Ok(_) => Err(ParamError::NonFiniteNumber { raw: raw.to_owned() }),
        Err(_) => Ok(ParamValue::String(rhs.to_owned())),
    }
}

/// Parses every raw string of one group, stopping at the first failure.
pub fn parse_all_params(raw: &[String], kind: ParamKind) -> Result<Vec<Param>, ParamError> {
    raw.iter().map(|s| Param::parse(s, kind)).collect()
}
