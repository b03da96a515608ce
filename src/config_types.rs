use serde::{Deserialize, Serialize};

use crate::config_value::{parse_all_params, Param, ParamKind};
use crate::error::ParamError;

/// Params grouped by how they are applied, each group in input order.
///
/// ```JSON
/// {
///   "del":     [ { "path": ["staking"], "raw": "staking", "value": null, "kind": "delete" } ],
///   "numbers": [ { "path": ["epochLength"], "raw": "epochLength=500", "value": 500.0, "kind": "number" } ],
///   "strings": [],
///   "set":     []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub del: Vec<Param>,
    pub numbers: Vec<Param>,
    pub strings: Vec<Param>,
    pub set: Vec<Param>,
}

impl Config {
    pub fn parse(
        del: &[String],
        numbers: &[String],
        strings: &[String],
        set: &[String],
    ) -> Result<Self, ParamError> {
        Ok(Config {
            del: parse_all_params(del, ParamKind::Delete)?,
            numbers: parse_all_params(numbers, ParamKind::Number)?,
            strings: parse_all_params(strings, ParamKind::String)?,
            set: parse_all_params(set, ParamKind::Set)?,
        })
    }

    /// Concatenates each group, `self` first. Entries of `self` therefore win
    /// over `that` when both match the same key.
    pub fn merge(mut self, that: Config) -> Config {
        self.del.extend(that.del);
        self.numbers.extend(that.numbers);
        self.strings.extend(that.strings);
        self.set.extend(that.set);
        self
    }

    /// All params in rule priority order: delete, number, set, string.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.del
            .iter()
            .chain(&self.numbers)
            .chain(&self.set)
            .chain(&self.strings)
    }
}
