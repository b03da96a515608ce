use serde_json::{Number, Value};

use crate::config_types::Config;
use crate::config_value::{ParamKind, ParamValue};

/// A path pattern plus what to do with any key whose path ends with it.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Delete(Vec<String>),
    SetNumber(Vec<String>, f64),
    SetString(Vec<String>, String),
}

/// Outcome of a matching rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Remove,
    Replace(Value),
}

impl Rule {
    pub fn pattern(&self) -> &[String] {
        match self {
            Rule::Delete(p) | Rule::SetNumber(p, _) | Rule::SetString(p, _) => p,
        }
    }

    /// `None` when the pattern is not a suffix of `path`.
    pub fn evaluate(&self, path: &[String]) -> Option<Action> {
        if !has_suffix(path, self.pattern()) {
            return None;
        }
        Some(match self {
            Rule::Delete(_) => Action::Remove,
            Rule::SetNumber(_, n) => Action::Replace(number_value(*n)),
            Rule::SetString(_, s) => Action::Replace(Value::String(s.clone())),
        })
    }
}

/// True when the trailing segments of `path` equal `pattern`. An empty
/// pattern is a suffix of every path.
pub fn has_suffix(path: &[String], pattern: &[String]) -> bool {
    path.ends_with(pattern)
}

/// Integral values inside the exactly-representable range are written as JSON
/// integers, so `epochLength=500` lands as `500` rather than `500.0`.
pub fn number_value(n: f64) -> Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

/// Builds the ordered rule list from [`Config::params`]: every delete, then
/// numbers, then set params (matched as suffixes here, and again by exact path
/// later), then strings. Within a group, input order is kept. The first
/// matching rule wins.
pub fn rules_from_config(config: &Config) -> Vec<Rule> {
    config
        .params()
        .filter_map(|p| match (p.kind, &p.value) {
            (ParamKind::Delete, _) => Some(Rule::Delete(p.path.clone())),
            (_, Some(ParamValue::Number(n))) => Some(Rule::SetNumber(p.path.clone(), *n)),
            (_, Some(ParamValue::String(s))) => Some(Rule::SetString(p.path.clone(), s.clone())),
            (_, None) => None,
        })
        .collect()
}
