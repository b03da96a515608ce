use serde_json::Value;
use tracing::debug;

use crate::config_precedence_rules::rules_from_config;
use crate::config_tree::{replace_tree, set_all};
use crate::config_types::Config;
use crate::error::ReplaceError;

/// How the rewritten document is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pretty, two-space indent. Used when overwriting a file.
    File,
    /// Same encoding, newline-terminated. Used for stdout.
    Stream,
}

/// Suffix pass then exact-set pass. `document` is not modified; on error no
/// partial result escapes.
pub fn apply(config: &Config, document: &Value) -> Result<Value, ReplaceError> {
    let rules = rules_from_config(config);
    debug!(rules = rules.len(), set = config.set.len(), "applying config");

    let replaced = replace_tree(document, &rules);
    set_all(replaced, &config.set)
}

/// Parses `data`, applies `config` and re-encodes the result. `source_id`
/// names the input in error messages (usually the file path).
pub fn replace_document(
    config: &Config,
    data: &[u8],
    source_id: &str,
    mode: OutputMode,
) -> Result<Vec<u8>, ReplaceError> {
    let document: Value =
        serde_json::from_slice(data).map_err(|source| ReplaceError::MalformedDocument {
            source_id: source_id.to_owned(),
            source,
        })?;

    let updated = apply(config, &document)?;

    let mut out = serde_json::to_vec_pretty(&updated).map_err(|source| ReplaceError::Serialize {
        source_id: source_id.to_owned(),
        source,
    })?;
    if mode == OutputMode::Stream {
        out.push(b'\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(ss: &[&str]) -> Vec<String> {
        ss.iter().map(|s| s.to_string()).collect()
    }

    fn genesis() -> Value {
        json!({
            "activeSlotsCoeff": 0.05,
            "epochLength": 432000,
            "genDelegs": {},
            "initialFunds": {"addr1": 1000},
            "networkId": "Mainnet",
            "protocolParams": {
                "decentralisationParam": 1,
                "maxTxSize": 16384,
                "protocolVersion": {"major": 2, "minor": 0}
            },
            "staking": {"pools": {}, "stake": {}}
        })
    }

    #[test]
    fn applies_all_groups() {
        let config = Config::parse(
            &raw(&["staking"]),
            &raw(&["epochLength=500", "protocolParams.decentralisationParam=0.5"]),
            &raw(&["networkId=Testnet"]),
            &raw(&["protocolParams.protocolVersion.major=5", "updateQuorum.count=3"]),
        )
        .unwrap();

        let out = apply(&config, &genesis()).unwrap();
        assert_eq!(
            out,
            json!({
                "activeSlotsCoeff": 0.05,
                "epochLength": 500,
                "genDelegs": {},
                "initialFunds": {"addr1": 1000},
                "networkId": "Testnet",
                "protocolParams": {
                    "decentralisationParam": 0.5,
                    "maxTxSize": 16384,
                    "protocolVersion": {"major": 5, "minor": 0}
                },
                "updateQuorum": {"count": 3}
            })
        );
    }

    #[test]
    fn delete_wins_over_string_for_same_key() {
        let config = Config::parse(&raw(&["networkId"]), &[], &raw(&["networkId=Testnet"]), &[]).unwrap();
        let out = apply(&config, &genesis()).unwrap();
        assert!(out.get("networkId").is_none());
    }

    #[test]
    fn common_params_win_after_merge() {
        let common = Config::parse(&[], &raw(&["maxTxSize=1"]), &[], &[]).unwrap();
        let alonzo = Config::parse(&[], &raw(&["maxTxSize=2"]), &[], &[]).unwrap();
        let out = apply(&common.merge(alonzo), &genesis()).unwrap();
        assert_eq!(out["protocolParams"]["maxTxSize"], json!(1));
    }

    #[test]
    fn second_run_is_idempotent() {
        let config = Config::parse(
            &raw(&["genDelegs"]),
            &raw(&["major=7"]),
            &raw(&["networkId=Testnet"]),
            &raw(&["a.b.c=d"]),
        )
        .unwrap();

        let once = apply(&config, &genesis()).unwrap();
        let twice = apply(&config, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_config_round_trips() {
        let data = serde_json::to_vec(&genesis()).unwrap();
        let out = replace_document(&Config::default(), &data, "genesis.json", OutputMode::File).unwrap();
        let reparsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(reparsed, genesis());
    }

    #[test]
    fn output_modes_differ_only_by_trailing_newline() {
        let data = br#"{"b":1,"a":{"c":[1,2]}}"#;
        let file = replace_document(&Config::default(), data, "x", OutputMode::File).unwrap();
        let stream = replace_document(&Config::default(), data, "x", OutputMode::Stream).unwrap();

        let expected = "{\n  \"a\": {\n    \"c\": [\n      1,\n      2\n    ]\n  },\n  \"b\": 1\n}";
        assert_eq!(String::from_utf8(file).unwrap(), expected);
        assert_eq!(String::from_utf8(stream).unwrap(), format!("{expected}\n"));
    }

    #[test]
    fn malformed_document_names_its_source() {
        let err = replace_document(&Config::default(), b"{not json", "shelley/genesis.json", OutputMode::File)
            .unwrap_err();
        assert!(matches!(err, ReplaceError::MalformedDocument { .. }));
        assert!(err.to_string().contains("shelley/genesis.json"));
    }

    #[test]
    fn non_object_root_is_reported() {
        let err = replace_document(&Config::default(), b"[1,2]", "list.json", OutputMode::Stream).unwrap_err();
        assert!(matches!(err, ReplaceError::NonMappingRoot { found: "array" }));
    }
}
