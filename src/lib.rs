//! Path-addressed patching of genesis/configuration JSON documents.
//!
//! Params look like `segment(.segment)*[=value]`. Delete, number and string
//! params (and set params, in a first pass) match any key whose path *ends*
//! with the param path; set params are then applied again at their exact path
//! from the root, creating objects as needed.

pub mod config_pipeline;
pub mod config_precedence_rules;
pub mod config_tree;
pub mod config_types;
pub mod config_value;
pub mod error;
pub mod script_rewrite;

pub use config_pipeline::{apply, replace_document, OutputMode};
pub use config_precedence_rules::{has_suffix, rules_from_config, Action, Rule};
pub use config_tree::{replace_tree, set_all, set_path};
pub use config_types::Config;
pub use config_value::{Param, ParamKind, ParamValue};
pub use error::{ParamError, ReplaceError};
