//! pfsettings: settings descriptions for the parameter framework.
//!
//! A description nests domain groups, domains, configuration groups and
//! configurations. Rules declared at any level guard every configuration
//! beneath it; parameter assignments inside a configuration commit those
//! rules and produce the command stream read by the settings generator.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
