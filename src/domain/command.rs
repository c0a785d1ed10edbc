//! Primitive commands consumed by the settings generator.

use std::fmt;

use crate::domain::path::NamePath;
use crate::domain::rule::RuleSet;

/// One line of the command stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateDomain {
        domain: NamePath,
    },
    CreateConfiguration {
        domain: NamePath,
        conf: NamePath,
    },
    SetRule {
        domain: NamePath,
        conf: NamePath,
        rules: RuleSet,
    },
    SetConfigurationParameter {
        domain: NamePath,
        conf: NamePath,
        parameter: String,
        value: String,
    },
}

impl Command {
    /// Protocol keyword starting the line.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::CreateDomain { .. } => "createDomain",
            Command::CreateConfiguration { .. } => "createConfiguration",
            Command::SetRule { .. } => "setRule",
            Command::SetConfigurationParameter { .. } => "setConfigurationParameter",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            Command::CreateDomain { domain } => write!(f, "{keyword} {domain}"),
            Command::CreateConfiguration { domain, conf } => {
                write!(f, "{keyword} {domain} {conf}")
            }
            Command::SetRule {
                domain,
                conf,
                rules,
            } => write!(f, "{keyword} {domain} {conf} {rules}"),
            Command::SetConfigurationParameter {
                domain,
                conf,
                parameter,
                value,
            } => write!(f, "{keyword} {domain} {conf} {parameter} {value}"),
        }
    }
}
