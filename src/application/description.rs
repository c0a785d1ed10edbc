//! Declarative settings description.
//!
//! A description is a TOML document holding an ordered array of blocks. Each
//! block is tagged by `kind`; namespace blocks carry a `name` and a nested
//! `body`:
//!
//! ```toml
//! [[block]]
//! kind = "domain_group"
//! name = "EddGroup"
//!
//! [[block.body]]
//! kind = "rule"
//! criterion = "Colors"
//! matcher = "includes"
//! value = "Red"
//!
//! [[block.body]]
//! kind = "domain"
//! name = "Second"
//!
//! [[block.body.body]]
//! kind = "conf"
//! name = "Default"
//! body = [{ kind = "set", parameter = "/Test/test/block/2/uint8", value = 6 }]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::debug;

use crate::application::emitter::CommandEmitter;
use crate::application::evaluator::Evaluator;
use crate::application::{ApplicationError, ApplicationResult};

/// Scalar written verbatim into the command stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fractional part of whole floats ("3.0", not "3").
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One declaration of the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    DomainGroup {
        name: String,
        #[serde(default)]
        body: Vec<Block>,
    },
    Domain {
        name: String,
        #[serde(default)]
        body: Vec<Block>,
    },
    ConfGroup {
        name: String,
        #[serde(default)]
        body: Vec<Block>,
    },
    Conf {
        name: String,
        #[serde(default)]
        body: Vec<Block>,
    },
    Rule {
        criterion: String,
        matcher: String,
        value: Value,
    },
    Set {
        parameter: String,
        value: Value,
    },
    Component {
        name: String,
    },
    ConfType {
        name: String,
    },
}

impl Block {
    /// Evaluate this block, recursing into its body.
    pub fn evaluate<E: CommandEmitter>(&self, eval: &mut Evaluator<E>) -> ApplicationResult<()> {
        match self {
            Block::DomainGroup { name, body } => {
                eval.domain_group(name, |e| evaluate_blocks(body, e))
            }
            Block::Domain { name, body } => eval.domain(name, |e| evaluate_blocks(body, e)),
            Block::ConfGroup { name, body } => eval.conf_group(name, |e| evaluate_blocks(body, e)),
            Block::Conf { name, body } => eval.conf(name, |e| evaluate_blocks(body, e)),
            Block::Rule {
                criterion,
                matcher,
                value,
            } => eval.rule(criterion, matcher, &value.to_string()),
            Block::Set { parameter, value } => eval.set(parameter, value),
            Block::Component { name } => eval.component(name),
            Block::ConfType { name } => eval.conf_type(name),
        }
    }

    fn body(&self) -> &[Block] {
        match self {
            Block::DomainGroup { body, .. }
            | Block::Domain { body, .. }
            | Block::ConfGroup { body, .. }
            | Block::Conf { body, .. } => body,
            _ => &[],
        }
    }

    fn outline(&self) -> Tree<String> {
        Tree::new(self.to_string()).with_leaves(self.body().iter().map(Block::outline))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::DomainGroup { name, .. } => write!(f, "domainGroup {}", name),
            Block::Domain { name, .. } => write!(f, "domain {}", name),
            Block::ConfGroup { name, .. } => write!(f, "confGroup {}", name),
            Block::Conf { name, .. } => write!(f, "conf {}", name),
            Block::Rule {
                criterion,
                matcher,
                value,
            } => write!(f, "rule {} {} {}", criterion, matcher, value),
            Block::Set { parameter, value } => write!(f, "set {} = {}", parameter, value),
            Block::Component { name } => write!(f, "component {}", name),
            Block::ConfType { name } => write!(f, "confType {}", name),
        }
    }
}

fn evaluate_blocks<E: CommandEmitter>(
    blocks: &[Block],
    eval: &mut Evaluator<E>,
) -> ApplicationResult<()> {
    blocks.iter().try_for_each(|block| block.evaluate(eval))
}

/// Parsed settings description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, rename = "block")]
    pub blocks: Vec<Block>,
}

impl Description {
    /// Parse a TOML description.
    pub fn parse(content: &str) -> ApplicationResult<Self> {
        let description: Self =
            toml::from_str(content).map_err(|e| ApplicationError::Description {
                message: e.to_string(),
            })?;
        debug!("parsed description: {} top-level blocks", description.blocks.len());
        Ok(description)
    }

    /// Evaluate every block depth-first, in declaration order.
    ///
    /// Stops at the first failure; commands emitted before it stay emitted.
    pub fn evaluate<E: CommandEmitter>(&self, eval: &mut Evaluator<E>) -> ApplicationResult<()> {
        evaluate_blocks(&self.blocks, eval)
    }

    /// Block hierarchy for display.
    pub fn outline(&self, root: &str) -> Tree<String> {
        Tree::new(root.to_string()).with_leaves(self.blocks.iter().map(Block::outline))
    }
}
