//! Application layer: evaluator, emitters, descriptions and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod description;
pub mod emitter;
pub mod error;
pub mod error_ext;
pub mod evaluator;
pub mod services;

pub use description::{Block, Description, Value};
pub use emitter::{CommandEmitter, CommandLog, LineWriter};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use evaluator::{Evaluator, RuleCommit};
