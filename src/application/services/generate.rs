//! Settings generation service
//!
//! Loads a description from disk and evaluates it into a command stream.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::description::Description;
use crate::application::emitter::{CommandEmitter, CommandLog, LineWriter};
use crate::application::evaluator::{Evaluator, RuleCommit};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Service turning description files into command streams.
pub struct GenerateService {
    fs: Arc<dyn FileSystem>,
}

impl GenerateService {
    /// Create a new generate service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a description file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Description> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::DescriptionNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read description", path)?;

        Description::parse(&content).map_err(|e| match e {
            ApplicationError::Description { message } => ApplicationError::Description {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Evaluate a description file into `emitter`.
    ///
    /// A fresh evaluation context is used for every call.
    #[instrument(level = "debug", skip(self, emitter))]
    pub fn generate<E: CommandEmitter>(
        &self,
        path: &Path,
        emitter: E,
        rule_commit: RuleCommit,
    ) -> ApplicationResult<E> {
        let description = self.load(path)?;
        let mut eval = Evaluator::new(emitter).with_rule_commit(rule_commit);
        description.evaluate(&mut eval)?;
        debug_assert!(eval.context().is_empty());
        Ok(eval.finish())
    }

    /// Evaluate a description file into its textual command stream.
    pub fn render(&self, path: &Path, rule_commit: RuleCommit) -> ApplicationResult<String> {
        let writer = self.generate(path, LineWriter::new(Vec::new()), rule_commit)?;
        let bytes = writer
            .into_inner()
            .map_err(|source| ApplicationError::Emit { source })?;
        String::from_utf8(bytes).map_err(|e| ApplicationError::OperationFailed {
            context: format!("render {}", path.display()),
            source: Box::new(e),
        })
    }

    /// Evaluate a description file and write the command stream to `output`.
    ///
    /// Nothing is written if evaluation fails.
    #[instrument(level = "debug", skip(self))]
    pub fn write(
        &self,
        path: &Path,
        output: &Path,
        rule_commit: RuleCommit,
    ) -> ApplicationResult<usize> {
        let rendered = self.render(path, rule_commit)?;
        let count = rendered.lines().count();
        self.fs
            .write(output, &rendered)
            .map_err(|source| ApplicationError::OutputNotCreated {
                path: output.to_path_buf(),
                source,
            })?;
        debug!("wrote {} commands to {}", count, output.display());
        Ok(count)
    }

    /// Evaluate a description file without producing output.
    ///
    /// Returns the number of commands the description would produce.
    pub fn check(&self, path: &Path, rule_commit: RuleCommit) -> ApplicationResult<usize> {
        let log = self.generate(path, CommandLog::new(), rule_commit)?;
        Ok(log.len())
    }
}
