//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) | ApplicationError::Description { .. } => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::DescriptionNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::Emit { .. } => crate::exitcode::IOERR,
                    ApplicationError::OutputNotCreated { .. } => crate::exitcode::CANTCREAT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_domain_error_when_mapping_exit_code_then_data_error() {
        let err: CliError = ApplicationError::Domain(DomainError::NotSupported {
            feature: "component".into(),
        })
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_missing_description_when_mapping_exit_code_then_no_input() {
        let err: CliError = ApplicationError::DescriptionNotFound("x.toml".into()).into();
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_unwritable_output_when_mapping_exit_code_then_cannot_create() {
        let err: CliError = ApplicationError::OutputNotCreated {
            path: "out/settings.pfw".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::CANTCREAT);
        assert_eq!(err.exit_code(), 73);
    }

    #[test]
    fn given_usage_error_when_mapping_exit_code_then_usage() {
        let err = CliError::Usage("no command given".into());
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
