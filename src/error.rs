//! Error handling for the Scaffolder application.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for Scaffolder operations.
///
/// Errors are raised where they are detected and travel unchanged up to the
/// caller. Formatting them for the user and exiting is the binary's job.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system writes
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A template source path could not be read.
    #[error("Cannot read '{}': {source}.", path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value placeholder references a key with no supplied value.
    #[error("No value was provided for the placeholder '{token}'.")]
    MissingKeyValuePairs { token: String },

    /// A function placeholder references a function that is not registered.
    #[error("The function '{function_key}' is used in the template but has no implementation.")]
    MissingFunctionImplementation { function_key: String },

    /// A transformer chain references a transformer that is not registered.
    #[error("Unknown transformer '{name}'.")]
    UnknownTransformer { name: String },

    #[error("There is no template matching '{template}'.")]
    NoMatchingTemplate { template: String },

    /// The wrapping folder requested for the generated files already exists.
    #[error(
        "Error while creating the '{template}' template: there is probably a folder with the same name as '{folder}' at the location '{}'.",
        path.display()
    )]
    FolderAlreadyExists { template: String, folder: String, path: PathBuf },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("invalid value for \"{parameter}\"::{message}")]
    InvalidParameterValue { parameter: String, message: String },

    #[error("Invalid parameter '{0}', expected the form <key>=<value>.")]
    InvalidParameterFormat(String),

    /// A function or transformer could not be added to its registry.
    #[error("Cannot register '{name}': {reason}.")]
    RegistrationError { name: String, reason: String },

    /// Represents errors that occur during hook command execution
    #[error("Hook execution error: {0}.")]
    HookError(String),

    /// Represents errors in processing .scaffolderignore files
    #[error("ScaffolderIgnore error: {0}.")]
    IgnoreError(String),

    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
