//! Scaffolder generates files from template trees.
//! Folder names, file names and file contents of a template may contain
//! `{{ key }}`, `{{ key | transformer }}` and `{{ function() }}` placeholders,
//! which are resolved against user supplied values, transformers and functions.

/// Writing resolved trees to disk
pub mod builder;

/// Built-in case transformers
pub mod builtins;

/// Command-line interface module for the Scaffolder application
pub mod cli;

/// Discovery of the templates available from a directory
pub mod commands;

/// Configuration handling for templates
/// Supports JSON and YAML formats (scaffolder.json, scaffolder.yml, scaffolder.yaml)
pub mod config;

pub mod constants;

/// Global and per-node substitution contexts
pub mod context;

/// Error types and handling for the Scaffolder application
pub mod error;

/// Placeholder syntax
pub mod grammar;

/// Pre and post generation hook processing
pub mod hooks;

/// File and directory ignore patterns
/// Processes .scaffolderignore files to exclude specific paths
pub mod ignore;

pub mod parameters;

pub mod pipeline;

/// Core template processing orchestration
pub mod processor;

/// User input and interaction handling
pub mod prompt;

pub mod registry;

/// MiniJinja rendering of configuration functions
pub mod renderer;

pub mod resolver;

/// Structure-preserving substitution over template trees
pub mod transformer;

/// Reading template directories into trees
pub mod tree;
