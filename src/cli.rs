//! Command-line interface implementation for Scaffolder.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for Scaffolder.
#[derive(Parser, Debug)]
#[command(author, version, about = "Scaffolder: generate code from your own templates", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate files from a template
    Create {
        /// Name of the template
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Parameter values, as <key>=<value>
        #[arg(value_name = "KEY=VALUE")]
        parameters: Vec<String>,

        /// Directory to look for templates from instead of the current one
        #[arg(long, value_name = "DIR")]
        load_from: Option<PathBuf>,

        /// Directory the files are generated in instead of the current one
        #[arg(long, value_name = "DIR")]
        entry_point: Option<PathBuf>,

        /// Path appended to the entry point
        #[arg(long, value_name = "PATH")]
        path_prefix: Option<PathBuf>,

        /// Wrap the generated files in a new folder
        #[arg(long, value_name = "NAME")]
        folder: Option<String>,

        /// Ask for parameters declared in the configuration that were not given
        #[arg(short, long)]
        interactive: bool,
    },

    /// List the available templates
    List {
        /// Directory to look for templates from instead of the current one
        #[arg(long, value_name = "DIR")]
        load_from: Option<PathBuf>,
    },

    /// Print the structure of a template
    Show {
        /// Name of the template
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Also print file contents
        #[arg(long)]
        show_content: bool,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
