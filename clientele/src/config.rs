use std::{
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

use clap::{
    CommandFactory, FromArgMatches,
    error::{ErrorKind as ClapErrorKind, Result as ClapResult},
};
use clientele_core::settings::RawSettings;

/// The name of the settings file that's read from the output directory
/// when `--settings` isn't given.
pub const SETTINGS_FILE_NAME: &str = ".clientele.toml";

#[derive(Debug)]
pub struct Main {
    pub verbose: bool,
    pub command: Command,
}

impl Main {
    pub fn parse() -> ClapResult<Main> {
        let mut cmd = MainArgs::command();
        let mut matches = cmd
            .try_get_matches_from_mut(std::env::args_os())
            .map_err(|err| err.format(&mut cmd))?;
        let args =
            MainArgs::from_arg_matches_mut(&mut matches).map_err(|err| err.format(&mut cmd))?;

        let command = match args.command {
            CommandArgs::Generate(GenerateArgs {
                input,
                output,
                settings,
                namespace,
                check_only,
            }) => {
                let (path, required) = match settings {
                    Some(path) => (path, true),
                    None => (output.join(SETTINGS_FILE_NAME), false),
                };
                let file = read_settings_file(&path, required)
                    .map_err(|(kind, message)| cmd.error(kind, message))?;
                Command::Generate(Generate {
                    input,
                    output,
                    overrides: SettingsOverrides { file, namespace },
                    check_only,
                })
            }
        };

        Ok(Main {
            verbose: args.verbose,
            command,
        })
    }
}

#[derive(Debug)]
pub enum Command {
    Generate(Generate),
}

#[derive(Debug)]
pub struct Generate {
    pub input: PathBuf,
    pub output: PathBuf,
    pub overrides: SettingsOverrides,
    pub check_only: bool,
}

/// Settings that the command line layers on top of
/// the API description's own settings.
#[derive(Debug, Default)]
pub struct SettingsOverrides {
    /// Settings from a settings file, if one was found.
    pub file: Option<RawSettings>,
    /// The `--namespace` argument.
    pub namespace: Option<String>,
}

impl SettingsOverrides {
    /// Layers the settings file, then the `--namespace` argument,
    /// on top of `document`.
    pub fn apply(self, document: RawSettings) -> RawSettings {
        let merged = match self.file {
            Some(file) => document.merge(file),
            None => document,
        };
        merged.merge(RawSettings {
            namespace: self.namespace,
            ..Default::default()
        })
    }
}

/// Reads and parses a settings file. A missing file is only an error
/// if it was named on the command line.
fn read_settings_file(
    path: &Path,
    required: bool,
) -> Result<Option<RawSettings>, (ClapErrorKind, String)> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_settings(&contents).map(Some).map_err(|err| {
            (
                ClapErrorKind::ValueValidation,
                format!("Failed to parse `{}`: {err}", path.display()),
            )
        }),
        Err(err) if err.kind() == IoErrorKind::NotFound && !required => Ok(None),
        Err(err) => Err((
            ClapErrorKind::Io,
            format!("Failed to read `{}`: {err}", path.display()),
        )),
    }
}

fn parse_settings(contents: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(contents)
}

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct MainArgs {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CommandArgs,
}

#[derive(Debug, clap::Subcommand)]
enum CommandArgs {
    /// Generate a Java client library from an API description.
    Generate(GenerateArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// The path to the API description (`.yaml` or `.json`).
    input: PathBuf,

    /// The output directory for the generated files.
    output: PathBuf,

    /// A TOML settings file. Defaults to `.clientele.toml` in
    /// the output directory, if it exists.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// The root Java package for generated code. Overrides
    /// the `namespace` setting.
    #[arg(long, value_name = "NS")]
    namespace: Option<String>,

    /// Run every stage, but don't write any files.
    #[arg(long)]
    check_only: bool,
}
