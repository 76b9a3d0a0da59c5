use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use ambari_service_params::{
    constants::APP_NAME,
    security::kinit_candidates,
    services::storm::{DaemonCommands, StormSettings},
    ConfigDocument, EnvironmentFacts, Service,
};
use anyhow::Context;
use clap::{crate_description, crate_version, Parser, Subcommand};
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

const LOG_ENV: &str = "AMBARI_PARAMS_LOG";

#[derive(clap::Parser)]
#[clap(about, author)]
struct Opts {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved parameters of one service.
    Resolve {
        #[arg(long, env = "AMBARI_PARAMS_SERVICE")]
        service: Service,

        /// Command document, YAML if the extension says so and JSON otherwise.
        #[arg(long, env = "AMBARI_PARAMS_COMMAND_FILE")]
        command_file: PathBuf,

        #[arg(long, env = "AMBARI_PARAMS_FORMAT", default_value_t = Format::Json)]
        format: Format,

        /// Skips probing the usual locations for kinit.
        #[arg(long, env = "AMBARI_PARAMS_KINIT_PATH")]
        kinit_path: Option<String>,
    },

    /// Print the start and stop commands of one Storm daemon.
    StormCommands {
        #[arg(long, env = "AMBARI_PARAMS_DAEMON")]
        daemon: String,

        #[arg(long, env = "AMBARI_PARAMS_COMMAND_FILE")]
        command_file: PathBuf,

        #[arg(long, env = "AMBARI_PARAMS_FORMAT", default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guesses the format of a command document from its file extension.
    fn of_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|extension| extension.to_str());
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }

    fn render(self, value: &impl Serialize) -> anyhow::Result<String> {
        Ok(match self {
            Format::Json => serde_json::to_string_pretty(value)?,
            Format::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    initialize_logging();
    info!(
        "Starting {APP_NAME} {} ({}), built {} for {} by {}",
        crate_version!(),
        crate_description!(),
        built_info::BUILT_TIME_UTC,
        built_info::TARGET,
        built_info::RUSTC_VERSION,
    );

    let (rendered, format) = match opts.cmd {
        Command::Resolve {
            service,
            command_file,
            format,
            kinit_path,
        } => {
            let document = load_document(&command_file)?;
            let mut facts = EnvironmentFacts::from_document(&document)?;
            if let Some(kinit_path) = kinit_path.or_else(probe_kinit) {
                facts = facts.with_kinit_path(kinit_path);
            }
            let params = service
                .resolve(&document, &facts)
                .with_context(|| format!("failed to resolve {service} parameters"))?;
            (format.render(&params)?, format)
        }
        Command::StormCommands {
            daemon,
            command_file,
            format,
        } => {
            let document = load_document(&command_file)?;
            let facts = EnvironmentFacts::from_document(&document)?;
            let settings = StormSettings::from_document(&document, &facts)?;
            let commands = DaemonCommands::for_name(&daemon, &settings)?;
            (format.render(&commands)?, format)
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if format == Format::Json {
        writeln!(stdout)?;
    }
    Ok(())
}

fn initialize_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_document(path: &Path) -> anyhow::Result<ConfigDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read command file {}", path.display()))?;
    parse_document(&raw, Format::of_path(path))
        .with_context(|| format!("failed to parse command file {}", path.display()))
}

fn parse_document(raw: &str, format: Format) -> anyhow::Result<ConfigDocument> {
    Ok(match format {
        Format::Json => serde_json::from_str(raw)?,
        Format::Yaml => serde_yaml::from_str(raw)?,
    })
}

fn probe_kinit() -> Option<String> {
    let found = kinit_candidates().find(|candidate| Path::new(candidate).exists());
    debug!(kinit = ?found, "probed kinit locations");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("command-1.json", Format::Json)]
    #[case("/var/lib/ambari-agent/data/command-1.yaml", Format::Yaml)]
    #[case("command.YML", Format::Yaml)]
    #[case("command", Format::Json)]
    fn detects_document_format(#[case] path: &str, #[case] expected: Format) {
        assert_eq!(expected, Format::of_path(Path::new(path)));
    }

    #[test]
    fn yaml_and_json_documents_agree() {
        let json = parse_document(
            r#"{"hostLevelParams": {"stack_version": "2.2"}, "role": "NIMBUS"}"#,
            Format::Json,
        )
        .unwrap();
        let yaml = parse_document(
            "hostLevelParams:\n  stack_version: \"2.2\"\nrole: NIMBUS\n",
            Format::Yaml,
        )
        .unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn parses_formats_case_insensitive() {
        assert_eq!(Format::Yaml, "YAML".parse::<Format>().unwrap());
        assert_eq!("json", Format::Json.to_string());
    }

    #[test]
    fn verifies_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert();
    }
}
