use crate::config::{Credentials, Settings};
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::errors::AppResult;
use crate::handshake::Handshake;
use crate::jobs::{DiscoveryJob, InMemoryJobStore};
use crate::models::ListKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Options resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub list_kind: ListKind,
    pub config_path: PathBuf,
    pub job_name: String,
}

fn build_command() -> Command<'static> {
    Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .after_help("Example:\n  sonar-opendata --sonar-file-type rdns --config connector.toml")
        .arg(
            Arg::new("sonar_file_type")
                .long("sonar-file-type")
                .short('t')
                .help("Listing to read: 'dns'/'fdns' (forward DNS) or 'rdns' (reverse DNS)")
                .required(true)
                .value_parser(["dns", "fdns", "rdns"])
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the TOML file holding the [Rapid7] credentials")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("job_name")
                .long("job-name")
                .short('j')
                .help("Job name for the RUNNING/ERROR/COMPLETE status log lines (defaults to the import job for the listing)")
                .long_help(
                    "Job name for the RUNNING/ERROR/COMPLETE status updates. The binary keeps \
                     them in a process-local store and only logs them; library callers that \
                     need them persisted pass their own JobStatusStore to DiscoveryJob. \
                     Defaults to the import job for the listing.",
                )
                .action(ArgAction::Set),
        )
}

/// Resolves parsed arguments into [`CliOptions`].
pub fn options_from_matches(matches: &ArgMatches) -> CliOptions {
    let list_kind = ListKind::from(
        matches
            .get_one::<String>("sonar_file_type")
            .map(String::as_str)
            .unwrap_or_default(),
    );
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let job_name = matches
        .get_one::<String>("job_name")
        .cloned()
        .unwrap_or_else(|| list_kind.job_name().to_string());

    CliOptions {
        list_kind,
        config_path,
        job_name,
    }
}

/// Parses command-line arguments and runs a discovery.
///
/// 1. Loads the `[Rapid7]` settings from the TOML config file
/// 2. Runs the portal handshake for the requested listing
/// 3. Prints each discovered file URL on its own line to stdout
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, the credentials are unusable,
/// any handshake step fails, or the listing holds no file for the requested kind.
pub async fn cli() -> AppResult<()> {
    let matches = build_command().get_matches();
    let options = options_from_matches(&matches);
    run(&options).await
}

async fn run(options: &CliOptions) -> AppResult<()> {
    let settings = Settings::from_toml_file(&options.config_path)?;
    let credentials = Credentials::from_settings(&settings);
    credentials.validate()?;

    // Status changes only reach the log from here; nothing outlives the process.
    let store = InMemoryJobStore::with_jobs([options.job_name.as_str()]);
    let job = DiscoveryJob::new(&store, options.job_name.as_str(), options.list_kind);

    let handshake = Handshake::connect(credentials, settings.request_timeout())?;
    let result = job.run(handshake).await?;

    for (category, url) in options.list_kind.files(&result) {
        info!(category = category.label(), url, "Discovered file");
        println!("{url}");
    }
    job.complete();

    Ok(())
}
