use crate::config::FetchConfig;
use crate::errors::{AppError, AppResult};
use crate::models::ResourceType;
use crate::wilma::{self, Credentials};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Everything one run needs, extracted from the command line.
#[derive(Debug)]
pub struct RunArgs {
    pub resource_type: String,
    pub start_date: String,
    pub end_date: String,
    pub wilma_url: String,
    pub credentials: Credentials,
    pub output_path: PathBuf,
}

/// Builds the clap command: eight positional arguments, no flags beyond the
/// generated `--help` and `--version`.
pub fn command() -> Command<'static> {
    Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .arg(
            Arg::new("resource_type")
                .help("Schedule category to download: rooms, teachers or students")
                .required(true),
        )
        .arg(
            Arg::new("start_date")
                .help("First date of the range, DD.MM.YYYY")
                .required(true),
        )
        .arg(
            Arg::new("end_date")
                .help("Last date of the range (inclusive), DD.MM.YYYY")
                .required(true),
        )
        .arg(
            Arg::new("wilma_url")
                .help("Wilma instance address, e.g. demo.inschool.fi")
                .required(true),
        )
        .arg(Arg::new("user").help("Wilma username").required(true))
        .arg(Arg::new("password").help("Wilma password").required(true))
        .arg(
            Arg::new("apikey")
                .help("Shared API secret used to sign the login request")
                .required(true),
        )
        .arg(
            Arg::new("output_path")
                .help("Existing directory the JSON files are written to")
                .required(true),
        )
}

/// Moves parsed matches into a [`RunArgs`], wrapping the secrets.
pub fn extract_args(matches: &ArgMatches) -> RunArgs {
    let get = |name: &str| {
        matches
            .get_one::<String>(name)
            .expect("argument is required")
            .clone()
    };

    RunArgs {
        resource_type: get("resource_type"),
        start_date: get("start_date"),
        end_date: get("end_date"),
        wilma_url: get("wilma_url"),
        credentials: Credentials {
            username: get("user"),
            password: SecretString::new(get("password")),
            api_key: SecretString::new(get("apikey")),
        },
        output_path: PathBuf::from(get("output_path")),
    }
}

/// Parses the command line and executes one full run with the production
/// timing configuration.
pub async fn run() -> AppResult<()> {
    let matches = command().get_matches();
    let args = extract_args(&matches);
    run_workflow(&args, &FetchConfig::default()).await
}

/// Executes one full run: validate inputs, authenticate, expand the date
/// range, download the schedules.
///
/// The resource type and the output directory are checked before any network
/// activity. Every fatal path surfaces as an [`AppError`] for the caller to
/// map to an exit code.
pub async fn run_workflow(args: &RunArgs, config: &FetchConfig) -> AppResult<()> {
    let resource_type: ResourceType = args.resource_type.parse()?;

    if !args.output_path.is_dir() {
        return Err(AppError::InvalidInput(format!(
            "Output path {} is not an existing directory",
            args.output_path.display()
        )));
    }

    let base_url = wilma::normalize_base_url(&args.wilma_url)?;
    let session = wilma::login(base_url, &args.credentials, config).await?;

    let dates = wilma::expand_date_range(&args.start_date, &args.end_date)?;
    info!(
        resource_type = resource_type.as_str(),
        start_date = args.start_date.as_str(),
        end_date = args.end_date.as_str(),
        dates = dates.len(),
        "Starting schedule download"
    );

    wilma::fetch_schedules(&session, resource_type, &dates, &args.output_path, config).await?;

    info!(
        resource_type = resource_type.as_str(),
        dates_processed = dates.len(),
        "All operations completed successfully"
    );

    Ok(())
}
