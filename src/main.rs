use errors::AppResult;
use sonar_opendata::{cli, errors, logging};

fn main() -> AppResult<()> {
    logging::init_logging();

    let rt =
        tokio::runtime::Runtime::new().map_err(|e| errors::AppError::IoError(e.to_string()))?;

    rt.block_on(cli::cli())
}
