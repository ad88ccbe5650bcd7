mod analyze;
mod cli;
mod infra;
mod routes;
mod server;

use labelscan::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
