mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use award_eligibility::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
