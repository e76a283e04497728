mod candidate;
mod cli;
mod demo;
mod driver;
mod infra;
mod launcher;
mod routes;
mod server;

use talent_match::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
