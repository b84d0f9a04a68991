use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match session_server::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "session server stopped");
            ExitCode::FAILURE
        }
    }
}
