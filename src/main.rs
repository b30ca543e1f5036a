/// Entry point for the EPA reporter.
///
/// Logging is configured through `RUST_LOG`; everything else is read from the environment
/// by [`epa_reporter::config::Config::from_env`].
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., an invalid `DOCKER_HOST`, an unreachable
/// container runtime, or a listen address that cannot be bound).
///
/// # Examples
///
/// ```bash
/// RUST_LOG=info EPA_LISTEN=127.0.0.1:4040 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    epa_reporter::run().await
}
