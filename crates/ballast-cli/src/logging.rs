use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber.
///
/// Logs go to stderr so stdout stays reserved for emitted payloads and
/// command output.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
