use anyhow::Result;
use roster::commands::Cli;
use roster::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // In debug mode all message macros route through tracing; install a
    // subscriber so that output actually lands somewhere.
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=debug")))
            .init();
    }

    Cli::menu()
}
