use anyhow::Result;
use dorofy::commands::Cli;
use dorofy::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured log output only when explicitly requested; normal runs
    // print through the message macros.
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    Cli::menu()
}
