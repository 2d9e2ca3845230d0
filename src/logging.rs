use std::env;
use std::io::IsTerminal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Diagnostic logging to stderr, filtered by `RESIZER_LOG` (default `info`).
pub fn init_logger() {
    let filter = env::var("RESIZER_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::new(filter);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_ansi(ansi_for(&std::io::stderr())),
        )
        .with(filter_layer)
        .init();
}

/// Colour only when the stream is an interactive terminal.
fn ansi_for(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirected_output_gets_no_colour() {
        let file = tempfile::tempfile().unwrap();
        assert!(!ansi_for(&file));
    }
}
