mod app;

use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Log file written next to the binary. The TUI owns stdout, so logs go to
/// a file instead.
const LOG_FILE: &str = "mazewalk.log";

fn main() -> std::io::Result<()> {
    // Keep the guard alive for the whole run so buffered logs get flushed
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (log_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(log_writer.with_max_level(tracing::Level::DEBUG))
        .with_ansi(false)
        .init();
    tracing::info!("[main] starting mazewalk");

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let result = app::run(&mut stdout);
    app::restore_terminal(&mut stdout)?;

    tracing::info!("[main] exiting");
    result
}
