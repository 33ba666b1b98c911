use std::process;
use tsort::cli::Cli;
use tsort::cli_handlers;

fn main() {
    // Logs share stderr with loop reports; stdout carries only sorted keys
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match cli_handlers::handle_sort(&cli.input()) {
        Ok(report) if report.is_total_order() => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("tsort: {e:#}");
            process::exit(1);
        }
    }
}
