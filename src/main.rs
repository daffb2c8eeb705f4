use std::process;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use genreguide::cli::{execute_command, output, Cli};
use genreguide::config::Settings;
use genreguide::exitcode;
use genreguide::infrastructure::ServiceContainer;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let local_dir = std::env::current_dir().ok();
    let settings = match Settings::load(local_dir.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            process::exit(exitcode::CONFIG);
        }
    };

    if cli.no_color || !settings.output.color {
        colored::control::set_override(false);
    }

    let container = ServiceContainer::new(settings);
    if let Err(e) = execute_command(&cli, &container) {
        output::error(&e);
        process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a noisy module filter
    let noisy_modules = ["rayon"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Formatted output directed to stderr, stdout stays clean for data
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
