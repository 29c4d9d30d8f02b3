mod cli;

use cli::Args;
use dep_visualizer::adapters::outbound::console::StderrProgressReporter;
use dep_visualizer::application::dto::ExplorationRequest;
use dep_visualizer::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType, SourceFactory,
};
use dep_visualizer::application::read_models::ReportReadModelBuilder;
use dep_visualizer::application::use_cases::ExploreDependenciesUseCase;
use dep_visualizer::config::{discover_config, load_config_from_path, Settings};
use dep_visualizer::shared::error::ExitCode;
use dep_visualizer::shared::Result;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter
const LOG_ENV_VAR: &str = "DEP_VISUALIZER_LOG";

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::from_error(&e).as_i32());
    }
}

fn init_logging(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::resolve(config, args.overrides())?;
    tracing::debug!(?settings, "resolved settings");

    // Create adapters (Dependency Injection)
    let source = SourceFactory::create(settings.source.clone(), settings.max_requests)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = ExploreDependenciesUseCase::new(source, progress_reporter);

    let request = ExplorationRequest::new(
        settings.package_name.clone(),
        settings.max_depth,
        settings.filter_substring.clone(),
        settings.show_reverse,
    );
    let response = use_case.execute(request)?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));

    let read_model = ReportReadModelBuilder::build(&response)?;
    let formatter = FormatterFactory::create(settings.format, settings.tree_style);
    let formatted_output = formatter.format(&read_model)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatted_output)?;

    Ok(())
}
