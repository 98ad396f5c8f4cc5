// src/bin/nightingale.rs

//! The `nightingale` command-line tool.

use anyhow::{Result, anyhow};
use colored::*;
use nightingale::{
    cli::{Action, Cli, Invocation, report},
    constants::LOG_FILENAME,
    core::{
        config::{PipelineConfig, Patterns},
        discovery, extractor,
        observer::LogObserver,
        settings::{self, Settings},
    },
    i18n::{Language, Localize, Localizer},
};
use std::{fs::File, time::Instant};

/// The main entry point of the `nightingale` application.
/// It loads the settings, parses arguments, runs the pipeline and performs
/// centralized error handling.
fn main() {
    let started = Instant::now();
    let mut localizer = Localizer::default();

    if let Err(e) = run_cli(started, &mut localizer) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(started: Instant, localizer: &mut Localizer) -> Result<()> {
    // A broken settings file must not prevent `--help` or `--version`, so its
    // error is only raised once a document is about to be processed.
    let mut deferred: Option<Box<dyn Localize>> = None;
    let settings = settings::load_settings().unwrap_or_else(|e| {
        deferred = Some(Box::new(e));
        Settings::default()
    });

    let Some(cli) = Cli::parse_args(std::env::args_os()) else {
        init_logging(false)?;
        report_deferred(deferred.as_deref(), localizer);
        print_usage(localizer);
        return Ok(());
    };

    let language: Language = match cli.language(&settings) {
        Ok(language) => language,
        // Only the settings file named this language; the flag was absent.
        Err(e) if cli.language.is_none() => {
            if deferred.is_none() {
                deferred = Some(Box::new(e));
            }
            Language::default()
        }
        Err(e) => return Err(anyhow!(localizer.render(&e))),
    };
    *localizer = Localizer::new(language.clone());

    let action = cli
        .action(&settings, &language)
        .map_err(|e| anyhow!(localizer.render(&e)))?;

    match action {
        Action::ShowUsage => {
            init_logging(false)?;
            report_deferred(deferred.as_deref(), localizer);
            print_usage(localizer);
        }
        Action::ShowVersion => {
            init_logging(false)?;
            report_deferred(deferred.as_deref(), localizer);
            println!("{}", report::version_banner(localizer));
            println!("{}", report::notes(localizer));
        }
        Action::Process(invocation) => {
            if let Some(e) = deferred {
                return Err(anyhow!(localizer.render(e.as_ref())));
            }
            init_logging(invocation.options.logging)?;
            process(&invocation, &settings, localizer)?;
            println!("\n{}", report::elapsed(localizer, started.elapsed()));
        }
    }
    Ok(())
}

fn report_deferred(error: Option<&dyn Localize>, localizer: &Localizer) {
    if let Some(e) = error {
        log::debug!("Settings ignored: {}", localizer.render(e));
    }
}

fn print_usage(localizer: &Localizer) {
    println!("{}", report::version_banner(localizer));
    print!("{}", report::usage(localizer));
}

/// With `--log`, every message from `Info` up goes to the log file;
/// otherwise `RUST_LOG` decides as usual.
fn init_logging(to_file: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if to_file {
        let file = File::create(LOG_FILENAME)
            .map_err(|e| anyhow!("Could not create '{}': {}", LOG_FILENAME, e))?;
        builder
            .filter_level(log::LevelFilter::Info)
            .target(env_logger::Target::Pipe(Box::new(file)));
    }
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized.");
    }
    Ok(())
}

fn process(invocation: &Invocation, settings: &Settings, localizer: &Localizer) -> Result<()> {
    log::debug!("Invocation: {:?}", invocation);

    let discovered = discovery::discover(&invocation.reference, &settings.file_types())
        .map_err(|e| anyhow!(localizer.render(&e)))?;
    log::info!("Processing '{}'", discovered.path.display());

    let mut patterns = Patterns::default().with_file_type(discovered.file_type.pattern.clone());
    if let Some(application) = &settings.application_tag {
        patterns = patterns.with_application(application.clone());
    }
    let config = PipelineConfig::new(discovered.path).with_patterns(patterns);

    let directives = extractor::process(&config, &mut LogObserver)
        .map_err(|e| anyhow!(localizer.render(&e)))?;

    print!("{}", report::summary(localizer, &directives, &invocation.options));
    Ok(())
}
