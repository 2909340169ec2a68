// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::File;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rondo::audio::output::default_device_name;
use rondo::audio::{ChimePlayer, FeedbackCue};
use rondo::config::{QuizFile, Settings};
use rondo::timeline::format_time;
use rondo::ui::App;
use rondo::{ClockPlayer, Session};

const DEFAULT_SETTINGS: &str = "rondo.toml";

fn print_usage() {
    println!("RONDO - Section Detective");
    println!();
    println!("Usage: rondo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --quiz <FILE>           Load the piece and section layout from a YAML file");
    println!("  --settings <FILE>       Settings file (default {})", DEFAULT_SETTINGS);
    println!("  --no-chime              Disable the success chime");
    println!("  --check <FILE>          Validate a quiz file and print its sections");
    println!("  --timeline              Print the section layout and exit");
    println!("  --write-default <FILE>  Write the built-in quiz to a YAML file");
    println!("  --help                  Show this help message");
}

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    quiz: Option<String>,
    settings: Option<String>,
    no_chime: bool,
    check: Option<String>,
    print_timeline: bool,
    write_default: Option<String>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a file path", flag))
        };
        match arg.as_str() {
            "--quiz" => options.quiz = Some(value("--quiz")?),
            "--settings" => options.settings = Some(value("--settings")?),
            "--check" => options.check = Some(value("--check")?),
            "--write-default" => options.write_default = Some(value("--write-default")?),
            "--no-chime" => options.no_chime = true,
            "--timeline" => options.print_timeline = true,
            "--help" | "-h" => options.help = true,
            other => return Err(anyhow!("Unknown option: {}", other)),
        }
    }

    Ok(options)
}

fn print_timeline(quiz: &QuizFile) -> Result<()> {
    let timeline = quiz.timeline()?;
    let duration = quiz.piece.duration;

    println!("{}: {} ({})", quiz.piece.composer, quiz.piece.title, format_time(duration));
    for (i, section) in timeline.sections().iter().enumerate() {
        let end = timeline.effective_end(i, duration).unwrap_or(section.end);
        println!(
            "  {:>2}. {:<5} {:>5} - {:<5} {}",
            i + 1,
            section.kind.label(),
            format_time(section.start),
            format_time(end),
            section.kind.description()
        );
    }
    Ok(())
}

fn init_logging(path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file: {}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rondo=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return Ok(());
    }

    if let Some(path) = &options.check {
        let quiz = QuizFile::load(path)?;
        print_timeline(&quiz)?;
        println!("OK: {} sections", quiz.sections.len());
        return Ok(());
    }

    if let Some(path) = &options.write_default {
        QuizFile::default().save(path)?;
        println!("Wrote {}", path);
        return Ok(());
    }

    let quiz = match &options.quiz {
        Some(path) => QuizFile::load(path)?,
        None => QuizFile::default(),
    };

    if options.print_timeline {
        return print_timeline(&quiz);
    }

    let settings_path = options.settings.as_deref().unwrap_or(DEFAULT_SETTINGS);
    let mut settings = Settings::load_or_default(settings_path)?;
    if options.no_chime {
        settings.chime = false;
    }

    init_logging(&settings.log_file)?;
    info!(title = %quiz.piece.title, sections = quiz.sections.len(), "starting");

    let timeline = quiz.timeline()?;
    let player = ClockPlayer::new(quiz.piece.audio_url.clone(), quiz.piece.duration);
    let mut session = Session::new(timeline, player);

    if settings.chime {
        match ChimePlayer::open(settings.chime_gain) {
            Ok(chime) => {
                info!(
                    device = ?default_device_name(),
                    sample_rate = chime.config().sample_rate,
                    "chime ready"
                );
                session = session.with_cue(Box::new(chime) as Box<dyn FeedbackCue>);
            }
            Err(e) => warn!("chime unavailable: {}", e),
        }
    }

    let mut app = App::new(quiz.piece, &settings)?;
    app.run(&mut session).await?;

    info!(stars = session.score(), "exiting");
    Ok(())
}
