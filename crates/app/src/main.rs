use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clock, FileBankSource, HttpBankSource, QuestionBankService, QuestionBankSource,
    QuizFlowService,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};
use url::Url;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBank { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBank { raw } => write!(f, "invalid --bank value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_flow: Arc<QuizFlowService>,
}

impl UiApp for DesktopApp {
    fn quiz_flow(&self) -> Arc<QuizFlowService> {
        Arc::clone(&self.quiz_flow)
    }
}

struct Args {
    bank: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path-or-url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank quiz_data.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZWARS_BANK, QUIZWARS_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank =
            std::env::var("QUIZWARS_BANK").unwrap_or_else(|_| "quiz_data.json".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBank { raw: value });
                    }
                    bank = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank })
    }
}

// http(s) values fetch over the network; anything else is a local file.
fn bank_source(bank: &str) -> Result<Arc<dyn QuestionBankSource>, Box<dyn std::error::Error>> {
    if bank.starts_with("http://") || bank.starts_with("https://") {
        let endpoint = Url::parse(bank).map_err(|_| ArgsError::InvalidBank {
            raw: bank.to_string(),
        })?;
        return Ok(Arc::new(HttpBankSource::new(endpoint)?));
    }
    Ok(Arc::new(FileBankSource::new(bank)))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("QUIZWARS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let source = bank_source(&parsed.bank)?;
    let clock = Clock::default_clock();
    let quiz_flow = Arc::new(QuizFlowService::new(
        clock,
        QuestionBankService::new(source),
    ));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_flow });
    let context = build_app_context(&app);

    // Explicitly not always-on-top so the app doesn't behave like a modal
    // window in dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("QuizWars")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
