//! SmartReader CLI - summarise articles and ask about them
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use smartreader::notify::ConsoleNotifier;
use smartreader::platform::TerminalPlatform;
use smartreader::poller::{self, PollSettings};
use smartreader::ui::{self, Services};
use smartreader::views::{Listing, ResultState, SubmitForm};
use smartreader::{logging, Config, HttpApi, Readiness, ReadinessPoller, Route, SummaryApi};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "smartreader")]
#[command(author, version, about = "Summarise articles and ask questions about them", long_about = None)]
struct Cli {
    /// Backend API base URL (overrides config and SMARTREADER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Path to a smartreader.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the backend is ready
    Status {
        /// Keep polling until the backend is ready
        #[arg(long)]
        wait: bool,
    },
    /// Summarise a URL or a piece of text
    #[command(alias = "summarize")]
    Summarise {
        /// Article URL
        #[arg(long, group = "source")]
        url: Option<String>,
        /// Text to summarise
        #[arg(long, group = "source")]
        text: Option<String>,
        /// Read the text from a file
        #[arg(long, group = "source")]
        file: Option<PathBuf>,
        /// Compose the text in $EDITOR
        #[arg(long, group = "source")]
        edit: bool,
        /// Title for text submissions
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Show a stored summary
    Show {
        /// Summary id
        id: String,
    },
    /// Ask a question about a summary
    Ask {
        /// Summary id
        id: String,
        /// The question
        question: String,
    },
    /// List earlier summaries
    History {
        /// Only show summaries whose title or text contains this
        #[arg(long)]
        filter: Option<String>,
    },
    /// Start the interactive navigator at a path like /summary/<id>
    Open {
        path: String,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(logging::level_for(cli.verbose));

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "smartreader", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let api: Arc<dyn SummaryApi> = Arc::new(HttpApi::from_config(&config)?);
    let services = Services {
        api,
        notifier: Arc::new(ConsoleNotifier),
        platform: Arc::new(TerminalPlatform),
        config,
    };

    match cli.command {
        Some(Commands::Status { wait }) => status(&services, wait).await?,
        Some(Commands::Summarise {
            url,
            text,
            file,
            edit: compose,
            title,
        }) => {
            let form = match (url, text, file, compose) {
                (Some(url), _, _, _) => SubmitForm::url(url),
                (_, Some(text), _, _) => SubmitForm::text(text, title),
                (_, _, Some(path), _) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    SubmitForm::text(text, title)
                }
                (_, _, _, true) => SubmitForm::text(edit::edit("")?, title),
                _ if atty::isnt(atty::Stream::Stdin) => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    SubmitForm::text(text, title)
                }
                _ => bail!("nothing to summarise: pass --url, --text, --file or --edit"),
            };
            summarise(&services, form).await?;
        }
        Some(Commands::Show { id }) => show(&services, &id).await?,
        Some(Commands::Ask { id, question }) => ask(&services, &id, question).await?,
        Some(Commands::History { filter }) => history(&services, filter).await?,
        Some(Commands::Open { path }) => ui::run(services, Route::parse(&path)).await?,
        Some(Commands::Completions { .. }) => {}
        None => {
            // Default: Launch the interactive navigator
            ui::run(services, Route::Home).await?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    config.api_url()?;
    Ok(config)
}

async fn status(services: &Services, wait: bool) -> anyhow::Result<()> {
    let readiness = if wait {
        let poller = ReadinessPoller::spawn(
            services.api.clone(),
            services.notifier.clone(),
            PollSettings::from(&services.config.poll),
        );
        let mut changes = poller.subscribe();
        let readiness = loop {
            let current = *changes.borrow_and_update();
            if current == Readiness::Initializing {
                println!("{}", "⏳ Server is initializing. This may take a minute...".yellow());
            }
            if current.is_ready() || changes.changed().await.is_err() {
                break current;
            }
        };
        poller.shutdown().await;
        readiness
    } else {
        let result = services.api.status().await;
        if let Err(e) = &result {
            log::warn!("server check failed: {}", e);
        }
        poller::evaluate(&result, &PollSettings::default()).readiness
    };

    match readiness {
        Readiness::Ready => println!("{}", "✅ Server is ready".green()),
        Readiness::Initializing => println!("{}", "⏳ Server is initializing".yellow()),
        Readiness::Unreachable | Readiness::Unknown => {
            bail!("cannot connect to server at {}", services.config.api.url)
        }
    }
    Ok(())
}

async fn summarise(services: &Services, form: SubmitForm) -> anyhow::Result<()> {
    let mut view = services.submit_view();
    view.form = form;
    println!("Processing your content...");

    match view.submit().await {
        Some(Route::Summary(id)) => show(services, &id).await,
        Some(other) => bail!("unexpected route {}", other),
        None => match view.error() {
            Some(err) => bail!("{}", err),
            None => bail!("summarisation failed"),
        },
    }
}

async fn show(services: &Services, id: &str) -> anyhow::Result<()> {
    let mut view = services.result_view(id);
    view.load().await;
    match view.state() {
        ResultState::Loaded(summary) => {
            ui::print_summary(summary);
            println!("{}", view.page_url().dimmed());
            Ok(())
        }
        ResultState::NotFound => bail!("summary not found: {}", id),
        ResultState::Failed(message) => bail!("{}", message),
        ResultState::Loading => Ok(()),
    }
}

async fn ask(services: &Services, id: &str, question: String) -> anyhow::Result<()> {
    let mut view = services.result_view(id);
    view.load().await;
    match view.state() {
        ResultState::Loaded(_) => {}
        ResultState::NotFound => bail!("summary not found: {}", id),
        ResultState::Failed(message) => bail!("{}", message),
        ResultState::Loading => return Ok(()),
    }

    view.question = question;
    if !view.ask().await {
        bail!("no answer received");
    }
    if let Some(qa) = view.summary().and_then(|s| s.questions.first()) {
        println!("{} {}", "Q:".bold(), qa.question);
        println!("{} {}", "A:".bold(), qa.answer);
    }
    Ok(())
}

async fn history(services: &Services, filter: Option<String>) -> anyhow::Result<()> {
    let mut view = services.history_view();
    view.load().await;
    if let Some(term) = filter {
        view.set_filter(term);
    }

    match view.listing() {
        Listing::Matches(matches) => {
            println!("Stored summaries ({}):\n", matches.len());
            ui::print_history(&matches);
        }
        Listing::Empty => println!("You haven't summarised any articles yet."),
        Listing::NoMatches => println!("No results match your search."),
        Listing::Failed(message) => bail!("{}", message),
        Listing::Loading => {}
    }
    Ok(())
}
