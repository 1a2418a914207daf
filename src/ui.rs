//! Terminal front end.
//!
//! An interactive navigator over the routes, built on dialoguer prompts, and
//! the printers shared with the one-shot subcommands.

use crate::api::SummaryApi;
use crate::config::Config;
use crate::notify::Notifier;
use crate::platform::Platform;
use crate::poller::{PollSettings, Readiness, ReadinessPoller};
use crate::route::Route;
use crate::summary::{truncate_text, Summary};
use crate::views::{HistoryView, InputMode, Listing, ResultState, ResultView, SubmitView};
use colored::Colorize;
use dialoguer::{Input, Select};
use std::sync::Arc;

/// Services the views depend on
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn SummaryApi>,
    pub notifier: Arc<dyn Notifier>,
    pub platform: Arc<dyn Platform>,
    pub config: Config,
}

impl Services {
    pub fn submit_view(&self) -> SubmitView {
        SubmitView::new(self.api.clone(), self.notifier.clone())
    }

    pub fn result_view(&self, id: &str) -> ResultView {
        ResultView::new(
            self.api.clone(),
            self.notifier.clone(),
            self.platform.clone(),
            self.config.share.web_url.clone(),
            id,
        )
    }

    pub fn history_view(&self) -> HistoryView {
        HistoryView::new(self.api.clone(), self.notifier.clone())
    }
}

/// Run the interactive navigator starting at `start`.
///
/// The readiness poller lives exactly as long as the session.
pub async fn run(services: Services, start: Route) -> anyhow::Result<()> {
    let poller = ReadinessPoller::spawn(
        services.api.clone(),
        services.notifier.clone(),
        PollSettings::from(&services.config.poll),
    );

    let outcome = navigate(&services, &poller, start).await;
    poller.shutdown().await;
    outcome
}

async fn navigate(
    services: &Services,
    poller: &ReadinessPoller,
    start: Route,
) -> anyhow::Result<()> {
    let mut route = Some(start);
    while let Some(current) = route {
        print_banner(poller.readiness());
        log::debug!("navigating to {}", current);
        route = match current {
            Route::Home => home(services).await?,
            Route::Summary(id) => summary_screen(services, &id).await?,
            Route::History => history_screen(services).await?,
        };
    }
    Ok(())
}

fn print_banner(readiness: Readiness) {
    if readiness.blocks() {
        println!(
            "{}",
            "⏳ Server is initializing. This may take a minute...".yellow()
        );
    }
}

/// Home: pick an input mode and submit. `None` quits.
async fn home(services: &Services) -> anyhow::Result<Option<Route>> {
    println!("\n{}", "SmartReader".bold());
    println!("Transform lengthy articles into concise, informative summaries\n");

    let choices = ["Summarise a URL", "Summarise text", "History", "Quit"];
    let choice = Select::new()
        .with_prompt("What would you like to do?")
        .items(&choices)
        .default(0)
        .interact()?;

    let mut view = services.submit_view();
    match choice {
        0 => {
            view.set_mode(InputMode::Url);
            view.form.url = Input::<String>::new()
                .with_prompt("Article URL")
                .allow_empty(true)
                .interact_text()?;
        }
        1 => {
            view.set_mode(InputMode::Text);
            view.form.title = Input::<String>::new()
                .with_prompt("Title (optional)")
                .allow_empty(true)
                .interact_text()?;
            view.form.text = edit::edit("")?;
        }
        2 => return Ok(Some(Route::History)),
        _ => return Ok(None),
    }

    println!("{}", "Processing your content...".dimmed());
    match view.submit().await {
        Some(route) => Ok(Some(route)),
        None => {
            if let Some(err) = view.error() {
                println!("{}", err.to_string().red());
            }
            Ok(Some(Route::Home))
        }
    }
}

async fn summary_screen(services: &Services, id: &str) -> anyhow::Result<Option<Route>> {
    let mut view = services.result_view(id);
    println!("{}", "Loading summary...".dimmed());
    view.load().await;

    loop {
        let summary = match view.state() {
            ResultState::Loaded(summary) => summary.clone(),
            ResultState::NotFound => {
                print_error_state(
                    "Summary Not Found",
                    "The requested summary could not be found.",
                );
                return back_home();
            }
            ResultState::Failed(message) => {
                print_error_state("Error", message);
                return back_home();
            }
            ResultState::Loading => return Ok(Some(Route::Home)),
        };
        print_summary(&summary);

        let mut choices = vec!["Ask a question", "Copy summary", "Share"];
        if !summary.questions.is_empty() {
            choices.push("Copy an answer");
        }
        choices.extend(["History", "Home", "Quit"]);

        let picked = Select::new()
            .with_prompt("Actions")
            .items(&choices)
            .default(0)
            .interact()?;
        match choices[picked] {
            "Ask a question" => {
                view.question = Input::<String>::new()
                    .with_prompt("Ask something about the content")
                    .with_initial_text(view.question.clone())
                    .allow_empty(true)
                    .interact_text()?;
                println!("{}", "Processing...".dimmed());
                view.ask().await;
            }
            "Copy summary" => view.copy_summary(),
            "Share" => view.share(),
            "Copy an answer" => {
                let labels: Vec<String> = summary
                    .questions
                    .iter()
                    .map(|qa| truncate_text(&qa.question, 60))
                    .collect();
                let idx = Select::new()
                    .with_prompt("Which answer?")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                view.copy_answer(&summary.questions[idx].id);
            }
            "History" => return Ok(Some(Route::History)),
            "Home" => return Ok(Some(Route::Home)),
            _ => return Ok(None),
        }
    }
}

async fn history_screen(services: &Services) -> anyhow::Result<Option<Route>> {
    let mut view = services.history_view();
    println!("{}", "Loading history...".dimmed());
    view.load().await;

    loop {
        let mut targets: Vec<Option<Route>> = Vec::new();
        let mut labels: Vec<String> = Vec::new();

        match view.listing() {
            Listing::Loading => return Ok(Some(Route::Home)),
            Listing::Failed(message) => {
                print_error_state("Error", message);
                return back_home();
            }
            Listing::Empty => {
                println!("You haven't summarised any articles yet.");
                labels.push("Start summarising".to_string());
                targets.push(Some(Route::Home));
            }
            Listing::NoMatches => {
                println!("No results match your search.");
                labels.push("Clear search".to_string());
                targets.push(None);
            }
            Listing::Matches(matches) => {
                for summary in matches {
                    labels.push(listing_label(summary));
                    targets.push(Some(Route::Summary(summary.id.clone())));
                }
            }
        }

        println!("\n{}", "Reading History".bold());
        if !view.filter().is_empty() {
            println!("Filter: {}", view.filter().cyan());
        }
        let search_idx = labels.len();
        labels.push("Search history...".to_string());
        labels.push("Home".to_string());

        let picked = Select::new()
            .items(&labels)
            .default(0)
            .interact()?;
        if picked == search_idx {
            let term = Input::<String>::new()
                .with_prompt("Search")
                .with_initial_text(view.filter().to_string())
                .allow_empty(true)
                .interact_text()?;
            view.set_filter(term);
        } else if picked > search_idx {
            return Ok(Some(Route::Home));
        } else {
            match &targets[picked] {
                Some(route) => return Ok(Some(route.clone())),
                None => view.clear_filter(),
            }
        }
    }
}

fn back_home() -> anyhow::Result<Option<Route>> {
    let choices = ["Back to Home", "Quit"];
    let picked = Select::new().items(&choices).default(0).interact()?;
    Ok((picked == 0).then_some(Route::Home))
}

fn print_error_state(heading: &str, message: &str) {
    println!("\n{}", heading.red().bold());
    println!("{}", message);
}

fn listing_label(summary: &Summary) -> String {
    let mut meta = format_date(summary);
    if let Some(host) = summary.source_host() {
        meta.push_str(&format!(" · {}", host));
    }
    format!(
        "{} - {} ({})",
        truncate_text(&summary.title, 60),
        truncate_text(&summary.summary, 120),
        meta
    )
}

fn format_date(summary: &Summary) -> String {
    summary
        .created()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| summary.created_at.clone())
}

/// Print a summary with its questions, newest first
pub fn print_summary(summary: &Summary) {
    println!("\n=== {} ===\n", summary.title.bold());
    if let Some(url) = &summary.url {
        println!("🔗 {}", url.underline());
    }
    println!("🕒 {}\n", format_date(summary));

    println!("💡 Summary:");
    println!("  {}\n", summary.summary);

    if !summary.questions.is_empty() {
        println!("❓ Questions & Answers:");
        for qa in &summary.questions {
            println!("  {} {}", "Q:".bold(), qa.question);
            println!("  {} {}\n", "A:".bold(), qa.answer);
        }
    }
}

/// Print one history entry per summary
pub fn print_history(summaries: &[&Summary]) {
    for summary in summaries {
        println!("📄 {} ({})", truncate_text(&summary.title, 60), format_date(summary));
        println!("   id: {}", summary.id);
        if let Some(host) = summary.source_host() {
            println!("   {}", host);
        }
        println!("   {}\n", truncate_text(&summary.summary, 120));
    }
}
