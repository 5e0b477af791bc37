use clap::Parser;
use futures::future::try_join_all;
use suggestions::form::{SubmitOutcome, WordForm};
use suggestions::render::render;
use suggestions::{ApiConfig, ListQuery, SuggestionError, WordSuggestion, WordSuggestions};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use utilities::{closest_word, input, str_to_bool};

mod prompts;
mod utilities;

/// Pages scanned for a similar word when a search finds nothing.
const SIMILARITY_PAGES: usize = 3;

/// Browse and submit word suggestions for the Igbo API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base url of the API, without the wordSuggestions segment
    #[arg(long, env = "IGBO_API_URL", default_value = "http://localhost:8080/api/v1")]
    api_url: String,

    /// Key sent in the X-API-Key header
    #[arg(long, env = "IGBO_API_KEY")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ApiConfig::new(&cli.api_url)?;
    if let Some(api_key) = cli.api_key {
        config = config.with_api_key(api_key);
    }
    let api = WordSuggestions::new(config);

    loop {
        let Some(line) = input(">> ")? else {
            break;
        };
        let mut command_parts = line.trim().split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            let argument = command_parts.collect::<Vec<&str>>().join(" ");
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "search" | "find" => {
                    search(&api, &argument).await;
                }
                "list" => {
                    list(&api, &argument).await;
                }
                "show" => {
                    show(&api, &argument).await;
                }
                "suggest" | "add" => {
                    suggest(&api, WordForm::new()).await?;
                }
                "edit" => {
                    edit(&api, &argument).await?;
                }
                "revise" => {
                    revise(&api, &argument).await?;
                }
                "remove" => {
                    remove(&api, &argument).await?;
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}

async fn search(api: &WordSuggestions, keyword: &str) {
    if keyword.is_empty() {
        println!("Usage: search <word>");
        return;
    }
    match api.get_word_suggestions(&ListQuery::new().keyword(keyword)).await {
        Ok(found) if !found.is_empty() => print_suggestions(&found),
        Ok(_) => {
            println!("Couldn't find the word you were looking for.");
            let pages = try_join_all((0..SIMILARITY_PAGES).map(|page| {
                let query = ListQuery::new().page(page);
                async move { api.get_word_suggestions(&query).await }
            }))
            .await;
            match pages {
                Ok(pages) => {
                    let words = pages.iter().flatten().map(|suggestion| &suggestion.word[..]);
                    if let Some(word) = closest_word(words, keyword) {
                        println!("Did you mean '{word}'?");
                    }
                }
                Err(error) => debug!(%error, "could not look for similar words"),
            }
        }
        Err(error) => report(&error),
    }
}

async fn list(api: &WordSuggestions, page: &str) {
    let page = if page.is_empty() {
        0
    } else {
        match page.parse::<usize>() {
            Ok(page) => page,
            Err(_) => {
                println!("Usage: list [page]");
                return;
            }
        }
    };
    match api.get_word_suggestions(&ListQuery::new().page(page)).await {
        Ok(suggestions) if suggestions.is_empty() => println!("No word suggestions on page {page}."),
        Ok(suggestions) => print_suggestions(&suggestions),
        Err(error) => report(&error),
    }
}

async fn show(api: &WordSuggestions, id: &str) {
    match api.get_word_suggestion(id).await {
        Ok(suggestion) => print_suggestions(&[suggestion]),
        Err(error) => report(&error),
    }
}

async fn suggest(api: &WordSuggestions, form: WordForm) -> anyhow::Result<()> {
    let form = prompts::fill_form(form)?;
    match form.submit(api).await {
        SubmitOutcome::Submitted {
            suggestion,
            subtitle,
        } => {
            println!("{subtitle} (id {})", suggestion.id);
        }
        SubmitOutcome::Failed { subtitle, reason } => {
            println!("{subtitle}");
            debug!(%reason, "word form was refused");
        }
    }
    Ok(())
}

async fn edit(api: &WordSuggestions, id: &str) -> anyhow::Result<()> {
    match api.get_word_suggestion(id).await {
        Ok(word) => suggest(api, WordForm::editing(&word)).await,
        Err(error) => {
            report(&error);
            Ok(())
        }
    }
}

async fn revise(api: &WordSuggestions, id: &str) -> anyhow::Result<()> {
    let current = match api.get_word_suggestion(id).await {
        Ok(current) => current,
        Err(error) => {
            report(&error);
            return Ok(());
        }
    };
    let update = prompts::fill_update(&current)?;
    match api.update_word_suggestion(id, &update).await {
        Ok(updated) => {
            println!("Updated the word suggestion successfully.");
            print_suggestions(&[updated]);
        }
        Err(error) => report(&error),
    }
    Ok(())
}

async fn remove(api: &WordSuggestions, id: &str) -> anyhow::Result<()> {
    let confirm = input(&format!("Delete word suggestion {id}? (y/N): "))?;
    if !confirm.and_then(|answer| str_to_bool(&answer)).unwrap_or(false) {
        return Ok(());
    }
    match api.delete_word_suggestion(id).await {
        Ok(_) => println!("Deleted the word suggestion successfully."),
        Err(error) => report(&error),
    }
    Ok(())
}

fn report(error: &SuggestionError) {
    match error.status() {
        Some(_) => println!("{error}"),
        None => eprintln!("Encountered an error while talking to the API: {error}"),
    }
}

fn print_suggestions(suggestions: &[WordSuggestion]) {
    for (index, suggestion) in suggestions.iter().enumerate() {
        if index != 0 {
            println!("----------------------------------------");
        }
        println!("[{}] approvals: {}", suggestion.id, suggestion.approvals);
        print!("{}", render(suggestion));
    }
}
