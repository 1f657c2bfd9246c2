use chrono::Utc;
use clap::Parser;
use starmark::application::{
    init::init, observe::parse_observations, AnnotateService, ConfigService, ListReposService,
    ListTagsService, ObserveService, StarService,
};
use starmark::cli::{output, Cli, Commands};
use starmark::domain::RepoFilter;
use starmark::error::StarmarkError;
use starmark::infrastructure::{AnnotationStore, Config, FileStore};
use std::io::Read;
use std::time::Duration;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Open the annotation store for the effective account namespace.
///
/// Data-touching commands also run the opportunistic sweep here, the
/// stand-in for the original's once-per-page-load expiry check.
fn open_annotations(
    account_override: Option<String>,
    sweep: bool,
) -> Result<(AnnotationStore, Config), StarmarkError> {
    let file_store = FileStore::discover()?;
    let config = file_store.load_config()?;
    let account = account_override.or_else(|| config.account.clone());
    let store = AnnotationStore::open(file_store, account, config.grace_period())?;

    if sweep {
        store.sweep_expired(Utc::now())?;
    }

    Ok((store, config))
}

fn run(cli: Cli) -> Result<(), StarmarkError> {
    let account = cli.account;

    match cli.command {
        Some(Commands::Init { path }) => init(&path, account),
        Some(Commands::Observe {
            file,
            watch,
            timeout,
            interval,
        }) => {
            let (store, config) = open_annotations(account, true)?;
            let service = ObserveService::new(store, config.cache_unstarred);

            // clap enforces --file alongside --watch
            let report = if let (true, Some(path)) = (watch, &file) {
                match service.execute_watch(
                    path,
                    Duration::from_millis(interval),
                    Duration::from_secs(timeout),
                )? {
                    Some(report) => report,
                    None => {
                        println!("Watch expired without observations");
                        return Ok(());
                    }
                }
            } else {
                let input = match file {
                    Some(path) => std::fs::read_to_string(path)?,
                    None => {
                        let mut input = String::new();
                        std::io::stdin().read_to_string(&mut input)?;
                        input
                    }
                };
                let observations = parse_observations(&input)?;
                service.execute(&observations)?
            };

            println!(
                "Cached {} repositories ({} restored, {} skipped)",
                report.cached, report.restored, report.skipped
            );
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let (store, _) = open_annotations(account, true)?;

            match store.get_repo(&id)? {
                Some(record) => {
                    let tags = store.get_tags(&id)?;
                    let note = store.get_note(&id)?;
                    print!("{}", output::format_repo_details(&record, &tags, &note));
                }
                None => println!("No cached record for {}", id),
            }
            Ok(())
        }
        Some(Commands::List { tag, lang, query }) => {
            let (store, _) = open_annotations(account, true)?;
            let service = ListReposService::new(store);

            let filter = RepoFilter::new(tag, lang, query);
            let listings = service.execute(&filter)?;
            print!("{}", output::format_repo_list(&listings));
            Ok(())
        }
        Some(Commands::Tag { id, labels, clear }) => {
            let (store, _) = open_annotations(account, true)?;
            let service = AnnotateService::new(store);

            if clear {
                service.clear_tags(&id)?;
                println!("Cleared tags for {}", id);
            } else if labels.is_empty() {
                print!("{}", output::format_tag_list(&service.tags(&id)?));
            } else {
                let tags = service.set_tags(&id, &labels)?;
                println!("Set {} tag(s) for {}", tags.len(), id);
            }
            Ok(())
        }
        Some(Commands::Note { id, text, clear }) => {
            let (store, _) = open_annotations(account, true)?;
            let service = AnnotateService::new(store);

            if clear {
                service.clear_note(&id)?;
                println!("Cleared note for {}", id);
            } else if let Some(text) = text {
                service.set_note(&id, &text)?;
                println!("Set note for {}", id);
            } else {
                let note = service.note(&id)?;
                if note.is_empty() {
                    println!("No note for {}", id);
                } else {
                    println!("{}", note);
                }
            }
            Ok(())
        }
        Some(Commands::Tags) => {
            let (store, _) = open_annotations(account, true)?;
            let service = ListTagsService::new(store);

            print!("{}", output::format_tag_list(&service.execute()?));
            Ok(())
        }
        Some(Commands::Star { id }) => {
            let (store, _) = open_annotations(account, true)?;
            let service = StarService::new(store);

            if service.star(&id)? {
                println!("Restored {} from pending deletion", id);
            } else {
                println!("Nothing pending for {}", id);
            }
            Ok(())
        }
        Some(Commands::Unstar { id }) => {
            let (store, _) = open_annotations(account, true)?;
            let service = StarService::new(store);

            if service.unstar(&id)? {
                println!("Moved {} to pending deletion", id);
            } else {
                println!("No cached record for {}", id);
            }
            Ok(())
        }
        Some(Commands::Sweep) => {
            let (store, _) = open_annotations(account, false)?;
            let service = StarService::new(store);

            let removed = service.sweep(Utc::now())?;
            println!("Removed {} expired pending entries", removed);
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let file_store = FileStore::discover()?;
            let service = ConfigService::new(file_store);

            if list {
                let config = service.list()?;
                println!(
                    "account = {}",
                    config.account.unwrap_or_else(|| "shared".to_string())
                );
                println!("grace_period_ms = {}", config.grace_period_ms);
                println!("cache_unstarred = {}", config.cache_unstarred);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: starmark config [--list | <key> [<value>]]");
                println!("Valid keys: account, grace_period_ms, cache_unstarred, created");
                Ok(())
            }
        }
        None => {
            println!("starmark - Starred-repository annotation cache");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
