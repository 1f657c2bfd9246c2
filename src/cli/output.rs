//! Output formatting utilities

use crate::application::RepoListing;
use crate::domain::RepoRecord;

/// Format a repository listing for display
pub fn format_repo_list(listings: &[RepoListing]) -> String {
    if listings.is_empty() {
        return "No repositories found".to_string();
    }

    let mut output = String::new();
    for listing in listings {
        let record = &listing.record;
        let name = record.name.as_deref().unwrap_or("(unknown)");
        output.push_str(&format!("{}  {}", record.id, name));

        if let Some(stars) = record.stars {
            output.push_str(&format!("  ★{}", stars));
        }
        if let Some(language) = &record.language {
            output.push_str(&format!("  [{}]", language));
        }
        for tag in &listing.tags {
            output.push_str(&format!("  #{}", tag));
        }
        output.push('\n');
    }
    output
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!("#{}\n", tag));
    }

    output
}

/// Format one repository's cached record with its annotations.
pub fn format_repo_details(record: &RepoRecord, tags: &[String], note: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({})\n",
        record.name.as_deref().unwrap_or("(unknown)"),
        record.id
    ));

    if let Some(description) = &record.description {
        output.push_str(&format!("  {}\n", description));
    }

    let mut meta = Vec::new();
    if let Some(language) = &record.language {
        meta.push(format!("language: {}", language));
    }
    if let Some(stars) = record.stars {
        meta.push(format!("stars: {}", stars));
    }
    if let Some(forks) = record.forks {
        meta.push(format!("forks: {}", forks));
    }
    if !meta.is_empty() {
        output.push_str(&format!("  {}\n", meta.join("  ")));
    }

    if let Some(updated) = &record.updated_display {
        output.push_str(&format!("  {}\n", updated));
    }

    if !tags.is_empty() {
        let tagged: Vec<String> = tags.iter().map(|t| format!("#{}", t)).collect();
        output.push_str(&format!("  tags: {}\n", tagged.join(" ")));
    }

    if !note.is_empty() {
        output.push_str(&format!("  note: {}\n", note));
    }

    output
}
