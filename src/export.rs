use clap::Parser;
use futures::stream::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;
use std::path::Path;

use crate::utils::colors::{color_category, ColorCategory};
use crate::utils::files::{ensure_parent_dir, sanitize_file_path, DiskFileSystem};
use crate::utils::http::build_client;
use crate::zotero::{api, get_port, Database, Item};

/// Export parameters
#[derive(Parser, Debug)]
#[command(about = "Export library items with their annotations as markdown notes")]
pub struct ExportArgs {
    /// Database to connect to
    #[arg(value_enum)]
    pub database: Database,

    /// Path where to save the notes
    #[arg(short, long, default_value = "zotero-notes")]
    pub path: String,

    /// Number of child-item requests to run concurrently
    #[arg(short, long, default_value_t = 10)]
    pub concurrency: usize,
}

/// Build the note path for an item under the output directory.
///
/// Untitled items fall back to their library key.
pub fn note_path(out_dir: &str, item: &Item) -> String {
    let title = if item.data.title.is_empty() {
        item.key.as_str()
    } else {
        item.data.title.as_str()
    };

    sanitize_file_path(&format!("{}/{}.md", out_dir, title))
}

/// Render an item and its annotations as a markdown note, with annotations
/// grouped under their highlight color category.
pub fn render_note(item: &Item, children: &[Item]) -> String {
    let title = if item.data.title.is_empty() {
        item.key.as_str()
    } else {
        item.data.title.as_str()
    };

    let mut note = String::new();
    note.push_str(&format!("# {}\n\n", title));
    note.push_str(&format!("Key: {}\n", item.key));
    if !item.data.item_type.is_empty() {
        note.push_str(&format!("Type: {}\n", item.data.item_type));
    }

    let annotations: Vec<&Item> = children.iter().filter(|c| c.is_annotation()).collect();

    for category in ColorCategory::ALL {
        let group: Vec<&&Item> = annotations
            .iter()
            .filter(|a| color_category(&a.data.annotation_color) == category)
            .collect();

        if group.is_empty() {
            continue;
        }

        note.push_str(&format!("\n## {}\n\n", category));

        for annotation in group {
            note.push_str(&format!("> {}\n", annotation.data.annotation_text));
            if !annotation.data.annotation_comment.is_empty() {
                note.push_str(&format!("\n{}\n", annotation.data.annotation_comment));
            }
            note.push('\n');
        }
    }

    note
}

/// Export every top-level library item with its annotations as a markdown note.
pub async fn export_notes(args: ExportArgs) -> io::Result<()> {
    let client = build_client()?;

    if !api::ping(&client, args.database).await {
        return Err(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            format!(
                "{} is not reachable on port {}",
                args.database,
                get_port(args.database)
            ),
        ));
    }

    println!("Fetching items from {}...", args.database);
    let items = api::fetch_top_items(&client, args.database).await?;
    println!("Found {} items", items.len());

    if items.is_empty() {
        return Ok(());
    }

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Fetching annotations");

    // Fetch child annotations for several items at a time
    let pb_clone = pb.clone();
    let fetched = futures::stream::iter(items.iter().map(|item| {
        let client = &client;
        let database = args.database;
        let pb = pb_clone.clone();
        async move {
            let result = api::fetch_children(client, database, &item.key).await;
            pb.inc(1);
            match result {
                Ok(children) => Some((item, children)),
                Err(e) => {
                    eprintln!("Failed to fetch children for {}: {}", item.key, e);
                    None
                }
            }
        }
    }))
    .buffer_unordered(args.concurrency)
    .collect::<Vec<_>>()
    .await;

    let mut failed = fetched.iter().filter(|result| result.is_none()).count();
    let mut written = 0;
    let disk = DiskFileSystem;

    for (item, children) in fetched.into_iter().flatten() {
        let path = note_path(&args.path, item);

        let result = ensure_parent_dir(&disk, Path::new(&path))
            .and_then(|_| fs::write(&path, render_note(item, &children)));

        match result {
            Ok(()) => written += 1,
            Err(e) => {
                eprintln!("Failed to write {}: {}", path, e);
                failed += 1;
            }
        }
    }

    pb.finish_with_message("done");

    println!("\nExported {} notes to {}", written, args.path);
    if failed > 0 {
        println!("Failed to export {} items", failed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zotero::ItemData;

    fn item(key: &str, title: &str) -> Item {
        Item {
            key: key.to_string(),
            data: ItemData {
                item_type: "journalArticle".to_string(),
                title: title.to_string(),
                ..Default::default()
            },
        }
    }

    fn annotation(text: &str, comment: &str, color: &str) -> Item {
        Item {
            key: "ANNOT001".to_string(),
            data: ItemData {
                item_type: "annotation".to_string(),
                annotation_text: text.to_string(),
                annotation_comment: comment.to_string(),
                annotation_color: color.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn note_path_sanitizes_title() {
        let item = item("KEY1", "What is this? A *Study*");
        assert_eq!(note_path("notes", &item), "notes/What is this A Study.md");
    }

    #[test]
    fn note_path_falls_back_to_key() {
        let item = item("KEY1", "");
        assert_eq!(note_path("notes", &item), "notes/KEY1.md");
    }

    #[test]
    fn render_note_groups_by_color_category() {
        let parent = item("KEY1", "Colors");
        let children = vec![
            annotation("a yellow passage", "", "#ffd400"),
            annotation("a red passage", "why red", "#ff6666"),
            annotation("another yellow passage", "", "#ffd400"),
        ];

        let note = render_note(&parent, &children);

        assert!(note.starts_with("# Colors\n"));
        assert!(note.contains("## Red\n"));
        assert!(note.contains("> a red passage\n"));
        assert!(note.contains("why red"));
        let yellow_pos = note.find("## Yellow").unwrap();
        let red_pos = note.find("## Red").unwrap();
        assert!(red_pos < yellow_pos, "Red heading sorts before Yellow");
        assert!(note.contains("> a yellow passage\n"));
        assert!(note.contains("> another yellow passage\n"));
    }

    #[test]
    fn render_note_skips_non_annotation_children() {
        let parent = item("KEY1", "Paper");
        let children = vec![Item {
            key: "ATTACH01".to_string(),
            data: ItemData {
                item_type: "attachment".to_string(),
                title: "full text".to_string(),
                ..Default::default()
            },
        }];

        let note = render_note(&parent, &children);
        assert!(!note.contains("##"));
        assert!(!note.contains("full text"));
    }
}
