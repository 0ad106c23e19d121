use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchindex_core::{describe_count, FavoriteCounts};
use watchindex_models::{FavoriteItem, MediaFilter, MediaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Success,
    Error,
    Info,
    Warning,
}

impl MessageKind {
    fn as_str(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Info => "info",
            MessageKind::Warning => "warning",
        }
    }

    fn marker(self) -> Option<String> {
        match self {
            MessageKind::Success => Some("✓".green().to_string()),
            MessageKind::Error => Some("✗".red().to_string()),
            MessageKind::Warning => Some("⚠".yellow().to_string()),
            MessageKind::Info => None,
        }
    }
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Success, msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Error, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message(MessageKind::Warning, msg.as_ref());
    }

    /// Structured result; in human mode callers render their own view instead
    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && !self.is_human() {
            return;
        }

        self.print_json(data);
    }

    /// Listing with per-type counts; JSON carries the full snapshots
    pub fn favorites(&self, filter: MediaFilter, counts: &FavoriteCounts, items: &[&FavoriteItem]) {
        if !self.is_human() {
            self.json(&json!({
                "filter": filter.to_string(),
                "counts": counts,
                "items": items,
            }));
            return;
        }

        self.info(describe_count(counts.total));
        if counts.total == 0 {
            return;
        }
        self.info(format!(
            "All ({})  Movies ({})  TV Shows ({})",
            counts.total, counts.movies, counts.tv
        ));

        if items.is_empty() {
            self.info(format!("No {} favorites", filter));
        } else if !self.quiet {
            println!("{}", favorites_table(items));
        }
    }

    // Errors are shown even in quiet mode
    fn message(&self, kind: MessageKind, msg: &str) {
        if self.quiet && kind != MessageKind::Error {
            return;
        }

        if !self.is_human() {
            self.print_json(&json!({ "type": kind.as_str(), "message": msg }));
            return;
        }

        let line = match kind.marker() {
            Some(marker) => format!("{} {}", marker, msg),
            None => msg.to_string(),
        };
        if kind == MessageKind::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

pub fn media_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "Movie",
        MediaType::Tv => "TV Show",
    }
}

/// Type, id, title, year and rating, one row per favorite
pub fn favorite_row(item: &FavoriteItem) -> Vec<String> {
    vec![
        media_label(item.media_type).to_string(),
        item.id.to_string(),
        item.display_title()
            .filter(|title| !title.is_empty())
            .unwrap_or("(untitled)")
            .to_string(),
        item.year().map(|y| y.to_string()).unwrap_or_default(),
        format!("{:.1}", item.vote_average),
    ]
}

pub fn favorites_table(items: &[&FavoriteItem]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["Type", "ID", "Title", "Year", "Rating"]
            .into_iter()
            .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
    );
    for item in items {
        table.add_row(favorite_row(item));
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
