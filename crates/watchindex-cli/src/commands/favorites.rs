use super::Store;
use crate::output::{media_label, Output};
use crate::AddArgs;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;
use std::io::Read;
use std::path::Path;
use watchindex_core::describe_count;
use watchindex_models::{FavoriteItem, MediaFilter, MediaType};

pub fn run_list(store: &Store, filter: MediaFilter, output: &Output) -> Result<()> {
    output.favorites(filter, &store.counts(), &store.filtered(filter));
    Ok(())
}

pub fn run_add(store: &mut Store, args: AddArgs, output: &Output) -> Result<()> {
    let items = match args.from_json.clone() {
        Some(path) => read_snapshots(&path)?,
        None => vec![item_from_args(args)?],
    };

    let mut added = Vec::new();
    let mut existing = Vec::new();
    for item in items {
        let label = describe_item(&item);
        if store.add(item) {
            added.push(label);
        } else {
            existing.push(label);
        }
    }

    if !output.is_human() {
        output.json(&json!({
            "added": added,
            "already_favorite": existing,
            "count": store.count(),
        }));
        return Ok(());
    }

    for label in &added {
        output.success(format!("Added {} to favorites", label));
    }
    for label in &existing {
        output.info(format!("{} is already a favorite", label));
    }
    Ok(())
}

pub fn run_remove(store: &mut Store, id: u32, media_type: MediaType, output: &Output) -> Result<()> {
    let label = store
        .get(id, media_type)
        .map(describe_item)
        .unwrap_or_else(|| format!("{} {}", media_label(media_type), id));
    let removed = store.remove(id, media_type);

    if !output.is_human() {
        output.json(&json!({
            "removed": removed,
            "id": id,
            "media_type": media_type,
            "count": store.count(),
        }));
    } else if removed {
        output.success(format!("Removed {} from favorites", label));
    } else {
        output.warn(format!("{} is not a favorite", label));
    }
    Ok(())
}

pub fn run_check(store: &Store, id: u32, media_type: MediaType, output: &Output) -> Result<()> {
    let favorite = store.is_favorite(id, media_type);

    if !output.is_human() {
        output.json(&json!({
            "id": id,
            "media_type": media_type,
            "favorite": favorite,
        }));
    } else if favorite {
        output.success(format!("{} {} is a favorite", media_label(media_type), id));
    } else {
        output.info(format!("{} {} is not a favorite", media_label(media_type), id));
    }
    Ok(())
}

pub fn run_count(store: &Store, output: &Output) -> Result<()> {
    let counts = store.counts();

    if !output.is_human() {
        output.json(&json!(counts));
        return Ok(());
    }

    output.info(describe_count(counts.total));
    output.info(format!("Movies: {}", counts.movies));
    output.info(format!("TV Shows: {}", counts.tv));
    Ok(())
}

fn describe_item(item: &FavoriteItem) -> String {
    match item.display_title() {
        Some(title) if !title.is_empty() => format!("{} \"{}\"", media_label(item.media_type), title),
        _ => format!("{} {}", media_label(item.media_type), item.id),
    }
}

fn item_from_args(args: AddArgs) -> Result<FavoriteItem> {
    let id = args.id.ok_or_else(|| eyre!("--id is required"))?;
    let media_type = args.media_type.ok_or_else(|| eyre!("--type is required"))?;

    if let Some(vote) = args.vote_average {
        if !(0.0..=10.0).contains(&vote) {
            return Err(eyre!("--vote-average must be between 0 and 10, got {}", vote));
        }
    }

    Ok(FavoriteItem {
        title: args.title,
        name: args.name,
        poster_path: args.poster_path,
        backdrop_path: args.backdrop_path,
        release_date: args.release_date,
        first_air_date: args.first_air_date,
        vote_average: args.vote_average.unwrap_or_default(),
        overview: args.overview.unwrap_or_default(),
        genre_ids: if args.genre_ids.is_empty() { None } else { Some(args.genre_ids) },
        ..FavoriteItem::new(id, media_type)
    })
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Snapshots {
    One(FavoriteItem),
    Many(Vec<FavoriteItem>),
}

fn parse_snapshots(content: &str) -> Result<Vec<FavoriteItem>> {
    let snapshots: Snapshots = serde_json::from_str(content)
        .wrap_err("Expected a favorite object or an array of favorites")?;
    Ok(match snapshots {
        Snapshots::One(item) => vec![item],
        Snapshots::Many(items) => items,
    })
}

fn read_snapshots(path: &Path) -> Result<Vec<FavoriteItem>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("Failed to read favorites from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?
    };
    parse_snapshots(&content)
}
