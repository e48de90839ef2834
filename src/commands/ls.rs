use serde_json::json;
use tokio::sync::mpsc;
use tracing::debug;

use super::CommandOutput;
use crate::catalog::{CatalogItem, CatalogStore, Generation};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::display::format_item_line;
use crate::error::Result;
use crate::filter::{FilterState, apply};
use crate::remote::{CatalogSource, LOAD_CHANNEL_CAPACITY, LoadEvent, PokeApiClient, load_catalog};

/// Filters for `ls`
#[derive(Debug, Default)]
pub struct LsOptions {
    pub types: Vec<String>,
    pub generations: Vec<Generation>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl LsOptions {
    fn filter(&self) -> Result<FilterState> {
        let mut filter = FilterState::new();
        for name in &self.types {
            if !filter.types().contains(name) {
                filter.toggle_type(name)?;
            }
        }
        for generation in &self.generations {
            if !filter.generations().contains(generation) {
                filter.toggle_generation(*generation);
            }
        }
        if let Some(query) = &self.search {
            filter.set_query(query.clone());
        }
        Ok(filter)
    }
}

/// Run a full load pass into a fresh store. A failed pass is an error.
pub async fn load_store<S: CatalogSource>(source: &S, batch_size: usize) -> Result<CatalogStore> {
    let mut store = CatalogStore::new();
    store.begin_load();

    let (tx, mut rx) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
    let collect = async {
        while let Some(event) = rx.recv().await {
            match event {
                LoadEvent::Page { items, .. } => store.extend(items),
                LoadEvent::Finished { total } => {
                    debug!(total, "catalog ready for listing");
                    return Ok(());
                }
                LoadEvent::Failed { error, .. } => return Err(error),
            }
        }
        Ok(())
    };

    let ((), outcome) = tokio::join!(load_catalog(source, batch_size, tx), collect);
    store.finish_load(outcome.is_ok());
    outcome?;
    Ok(store)
}

fn item_json(item: &CatalogItem) -> serde_json::Value {
    json!({
        "id": item.id,
        "name": item.name,
        "types": item.type_names(),
        "generation": Generation::containing(item.id).map(|g| g.number()),
        "image": item.image_url(),
    })
}

/// Load the whole catalog and list the entries passing the filters
pub async fn cmd_ls(options: LsOptions, output: OutputOptions) -> Result<()> {
    let filter = options.filter()?;
    let config = Config::load()?;
    let client = PokeApiClient::from_config(&config)?;

    let store = load_store(&client, config.batch_size).await?;
    let mut matches = apply(store.items(), &filter);
    let total = matches.len();
    if let Some(limit) = options.limit {
        matches.truncate(limit);
    }

    let json_output = json!(matches.iter().map(|item| item_json(item)).collect::<Vec<_>>());

    let text_output = if matches.is_empty() {
        "No entries match.".to_string()
    } else {
        let mut lines: Vec<String> = matches.iter().map(|item| format_item_line(item)).collect();
        lines.push(String::new());
        if matches.len() < total {
            lines.push(format!("{} of {total} entries", matches.len()));
        } else {
            lines.push(format!("{total} entries"));
        }
        lines.join("\n")
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}
