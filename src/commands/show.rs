use super::print_json;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::detail::{DetailCache, assemble};
use crate::error::Result;
use crate::filter::ID_MARKER;
use crate::remote::{CatalogSource, PokeApiClient};
use crate::render::{Presenter, TerminalPresenter};

/// Fetch one entry directly and display its detail record
pub async fn cmd_show(name: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let client = PokeApiClient::from_config(&config)?;

    let key = name.trim();
    let key = key.strip_prefix(ID_MARKER).unwrap_or(key).trim();
    let item = client.fetch_item_by_name(key).await?;

    let mut cache = DetailCache::new();
    let record = assemble(&client, &item, config.moves_limit, &mut cache).await;

    if output.json {
        print_json(&record)?;
    } else {
        TerminalPresenter::stdout().show_detail(&record);
    }
    Ok(())
}
