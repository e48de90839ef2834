//! Interactive browser session.
//!
//! The catalog loads on a background task while commands are read from
//! stdin. Both streams are handled on this task, one event at a time, so the
//! controller state is never shared.

use std::io::ErrorKind;
use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::{App, BrowseCommand};
use crate::config::Config;
use crate::error::{DexError, Result};
use crate::nav::Location;
use crate::remote::{LOAD_CHANNEL_CAPACITY, PokeApiClient, load_catalog};
use crate::render::{Presenter, TerminalPresenter};

/// Run the interactive browser, optionally starting at `at`
pub async fn cmd_browse(at: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let source = Arc::new(PokeApiClient::from_config(&config)?);

    let mut presenter = TerminalPresenter::stdout();
    presenter.notice("Loading the catalog... type 'help' for commands.");

    let mut app = App::new(Arc::clone(&source), presenter, &config);
    if let Some(path) = at {
        app = app.with_location(Location::parse(path));
    }

    let (tx, mut events) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
    let loader = if app.begin_load() {
        let batch_size = config.batch_size;
        info!(api = %source.base(), batch_size, "starting catalog load");
        Some(tokio::spawn(async move {
            load_catalog(source.as_ref(), batch_size, tx).await;
        }))
    } else {
        None
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut loading = loader.is_some();

    loop {
        tokio::select! {
            event = events.recv(), if loading => match event {
                Some(event) => app.on_load_event(event).await,
                None => {
                    loading = false;
                    app.on_load_closed();
                }
            },
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("stdin closed");
                        break;
                    }
                    // The undecodable line is consumed; keep reading
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        app.report_error(&DexError::Io(e));
                        continue;
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin unreadable, ending session");
                        break;
                    }
                };
                let flow = match BrowseCommand::parse(&line) {
                    Ok(Some(command)) => app.execute(command).await,
                    Ok(None) => Ok(ControlFlow::Continue(())),
                    Err(e) => Err(e),
                };
                match flow {
                    Ok(ControlFlow::Break(())) => break,
                    Ok(ControlFlow::Continue(())) => {}
                    Err(e) => app.report_error(&e),
                }
            }
        }
    }

    if let Some(loader) = loader {
        loader.abort();
    }
    Ok(())
}
