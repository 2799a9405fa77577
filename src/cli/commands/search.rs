//! Search command implementation.

use serde_json::json;

use crate::cli::{Cli, OutputFormat, SearchArgs};
use crate::config::Config;
use crate::error::{CommentTreeError, Result};
use crate::navigation::{Action, SearchContent};
use crate::render::{render_results, results_to_text, Glyphs};

use super::{navigator, run_action};

/// Run the search command.
pub fn run(cli: &Cli, config: &Config, args: &SearchArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err(CommentTreeError::InvalidArgument {
                name: "limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        config.view.search_page_size = limit;
    }

    let mut nav = navigator(&config, None)?;
    run_action(
        &config,
        &mut nav,
        Action::Search {
            query: args.query.clone(),
        },
    )?;

    let rendered = render_results(nav.search());
    match cli.effective_output() {
        OutputFormat::Json => {
            let (query, total) = match nav.search() {
                SearchContent::Prompt => (None, 0),
                SearchContent::Results { query, total, .. } => (Some(query.as_str()), *total),
            };
            let output = json!({
                "query": query,
                "total": total,
                "hits": rendered.items(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            print!("{}", results_to_text(&rendered, Glyphs::new(config.theme.unicode)));
        }
    }
    Ok(())
}
