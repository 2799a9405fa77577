//! Mutating commands: `post` and `delete`.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm};
use serde_json::json;

use crate::cli::{Cli, DeleteArgs, OutputFormat, PostArgs};
use crate::config::Config;
use crate::error::{CommentTreeError, Result};
use crate::navigation::{Action, Navigator};
use crate::render::{Affordance, Invocation, ReplyDrafts};

use super::{navigator, run_action};

/// Run the post command.
pub fn run_post(cli: &Cli, config: &Config, args: &PostArgs) -> Result<()> {
    let mut nav = navigator(config, None)?;
    let action = match args.parent {
        Some(parent_id) => Action::CreateReply {
            parent_id,
            text: args.text.clone(),
        },
        None => Action::CreateRoot {
            text: args.text.clone(),
        },
    };
    run_action(config, &mut nav, action)?;
    print_status(cli, &nav)
}

/// Run the delete command.
pub fn run_delete(cli: &Cli, config: &Config, args: &DeleteArgs) -> Result<()> {
    let (prompt, action) = match Affordance::Delete.invoke(args.id, &ReplyDrafts::new()) {
        Invocation::Confirm { prompt, action } => (Some(prompt), action),
        Invocation::Dispatch(action) => (None, action),
        Invocation::ToggleReplyBox(_) => return Ok(()),
    };

    let asked = prompt.filter(|_| !args.yes);
    if let Some(prompt) = asked {
        if !confirm(&prompt)? {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let mut nav = navigator(config, None)?;
    run_action(config, &mut nav, action)?;
    print_status(cli, &nav)
}

fn confirm(prompt: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CommentTreeError::InvalidArgument {
            name: "yes".to_string(),
            reason: "stdin is not a terminal; pass --yes to delete without confirmation".to_string(),
        });
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CommentTreeError::io("Failed to read confirmation", std::io::Error::other(e)))
}

fn print_status(cli: &Cli, nav: &Navigator) -> Result<()> {
    let message = nav.status().map(|s| s.message.as_str()).unwrap_or("Done");
    match cli.effective_output() {
        OutputFormat::Json => {
            let output = json!({ "status": message });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => println!("{message}"),
    }
    Ok(())
}
