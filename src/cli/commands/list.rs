//! Tree commands: `list`, `show` and `open`.
//!
//! All three end with the navigator showing a tree; they differ only in the
//! action that gets it there.

use serde_json::json;

use crate::cli::{Cli, ListArgs, OpenArgs, OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::navigation::{Action, Navigator};
use crate::render::{render_tree, tree_to_text, Glyphs, ReplyDrafts};
use crate::view::ViewMode;

use super::{navigator, run_action};

/// Run the list command.
pub fn run_list(cli: &Cli, config: &Config, args: &ListArgs) -> Result<()> {
    let mut nav = navigator(config, args.sort)?;
    run_action(config, &mut nav, Action::LoadRoots)?;
    print_tree(cli, config, &nav)
}

/// Run the show command.
pub fn run_show(cli: &Cli, config: &Config, args: &ShowArgs) -> Result<()> {
    let mut nav = navigator(config, args.sort)?;
    run_action(
        config,
        &mut nav,
        Action::OpenSubtree {
            root_id: args.id,
            highlight_id: args.highlight,
        },
    )?;
    print_tree(cli, config, &nav)
}

/// Run the open command.
pub fn run_open(cli: &Cli, config: &Config, args: &OpenArgs) -> Result<()> {
    let mut nav = navigator(config, args.sort)?;
    run_action(config, &mut nav, Action::JumpToTree { hit_id: args.id })?;
    print_tree(cli, config, &nav)
}

fn print_tree(cli: &Cli, config: &Config, nav: &Navigator) -> Result<()> {
    let view = nav.view();
    let rendered = render_tree(nav.tree().nodes(), view, &ReplyDrafts::new());

    match cli.effective_output() {
        OutputFormat::Json => {
            let root_id = match view.mode() {
                ViewMode::Roots => None,
                ViewMode::Subtree { root_id } => Some(root_id),
            };
            let output = json!({
                "sort": view.sort(),
                "root_id": root_id,
                "highlight_id": view.highlight_id(),
                "rows": rendered.rows(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            print!("{}", tree_to_text(&rendered, Glyphs::new(config.theme.unicode)));
        }
    }
    Ok(())
}
