//! `idealab idea` -- research an idea and score it.

use anyhow::Result;
use idealab_ai::IdeaRequest;
use idealab_ui::views::render_idea;

use crate::cli::IdeaArgs;
use crate::commands::generator;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_text};

/// Execute the `idealab idea` command.
pub fn run(ctx: &RuntimeContext, args: &IdeaArgs) -> Result<()> {
    let request = IdeaRequest {
        title: args.title.clone(),
        user_need: args.need.clone(),
    };
    let idea = generator(ctx)?.generate_idea(&request)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "title": args.title.trim(),
            "idea": idea,
            "rice": idea.scores.rice(),
        }));
    } else {
        output_text(&render_idea(&args.title, &idea));
    }
    Ok(())
}
