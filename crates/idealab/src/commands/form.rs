//! `idealab form` -- run a prototype config as a form.
//!
//! `--input` edits are applied in order, each one recomputing every output.
//! With `--interactive`, further `id=value` lines are read from stdin and the
//! outputs are printed after each line.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use idealab_core::prototype::load_prototype;
use idealab_form::FormSession;
use idealab_ui::styles::{render_evaluation, render_fail};
use idealab_ui::views::render_form;
use tracing::debug;

use crate::cli::FormArgs;
use crate::commands::parse_input_flags;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_text};

/// Execute the `idealab form` command.
pub fn run(ctx: &RuntimeContext, args: &FormArgs) -> Result<()> {
    let config = load_prototype(&args.config)
        .with_context(|| format!("failed to load prototype from {}", args.config.display()))?;
    let mut session = FormSession::new(config)?;

    for (id, raw) in parse_input_flags(&args.inputs)? {
        session.apply_edit(&id, &raw)?;
    }

    if args.interactive {
        return run_interactive(ctx, &mut session);
    }

    if ctx.json {
        output_json(&session_json(&session));
    } else {
        output_text(&render_form(&session));
    }
    Ok(())
}

fn run_interactive(ctx: &RuntimeContext, session: &mut FormSession) -> Result<()> {
    if !ctx.json && !ctx.quiet {
        output_text(&render_form(session));
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // A bad edit is reported and the session carries on.
        let edit = parse_input_flags(&[line.to_string()])
            .and_then(|pairs| {
                let (id, raw) = &pairs[0];
                session.apply_edit(id, raw)?;
                Ok(())
            });
        match edit {
            Ok(()) if ctx.json => output_json(&session_json(session)),
            Ok(()) => print_outputs(session),
            Err(e) => {
                debug!(edit = line, "rejected edit");
                eprintln!("{}", render_fail(&format!("{:#}", e)));
            }
        }
    }
    Ok(())
}

fn print_outputs(session: &FormSession) {
    for output in &session.config().outputs {
        if let Some(evaluation) = session.evaluation(&output.id) {
            println!("{}: {}", output.label, render_evaluation(evaluation));
        }
    }
}

fn session_json(session: &FormSession) -> serde_json::Value {
    let outputs: serde_json::Map<String, serde_json::Value> = session
        .config()
        .outputs
        .iter()
        .map(|o| {
            let shown = session.display(&o.id).unwrap_or_default().to_string();
            (o.id.clone(), serde_json::Value::String(shown))
        })
        .collect();

    serde_json::json!({
        "title": session.config().title,
        "inputs": session.inputs(),
        "outputs": outputs,
    })
}
