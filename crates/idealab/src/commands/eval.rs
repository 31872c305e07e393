//! `idealab eval` -- evaluate one calculation against input values.

use anyhow::{Context, Result, bail};
use idealab_calc::engine;
use idealab_calc::parser::load_spec;
use idealab_calc::types::{CalculationSpec, InputValue, InputValueMap};
use idealab_ui::styles::render_evaluation;

use crate::cli::EvalArgs;
use crate::commands::parse_input_flags;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `idealab eval` command.
pub fn run(ctx: &RuntimeContext, args: &EvalArgs) -> Result<()> {
    let spec = calculation(args)?;
    let inputs = input_values(&parse_input_flags(&args.inputs)?);
    let evaluation = engine::evaluate(&spec, &inputs);

    if ctx.json {
        output_json(&serde_json::json!({
            "kind": spec.kind(),
            "result": evaluation.display(),
            "failed": evaluation.is_failure(),
        }));
    } else {
        println!("{}", render_evaluation(&evaluation));
    }
    Ok(())
}

fn calculation(args: &EvalArgs) -> Result<CalculationSpec> {
    if let Some(path) = &args.spec {
        return load_spec(path)
            .with_context(|| format!("failed to load calculation from {}", path.display()));
    }
    if let Some(formula) = &args.formula {
        return Ok(CalculationSpec::formula(formula.as_str()));
    }
    if let Some(description) = &args.describe {
        return Ok(CalculationSpec::descriptive(description.as_str()));
    }
    bail!("one of --spec, --formula or --describe is required")
}

/// Values without a form behind them: anything that parses as a finite
/// number is a number, everything else stays text.
fn input_values(pairs: &[(String, String)]) -> InputValueMap {
    pairs
        .iter()
        .map(|(id, raw)| {
            let value = match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => InputValue::Number(n),
                _ => InputValue::Text(raw.clone()),
            };
            (id.clone(), value)
        })
        .collect()
}
