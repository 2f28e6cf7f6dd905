use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::Value;

use rollover_core::scenario::ScenarioOutput;
use rollover_core::{format_money, BondEvaluation, ComputationOutput, EvaluationOutcome, Rate, RolloverEvent};

use super::table;

/// Walk through a scenario the way an analyst would read it aloud.
///
/// Values that are not scenario results are printed as tables instead.
pub fn print_narrative(value: &Value) {
    match serde_json::from_value::<ComputationOutput<ScenarioOutput>>(value.clone()) {
        Ok(output) => {
            print!("{}", narrate(&output.result));
            for w in &output.warnings {
                println!("{} {}", "warning:".yellow().bold(), w);
            }
        }
        Err(_) => table::print_table(value),
    }
}

pub fn narrate(output: &ScenarioOutput) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "INITIAL PORTFOLIO".bold().underline()));
    for bond in &output.initial_bonds {
        out.push_str(&format!(
            "* ${} bond maturing in {} years\n",
            format_money(bond.principal, 0),
            bond.maturity_years
        ));
    }
    out.push_str(&format!(
        "Total debt: ${}\n",
        format_money(output.initial_total_debt, 2)
    ));

    for event in &output.events {
        narrate_event(&mut out, event);
    }

    out
}

fn narrate_event(out: &mut String, event: &RolloverEvent) {
    out.push_str(&format!(
        "\n{}\n",
        format!("Simulating Rollover @ {}", event.date)
            .blue()
            .bold()
            .underline()
    ));
    out.push_str(&format!(
        "Starting annual interest: ${}\n",
        format_money(event.old_interest, 2)
    ));

    for eval in &event.evaluations {
        narrate_evaluation(out, eval);
    }

    out.push_str(&format!("\n{}\n", "SUMMARY:".bold()));
    out.push_str(&format!(
        "* rolled over {} bonds totaling ${}\n",
        event.rolled_count,
        format_money(event.principal_rolled, 2)
    ));
    out.push_str(&format!(
        "* new annual interest: ${}\n",
        format_money(event.new_interest, 2)
    ));
    out.push_str(&format!(
        "* interest {}: ${}\n",
        if event.interest_change < Decimal::ZERO {
            "decrease"
        } else {
            "increase"
        },
        format_money(event.interest_change.abs(), 2)
    ));
}

fn narrate_evaluation(out: &mut String, eval: &BondEvaluation) {
    out.push_str(&format!("\nEvaluating Bond {}: {}\n", eval.index + 1, eval.bond));
    match &eval.outcome {
        EvaluationOutcome::Rolled {
            old_rate,
            new_rate,
            new_annual_interest,
            ..
        } => {
            out.push_str(&format!(
                "{}: Rate change {}% → {}%\n",
                "Rolling over".yellow(),
                pct_1dp(*old_rate),
                pct_1dp(*new_rate)
            ));
            out.push_str(&format!(
                "New annual interest on this bond: ${}\n",
                format_money(*new_annual_interest, 2)
            ));
        }
        EvaluationOutcome::NotYetMature { maturity_date } => {
            out.push_str(&format!(
                "{} (matures {})\n",
                "Not yet mature".green(),
                maturity_date
            ));
        }
    }
}

fn pct_1dp(rate: Rate) -> String {
    format!("{:.1}", rate * Decimal::ONE_HUNDRED)
}
