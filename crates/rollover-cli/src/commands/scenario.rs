use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rollover_core::scenario::{self, LadderInput, RolloverStep, ScenarioInput};

use crate::input;

/// Arguments for the built-in demo
#[derive(Args)]
pub struct DemoArgs {
    /// Continue the rate path through 2023 (3.5%) and 2024 (4%)
    #[arg(long)]
    pub extended: bool,
}

pub fn run_demo(args: DemoArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let demo_input = scenario::demo(args.extended)?;
    let result = scenario::run_scenario(&demo_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a flag-driven maturity ladder
#[derive(Args)]
pub struct LadderArgs {
    /// Total principal split evenly across rungs
    #[arg(long, default_value = "1000000")]
    pub total_debt: Decimal,

    /// Number of rungs; rung N matures in N years
    #[arg(long, default_value = "10")]
    pub rungs: u32,

    /// Issue date shared by every rung (YYYY-MM-DD)
    #[arg(long, default_value = "2020-01-01")]
    pub issue_date: NaiveDate,

    /// Initial coupon rate as a decimal
    #[arg(long, default_value = "0.02")]
    pub rate: Decimal,

    /// Rollover steps as DATE=RATE, comma-separated (e.g. "2021-01-01=0.025,2022-01-01=0.03").
    /// Defaults to the demo path.
    #[arg(long, value_delimiter = ',', value_parser = parse_step)]
    pub path: Option<Vec<RolloverStep>>,
}

pub fn run_ladder(args: LadderArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bonds = scenario::ladder(&LadderInput {
        total_debt: args.total_debt,
        rungs: args.rungs,
        issue_date: args.issue_date,
        interest_rate: args.rate,
    })?;
    let rollovers = args
        .path
        .unwrap_or_else(|| scenario::demo_rate_path(true));
    let result = scenario::run_scenario(&ScenarioInput { bonds, rollovers })?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for running a scenario file
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON or YAML scenario file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario_input: ScenarioInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        return Err("--input <scenario.json|yaml> or stdin required for simulate".into());
    };
    let result = scenario::run_scenario(&scenario_input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_step(s: &str) -> Result<RolloverStep, String> {
    let (date, rate) = s
        .split_once('=')
        .ok_or_else(|| format!("'{s}' is not DATE=RATE"))?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("bad date '{date}': {e}"))?;
    let new_rate = rate
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("bad rate '{rate}': {e}"))?;
    Ok(RolloverStep { date, new_rate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_step() {
        let step = parse_step("2023-01-01=0.035").unwrap();
        assert_eq!(step.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(step.new_rate, dec!(0.035));
    }

    #[test]
    fn test_parse_step_rejects_garbage() {
        assert!(parse_step("2023-01-01").is_err());
        assert!(parse_step("2023-13-01=0.03").is_err());
        assert!(parse_step("2023-01-01=abc").is_err());
    }

    #[test]
    fn test_demo_command_value_shape() {
        let value = run_demo(DemoArgs { extended: false }).unwrap();
        assert_eq!(value["result"]["history"].as_array().unwrap().len(), 2);
        let final_interest: Decimal = value["result"]["final_annual_interest"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(final_interest, dec!(3000));
    }
}
