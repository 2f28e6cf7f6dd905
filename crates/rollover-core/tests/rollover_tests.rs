use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rollover_core::chart;
use rollover_core::scenario::{self, RolloverStep, ScenarioInput};
use rollover_core::{Bond, EvaluationOutcome, HistoryPoint, Portfolio, RolloverError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn single_bond() -> Portfolio {
    let mut p = Portfolio::new();
    p.add_bond(dec!(100000), date(2020, 1, 1), 1, dec!(0.02));
    p
}

// ===========================================================================
// Aggregates
// ===========================================================================

#[test]
fn test_totals_match_per_bond_sums() {
    let mut p = Portfolio::new();
    let bonds = [
        (dec!(250000), 3u32, dec!(0.015)),
        (dec!(125000.50), 7, dec!(0.0425)),
        (dec!(0), 2, dec!(0.05)),
        (dec!(75000), 30, dec!(0.031)),
    ];
    for (principal, years, rate) in bonds {
        p.add_bond(principal, date(2019, 6, 15), years, rate);
    }

    let expected_debt: Decimal = bonds.iter().map(|b| b.0).sum();
    let expected_interest: Decimal = bonds.iter().map(|b| b.0 * b.2).sum();
    assert_eq!(p.total_debt(), expected_debt);
    assert_eq!(p.annual_interest(), expected_interest);
}

// ===========================================================================
// Rollover semantics
// ===========================================================================

#[test]
fn test_one_year_bond_rolls_on_first_anniversary() {
    // 365 days after 2020-01-01 is 2020-12-31, so 2021-01-01 is past maturity
    let mut p = single_bond();
    assert_eq!(p.bond(0).unwrap().maturity_date(), date(2020, 12, 31));

    let delta = p.simulate_rollover(date(2021, 1, 1), dec!(0.025));

    assert_eq!(delta, dec!(500));
    assert_eq!(
        p.rollover_history(),
        &[HistoryPoint {
            date: date(2021, 1, 1),
            total_interest: dec!(2500)
        }]
    );
}

#[test]
fn test_rollover_exactly_on_maturity_date() {
    let mut p = single_bond();
    let maturity = p.bond(0).unwrap().maturity_date();

    let delta = p.simulate_rollover(maturity, dec!(0.025));

    let bond = p.bond(0).unwrap();
    assert_eq!(bond.interest_rate, dec!(0.025));
    assert_eq!(bond.issue_date, maturity);
    assert_eq!(p.annual_interest(), dec!(2500));
    assert_eq!(delta, dec!(500));
}

#[test]
fn test_rollover_day_before_maturity_does_nothing() {
    let mut p = single_bond();
    let delta = p.simulate_rollover(date(2020, 12, 30), dec!(0.025));

    assert_eq!(delta, Decimal::ZERO);
    assert_eq!(p.bond(0).unwrap().interest_rate, dec!(0.02));
    assert_eq!(p.rollover_history()[0].total_interest, dec!(2000));
}

#[test]
fn test_far_future_date_rolls_once_not_repeatedly() {
    // A single call reissues at most once, even if several tenors have elapsed
    let mut p = single_bond();
    let event = p.rollover(date(2030, 1, 1), dec!(0.05));

    assert_eq!(event.rolled_count, 1);
    assert_eq!(p.bond(0).unwrap().issue_date, date(2030, 1, 1));
    assert_eq!(p.reissues().len(), 1);
}

#[test]
fn test_history_length_equals_call_count() {
    let mut p = single_bond();
    let dates = [
        date(2020, 6, 1),
        date(2021, 1, 1),
        date(2021, 1, 1),
        date(2021, 6, 1),
        date(2022, 1, 1),
    ];
    for (n, d) in dates.iter().enumerate() {
        p.simulate_rollover(*d, dec!(0.03));
        assert_eq!(p.rollover_history().len(), n + 1);
    }
    let recorded: Vec<NaiveDate> = p.rollover_history().iter().map(|h| h.date).collect();
    assert_eq!(recorded, dates.to_vec());
}

#[test]
fn test_event_exposes_narration_data() {
    let mut p = single_bond();
    p.add_bond(dec!(50000), date(2020, 1, 1), 3, dec!(0.025));

    let event = p.rollover(date(2021, 1, 1), dec!(0.04));

    assert_eq!(event.old_interest, dec!(3250));
    assert_eq!(event.new_interest, dec!(5250));
    assert_eq!(event.interest_change, dec!(2000));
    assert_eq!(event.rolled_count, 1);
    assert_eq!(event.principal_rolled, dec!(100000));
    assert_eq!(
        event.evaluations[0].outcome,
        EvaluationOutcome::Rolled {
            old_rate: dec!(0.02),
            new_rate: dec!(0.04),
            old_maturity: date(2020, 12, 31),
            new_maturity: date(2022, 1, 1),
            new_annual_interest: dec!(4000),
        }
    );
    assert_eq!(
        event.evaluations[1].outcome,
        EvaluationOutcome::NotYetMature {
            maturity_date: date(2022, 12, 31)
        }
    );
}

#[test]
fn test_event_serializes_outcome_with_status_tag() {
    let mut p = single_bond();
    let event = p.rollover(date(2021, 1, 1), dec!(0.025));
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["evaluations"][0]["outcome"]["status"], "rolled");
    assert_eq!(value["rolled_count"], 1);
}

// ===========================================================================
// Scenario + chart
// ===========================================================================

#[test]
fn test_scenario_history_feeds_chart() {
    let input = scenario::demo(true).unwrap();
    let out = scenario::run_scenario(&input).unwrap();

    let bars = chart::interest_bars(&out.result.history, 40).unwrap();
    let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["2021", "2022", "2023", "2024"]);
    assert_eq!(bars[3].bar_length, 40);
    assert_eq!(bars[0].bar_length, 25);
}

#[test]
fn test_chart_of_fresh_portfolio_fails_cleanly() {
    let p = Portfolio::new();
    assert!(matches!(
        chart::interest_bars(p.rollover_history(), 40),
        Err(RolloverError::EmptySeries(_))
    ));
}

#[test]
fn test_scenario_from_json() {
    let json = r#"{
        "bonds": [
            {"principal": "100000", "issue_date": "2020-01-01", "maturity_years": 1, "interest_rate": "0.02"},
            {"principal": "200000", "issue_date": "2020-01-01", "maturity_years": 2, "interest_rate": "0.02"}
        ],
        "rollovers": [
            {"date": "2021-01-01", "new_rate": "0.03"},
            {"date": "2022-01-01", "new_rate": "0.04"}
        ]
    }"#;
    let input: ScenarioInput = serde_json::from_str(json).unwrap();
    let out = scenario::run_scenario(&input).unwrap();
    let res = &out.result;

    // 2021: bond 0 rolls (2000 -> 3000)
    assert_eq!(res.events[0].interest_change, dec!(1000));
    // 2022: bond 0 (matures 2022-01-01) and bond 1 (matures 2021-12-31) both roll
    assert_eq!(res.events[1].rolled_count, 2);
    assert_eq!(res.final_annual_interest, dec!(12000));
    assert_eq!(res.cumulative_change, dec!(6000));
    assert_eq!(
        res.final_bonds[1],
        Bond::new(dec!(200000), date(2022, 1, 1), 2, dec!(0.04))
    );
}

#[test]
fn test_scenario_step_order_is_respected() {
    let input = ScenarioInput {
        bonds: vec![Bond::new(dec!(1000), date(2020, 1, 1), 1, dec!(0.02))],
        rollovers: vec![
            RolloverStep {
                date: date(2021, 1, 1),
                new_rate: dec!(0.10),
            },
            RolloverStep {
                date: date(2021, 1, 1),
                new_rate: dec!(0.01),
            },
        ],
    };
    let out = scenario::run_scenario(&input).unwrap();
    // second step on the same date finds nothing mature
    assert_eq!(out.result.final_bonds[0].interest_rate, dec!(0.10));
    assert_eq!(out.result.events[1].interest_change, Decimal::ZERO);
}
