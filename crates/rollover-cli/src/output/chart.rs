use colored::Colorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use rollover_core::chart::{interest_bars, plot_bounds};
use rollover_core::{format_money, HistoryPoint, RolloverResult};

use crate::ChartKind;

const BAR_WIDTH: usize = 40;
const PLOT_HEIGHT: usize = 12;
const COLUMN_SPACING: usize = 6;

/// Draw the interest-cost history carried in `value`, if any.
pub fn render(kind: ChartKind, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let Some(history) = value.get("result").and_then(|r| r.get("history")) else {
        return Ok(());
    };
    let history: Vec<HistoryPoint> = serde_json::from_value(history.clone())?;

    match kind {
        ChartKind::Bar => print!("{}", bar_chart(&history)?),
        ChartKind::Line => print!("{}", line_chart(&history)?),
        ChartKind::None => {}
    }
    Ok(())
}

pub fn bar_chart(history: &[HistoryPoint]) -> RolloverResult<String> {
    let bars = interest_bars(history, BAR_WIDTH)?;

    let mut out = format!("\n{}\n", "Interest Cost Progression".bold());
    for bar in bars {
        out.push_str(&format!(
            "{}: {} ${}k\n",
            bar.label,
            "█".repeat(bar.bar_length),
            format_money(bar.cost_thousands, 1)
        ));
    }
    Ok(out)
}

/// Dot plot of cost (thousands) against rollover year, one column per point.
pub fn line_chart(history: &[HistoryPoint]) -> RolloverResult<String> {
    let (lo, hi) = plot_bounds(history)?;
    let lo = lo.to_f64().unwrap_or(0.0);
    let hi = hi.to_f64().unwrap_or(0.0);
    let span = hi - lo;

    let rows: Vec<usize> = history
        .iter()
        .map(|p| {
            let cost = (p.total_interest / Decimal::ONE_THOUSAND)
                .to_f64()
                .unwrap_or(0.0);
            if span > 0.0 {
                let frac = (hi - cost) / span;
                (frac * (PLOT_HEIGHT - 1) as f64).round() as usize
            } else {
                PLOT_HEIGHT - 1
            }
        })
        .collect();

    let mut out = format!("\n{}\n", "Annual Interest Cost Over Time".bold());
    out.push_str("Annual Interest ($ thousands)\n");

    for row in 0..PLOT_HEIGHT {
        let y = hi - span * row as f64 / (PLOT_HEIGHT - 1) as f64;
        let mut line = vec![' '; history.len() * COLUMN_SPACING];
        for (col, &point_row) in rows.iter().enumerate() {
            if point_row == row {
                line[col * COLUMN_SPACING + COLUMN_SPACING / 2] = '•';
            }
        }
        let line: String = line.into_iter().collect();
        out.push_str(&format!("{:>9.2} ┤{}\n", y, line.trim_end()));
    }

    out.push_str(&format!(
        "{:>9} └{}\n",
        "",
        "─".repeat(history.len() * COLUMN_SPACING)
    ));
    let mut ticks = String::new();
    for point in history {
        ticks.push_str(&format!(
            "{:^width$}",
            point.date.format("%Y").to_string(),
            width = COLUMN_SPACING
        ));
    }
    out.push_str(&format!("{:>9}  {}\n", "", ticks.trim_end()));
    out.push_str(&format!("{:>9}  Year\n", ""));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn history() -> Vec<HistoryPoint> {
        [(2021, dec!(2500)), (2022, dec!(3000))]
            .into_iter()
            .map(|(year, total_interest)| HistoryPoint {
                date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                total_interest,
            })
            .collect()
    }

    #[test]
    fn test_bar_chart_lines() {
        colored::control::set_override(false);
        let text = bar_chart(&history()).unwrap();
        assert!(text.contains(&format!("2021: {} $2.5k", "█".repeat(33))));
        assert!(text.contains(&format!("2022: {} $3.0k", "█".repeat(40))));
    }

    #[test]
    fn test_line_chart_places_one_marker_per_point() {
        let text = line_chart(&history()).unwrap();
        assert_eq!(text.matches('•').count(), 2);
        assert!(text.contains("2021"));
        assert!(text.contains("2022"));
    }

    #[test]
    fn test_empty_history_errors() {
        assert!(bar_chart(&[]).is_err());
        assert!(line_chart(&[]).is_err());
    }

    #[test]
    fn test_render_ignores_values_without_history() {
        let ladder = serde_json::json!({
            "bonds": [{"principal": "50000", "issue_date": "2020-01-01",
                       "maturity_years": 1, "interest_rate": "0.02"}]
        });
        assert!(render(ChartKind::Bar, &ladder).is_ok());

        let no_series = serde_json::json!({"result": {"final_annual_interest": "3000"}});
        assert!(render(ChartKind::Line, &no_series).is_ok());
    }
}
