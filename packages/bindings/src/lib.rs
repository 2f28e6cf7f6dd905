use napi::Result as NapiResult;
use napi_derive::napi;

use rollover_core::scenario::{self, ScenarioInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[napi]
pub fn run_scenario(input_json: String) -> NapiResult<String> {
    let input: ScenarioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scenario::run_scenario(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn demo_scenario(extended: bool) -> NapiResult<String> {
    let input = scenario::demo(extended).map_err(to_napi_error)?;
    let output = scenario::run_scenario(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn interest_bars(history_json: String, width: u32) -> NapiResult<String> {
    let history: Vec<rollover_core::HistoryPoint> =
        serde_json::from_str(&history_json).map_err(to_napi_error)?;
    let bars = rollover_core::chart::interest_bars(&history, width as usize)
        .map_err(to_napi_error)?;
    serde_json::to_string(&bars).map_err(to_napi_error)
}
