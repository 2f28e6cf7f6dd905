use rollover_core::scenario::ScenarioInput;
use std::io::{self, Read};

/// Read a JSON scenario piped on stdin.
/// Returns None when stdin is a terminal or the pipe carried only whitespace.
pub fn read_stdin() -> Result<Option<ScenarioInput>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_scenario(&buffer)
}

fn parse_scenario(text: &str) -> Result<Option<ScenarioInput>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    Ok(Some(serde_json::from_value(value)?))
}
