use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a scenario file, choosing YAML or JSON by extension.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let parsed = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path before reading.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollover_core::scenario::ScenarioInput;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rollover-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_yaml_scenario() {
        let path = write_temp(
            "scenario.yaml",
            "bonds:\n  - principal: \"1000\"\n    issue_date: 2020-01-01\n    maturity_years: 1\n    interest_rate: \"0.02\"\nrollovers:\n  - date: 2021-01-01\n    new_rate: \"0.03\"\n",
        );
        let input: ScenarioInput = read_document(path.to_str().unwrap()).unwrap();
        assert_eq!(input.bonds.len(), 1);
        assert_eq!(input.rollovers.len(), 1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_reads_json_scenario() {
        let path = write_temp(
            "scenario.json",
            r#"{"bonds": [], "rollovers": [{"date": "2021-01-01", "new_rate": "0.03"}]}"#,
        );
        let input: ScenarioInput = read_document(path.to_str().unwrap()).unwrap();
        assert!(input.bonds.is_empty());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_document::<ScenarioInput>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
