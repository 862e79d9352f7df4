use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// One JSON document
pub fn read_json(path: &Path) -> Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// JSON Lines; blank lines are skipped
pub fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
    let text = read_text(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| {
                format!("Invalid JSON on line {} of {}", idx + 1, path.display())
            })
        })
        .collect()
}

/// Model name carried by a response or stream chunk, wherever the provider puts it
pub fn detect_model(value: &Value) -> Option<String> {
    ["/model", "/model_version", "/modelVersion", "/message/model"]
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_model() {
        assert_eq!(detect_model(&json!({"model": "gpt-4o"})).as_deref(), Some("gpt-4o"));
        assert_eq!(
            detect_model(&json!({"modelVersion": "gemini-1.5-pro"})).as_deref(),
            Some("gemini-1.5-pro")
        );
        assert_eq!(
            detect_model(&json!({"type": "message_start", "message": {"model": "claude-3-opus"}}))
                .as_deref(),
            Some("claude-3-opus")
        );
        assert_eq!(detect_model(&json!({"type": "ping"})), None);
    }
}
