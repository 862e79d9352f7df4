//! Recorded provider responses.
//!
//! Samples live in `crates/finsight-testing/samples/`: `*.json` files hold one
//! full response, `*.jsonl` files hold one streaming chunk per line.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const ANTHROPIC_THINKING: &str = "anthropic_thinking.json";
pub const ANTHROPIC_MALFORMED: &str = "anthropic_malformed.json";
pub const OPENAI_TOOL_CALLS: &str = "openai_tool_calls.json";
pub const OPENAI_REASONING: &str = "openai_reasoning.json";
pub const GOOGLE_THINKING: &str = "google_thinking.json";

pub const ANTHROPIC_STREAM: &str = "anthropic_stream.jsonl";
pub const OPENAI_STREAM: &str = "openai_stream.jsonl";
pub const GOOGLE_STREAM: &str = "google_stream.jsonl";

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    pub fn new() -> Self {
        Self {
            samples_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples"),
        }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Load a full response sample.
    pub fn load(&self, sample_name: &str) -> Result<Value> {
        let path = self.path(sample_name);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read sample {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", sample_name))
    }

    /// Load a stream transcript, one chunk per non-empty line.
    pub fn load_stream(&self, sample_name: &str) -> Result<Vec<Value>> {
        let path = self.path(sample_name);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read sample {}", path.display()))?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid JSON on line {} of {}", idx + 1, sample_name))
            })
            .collect()
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}

/// Shorthand for `SampleFiles::new().load(name)` that panics on a missing sample.
pub fn sample(sample_name: &str) -> Value {
    SampleFiles::new()
        .load(sample_name)
        .unwrap_or_else(|e| panic!("{:#}", e))
}

/// Shorthand for `SampleFiles::new().load_stream(name)`.
pub fn stream_sample(sample_name: &str) -> Vec<Value> {
    SampleFiles::new()
        .load_stream(sample_name)
        .unwrap_or_else(|e| panic!("{:#}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_samples_load() {
        let samples = SampleFiles::new();
        for name in [
            ANTHROPIC_THINKING,
            ANTHROPIC_MALFORMED,
            OPENAI_TOOL_CALLS,
            OPENAI_REASONING,
            GOOGLE_THINKING,
        ] {
            assert!(samples.load(name).unwrap().is_object(), "{name}");
        }
        for name in [ANTHROPIC_STREAM, OPENAI_STREAM, GOOGLE_STREAM] {
            assert!(!samples.load_stream(name).unwrap().is_empty(), "{name}");
        }
    }
}
