use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "scanners": {
                "type": "object",
                "properties": {
                    "bandit_report": { "type": "string" },
                    "semgrep_report": { "type": "string" },
                    "source_root": { "type": "string" }
                }
            },
            "llm": {
                "type": "object",
                "properties": {
                    "provider": { "type": "string" },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" }
                }
            },
            "cache": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string" }
                }
            },
            "enrichment": {
                "type": "object",
                "properties": {
                    "concurrent": { "type": "boolean" }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string" },
                    "formats": {
                        "type": "array",
                        "items": { "type": "string", "enum": ["json", "html"] }
                    }
                }
            }
        }
    })
});
