use std::sync::LazyLock;

use serde_json::{json, Value};

/// Response schema for layout planning; received as `models::layout::LayoutPlan`.
pub static LAYOUT_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "pages": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "page": {"type": "INTEGER"},
                        "content": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "component": {"type": "STRING"},
                                    "data_key": {"type": "STRING"}
                                },
                                "required": ["component", "data_key"]
                            }
                        }
                    },
                    "required": ["page", "content"]
                }
            }
        },
        "required": ["pages"]
    })
});
