use serde::{Deserialize, Serialize};

/// One renderable block: which component to draw and which record field feeds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub component: String,
    pub data_key: String,
}

impl LayoutBlock {
    pub fn new(key: &str) -> Self {
        Self {
            component: key.to_string(),
            data_key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub content: Vec<LayoutBlock>,
}

/// Ordered pages of ordered blocks, referencing record fields by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub pages: Vec<LayoutPage>,
}

/// Blocks of the fallback plan, in order.
pub const DEFAULT_PLAN_KEYS: [&str; 5] = [
    "contact_info",
    "summary",
    "work_experience",
    "education",
    "skills",
];

impl LayoutPlan {
    /// Single page: contact info, summary, work experience, education, skills.
    pub fn default_plan() -> Self {
        Self {
            pages: vec![LayoutPage {
                page: 1,
                content: DEFAULT_PLAN_KEYS.iter().map(|k| LayoutBlock::new(k)).collect(),
            }],
        }
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.content.len()).sum()
    }

    /// A plan is usable when it has at least one page with at least one block.
    pub fn is_usable(&self) -> bool {
        self.block_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_single_page_with_five_blocks() {
        let plan = LayoutPlan::default_plan();
        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.pages[0].page, 1);
        let keys: Vec<_> = plan.pages[0]
            .content
            .iter()
            .map(|b| b.data_key.as_str())
            .collect();
        assert_eq!(keys, DEFAULT_PLAN_KEYS);
        assert!(plan.pages[0].content.iter().all(|b| b.component == b.data_key));
    }

    #[test]
    fn test_plan_deserializes_without_page_numbers() {
        let json = r#"{"pages": [{"content": [{"component": "header", "data_key": "contact_info"}]}]}"#;
        let plan: LayoutPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.pages[0].page, 0);
        assert_eq!(plan.pages[0].content[0].component, "header");
        assert!(plan.is_usable());
    }

    #[test]
    fn test_plan_without_blocks_is_not_usable() {
        let plan: LayoutPlan = serde_json::from_str(r#"{"pages": [{"page": 1, "content": []}]}"#).unwrap();
        assert!(!plan.is_usable());
        assert!(!LayoutPlan { pages: vec![] }.is_usable());
    }
}
