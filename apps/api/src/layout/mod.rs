// Layout planning
// Implements: sizing heuristics, LLM page/block planning, plan cache with
// default-plan fallback. The renderer consumes the resulting LayoutPlan.

pub mod cache;
pub mod handlers;
pub mod planner;
pub mod prompts;
pub mod schema;
pub mod sizing;

// Re-export the public API consumed by other modules (render handlers).
pub use planner::{plan_layout, PlanOutcome};
