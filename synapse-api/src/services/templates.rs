//! Brain Templates
//!
//! A fixed catalog of predefined brain configurations for common use cases.
//! Creating a brain from a template copies its provider, model, and
//! description into an ordinary registry create; after that the brain is
//! indistinguishable from a hand-configured one.

use synapse_core::LlmProvider;

/// A predefined brain configuration.
#[derive(Debug, Clone, Copy)]
pub struct BrainTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub llm_provider: LlmProvider,
    pub model: &'static str,
    pub suggested_temperature: f32,
    pub use_cases: &'static [&'static str],
}

/// The template catalog, in presentation order.
pub const BRAIN_TEMPLATES: &[BrainTemplate] = &[
    BrainTemplate {
        id: "general",
        name: "General Purpose",
        description: "A general-purpose brain for mixed content and queries",
        llm_provider: LlmProvider::Anthropic,
        model: "claude-3-5-sonnet-20241022",
        suggested_temperature: 0.7,
        use_cases: &["General Q&A", "Mixed documents", "Versatile knowledge base"],
    },
    BrainTemplate {
        id: "technical",
        name: "Technical Documentation",
        description: "Optimized for technical documentation, code, and API references",
        llm_provider: LlmProvider::Anthropic,
        model: "claude-3-5-sonnet-20241022",
        suggested_temperature: 0.3,
        use_cases: &["API documentation", "Code repositories", "Technical manuals"],
    },
    BrainTemplate {
        id: "research",
        name: "Research Papers",
        description: "Designed for academic papers and research documents",
        llm_provider: LlmProvider::Anthropic,
        model: "claude-3-5-sonnet-20241022",
        suggested_temperature: 0.5,
        use_cases: &["Academic papers", "Research analysis", "Literature review"],
    },
    BrainTemplate {
        id: "legal",
        name: "Legal Documents",
        description: "Specialized for legal contracts, policies, and regulations",
        llm_provider: LlmProvider::Anthropic,
        model: "claude-3-5-sonnet-20241022",
        suggested_temperature: 0.2,
        use_cases: &["Contracts", "Legal policies", "Compliance documents"],
    },
    BrainTemplate {
        id: "customer_support",
        name: "Customer Support",
        description: "Optimized for customer support documentation and FAQs",
        llm_provider: LlmProvider::Anthropic,
        model: "claude-3-5-sonnet-20241022",
        suggested_temperature: 0.6,
        use_cases: &["FAQs", "Support tickets", "Product documentation"],
    },
    BrainTemplate {
        id: "creative",
        name: "Creative Writing",
        description: "For creative content, marketing materials, and storytelling",
        llm_provider: LlmProvider::Anthropic,
        model: "claude-3-5-sonnet-20241022",
        suggested_temperature: 0.9,
        use_cases: &["Marketing content", "Creative writing", "Brainstorming"],
    },
];

/// Look up a template by id.
pub fn find_template(template_id: &str) -> Option<&'static BrainTemplate> {
    BRAIN_TEMPLATES.iter().find(|t| t.id == template_id)
}
