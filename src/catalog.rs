use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Hard business content: the topic vocabulary, agent templates and the
/// system prompts sent to the completion API.
///
/// Every field has a built-in default, so a YAML override file only needs to
/// name the fields it changes. Templates substitute `{input}`; chatbot
/// templates also use `{name}`, `{description}`, `{knowledge}` and `{message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub topic_keywords: Vec<String>,
    pub agent_system_prompt: String,
    pub agents: BTreeMap<String, String>,
    pub fallback_agent_template: String,
    pub workflow_prompts: WorkflowPrompts,
    pub chatbot_prompts: ChatbotPrompts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowPrompts {
    pub n8n: String,
    pub make: String,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotPrompts {
    pub knowledge_system: String,
    pub knowledge_user: String,
    pub reply_system: String,
    pub generic_reply_system: String,
}

/// Which template an agent id resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateChoice<'a> {
    Agent(&'a str),
    Fallback(&'a str),
}

impl<'a> TemplateChoice<'a> {
    pub fn template(&self) -> &'a str {
        match self {
            TemplateChoice::Agent(t) | TemplateChoice::Fallback(t) => t,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TemplateChoice::Fallback(_))
    }
}

impl Catalog {
    /// Load a catalog from a YAML file. Fields absent from the file keep
    /// their built-in values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        let catalog: Catalog = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse catalog file: {}", path.display()))?;

        if catalog.topic_keywords.is_empty() {
            tracing::warn!(path = %path.display(), "catalog has no topic keywords, every tool will be filtered out");
        }
        tracing::info!(
            path = %path.display(),
            agents = catalog.agents.len(),
            keywords = catalog.topic_keywords.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Resolve an agent id. Unknown or missing ids get the generic template.
    pub fn agent_template(&self, agent_id: Option<&str>) -> TemplateChoice<'_> {
        match agent_id.and_then(|id| self.agents.get(id)) {
            Some(template) => TemplateChoice::Agent(template),
            None => TemplateChoice::Fallback(&self.fallback_agent_template),
        }
    }

    pub fn workflow_system_prompt(&self, platform: crate::workflows::Platform) -> &str {
        match platform {
            crate::workflows::Platform::N8n => &self.workflow_prompts.n8n,
            crate::workflows::Platform::Make => &self.workflow_prompts.make,
        }
    }
}

/// Substitute `{key}` placeholders in one pass over the template. Values are
/// written verbatim and never rescanned. Unknown placeholders are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });
        match hit {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

impl Default for Catalog {
    fn default() -> Self {
        let agents = [
            ("resume", "Create a professional resume based on the following information: {input}. Format it properly with sections for Contact Information, Professional Summary, Experience, Education, and Skills."),
            ("product", "Create a compelling product description for: {input}. Include key features, benefits, and a call-to-action."),
            ("email", "Summarize the following email content: {input}. Provide key points and action items."),
            ("pdf", "Explain the following PDF content: {input}. Break it down into key concepts and main points."),
            ("instagram", "Create engaging Instagram captions for: {input}. Include relevant hashtags and emojis."),
            ("social", "Create a social media content calendar for: {input}. Suggest post ideas, timing, and platforms."),
            ("business", "Generate creative business names for: {input}. Provide 10 options with brief explanations."),
            ("support", "Provide customer support response for: {input}. Be helpful, professional, and solution-oriented."),
            ("medical", "Explain the following medical symptoms: {input}. Provide general information only, not medical advice."),
            ("travel", "Create a travel itinerary for: {input}. Include attractions, accommodations, and logistics."),
            ("chatbot", "Create a custom chatbot script for: {input}. Define conversation flows and responses."),
            ("legal", "Simplify the following legal document: {input}. Explain in plain language."),
            ("linkedin", "Create a professional LinkedIn bio for: {input}. Highlight achievements and skills."),
            ("whatsapp", "Format the following message for WhatsApp: {input}. Make it clear and engaging."),
            ("planner", "Create a daily planner for: {input}. Include tasks, priorities, and time blocks."),
        ]
        .into_iter()
        .map(|(id, template)| (id.to_string(), template.to_string()))
        .collect();

        Catalog {
            topic_keywords: [
                "ai",
                "artificial intelligence",
                "machine learning",
                "automation",
                "chatbot",
                "neural",
                "deep learning",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            agent_system_prompt: "You are a helpful AI assistant. Provide clear, actionable, and professional responses.".to_string(),
            agents,
            fallback_agent_template: "Process the following request: {input}".to_string(),
            workflow_prompts: WorkflowPrompts::default(),
            chatbot_prompts: ChatbotPrompts::default(),
        }
    }
}

impl Default for WorkflowPrompts {
    fn default() -> Self {
        WorkflowPrompts {
            n8n: "You are an expert n8n workflow generator. Create a complete n8n workflow JSON configuration based on the user's request. Include all necessary nodes, connections, and configurations. Return only valid JSON.".to_string(),
            make: "You are an expert Make.com workflow generator. Create a complete Make.com scenario JSON configuration based on the user's request. Include all necessary modules, connections, and configurations. Return only valid JSON.".to_string(),
            user: "Create a {type} workflow for: {input}".to_string(),
        }
    }
}

impl Default for ChatbotPrompts {
    fn default() -> Self {
        ChatbotPrompts {
            knowledge_system: "You are an expert at preparing knowledge bases for customer support chatbots. Rewrite the provided material into a clear, well-organized reference with sections for key facts, policies, products or services, and frequently asked questions. Keep every fact from the original and do not invent new ones.".to_string(),
            knowledge_user: "Chatbot name: {name}\nPurpose: {description}\n\nKnowledge base:\n{knowledge}".to_string(),
            reply_system: "You are {name}, a customer support chatbot. {description}\n\nAnswer using only the knowledge below. If the answer is not covered, say so politely and offer to help with something else.\n\nKnowledge:\n{knowledge}".to_string(),
            generic_reply_system: "You are a friendly customer support chatbot. Answer the user's question helpfully and concisely. If you do not know something, say so politely.".to_string(),
        }
    }
}
