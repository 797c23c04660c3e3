// All LLM prompt constants for the writing pipeline.
// Templates use {placeholder} markers filled by the build_* functions below.

use crate::writing::models::{ChatMessage, WritingRequest};

/// How many trailing chat turns are replayed into the chat prompt.
pub const CHAT_HISTORY_WINDOW: usize = 5;

/// Generation prompt template.
/// Replace: {topic}, {instructions}, {word_count}, {reference_line}
const ACADEMIC_PROMPT_TEMPLATE: &str = r#"You are an expert academic writer. Create a well-structured academic paper on the following topic:

Topic: {topic}
Instructions: {instructions}
Target Word Count: {word_count} words
{reference_line}
Requirements:
1. Include a compelling introduction with thesis statement
2. Develop 3-5 well-organized body paragraphs with clear topic sentences
3. Provide a strong conclusion that synthesizes key points
4. Use formal academic language and proper transitions
5. Include relevant examples and analysis
6. Maintain scholarly tone throughout
7. Ensure content is original and well-researched

Structure the response with clear headings:
- Introduction
- Body paragraphs (with subheadings as appropriate)
- Conclusion

Write approximately {word_count} words."#;

/// Humanization prompt template. Replace: {draft}
const HUMANIZE_PROMPT_TEMPLATE: &str = r#"Take the following academic text and rewrite it to sound more natural and human-like while maintaining academic quality and structure. Make it sound like it was written by a university student who is knowledgeable but not overly formal or robotic.

Key adjustments:
1. Use more natural sentence flow and varied sentence lengths
2. Include occasional personal insights or observations
3. Make transitions more conversational but still academic
4. Reduce overly complex vocabulary where simpler words work
5. Add subtle personality while keeping it professional
6. Maintain all factual content and academic structure

Original text:
{draft}

Rewrite this to sound more human and natural while preserving academic integrity:"#;

/// Chat assistant prompt template.
/// Replace: {context_info}, {chat_history}, {message}
const CHAT_PROMPT_TEMPLATE: &str = r#"You are an expert academic writing assistant helping students create high-quality academic papers. You are knowledgeable, helpful, and encouraging.

Current Context:
{context_info}

Recent Chat History:
{chat_history}

Guidelines:
1. Provide specific, actionable advice for academic writing
2. Help with topic selection, research strategies, citation styles, and paper structure
3. Be encouraging and supportive
4. Keep responses concise but informative (2-3 sentences max)
5. Offer practical suggestions when appropriate
6. If asked about topics outside academic writing, politely redirect to writing-related help

User's question: {message}

Respond helpfully and concisely:"#;

/// Builds the structured generation prompt from a validated request.
/// Pure function — no validation beyond what the request already guarantees.
pub fn build_academic_prompt(request: &WritingRequest) -> String {
    let reference_line = match &request.reference_file_url {
        // The URL is stringified only; it is never fetched or parsed.
        Some(url) => format!("Reference Document: {url}\n"),
        None => String::new(),
    };

    ACADEMIC_PROMPT_TEMPLATE
        .replace("{topic}", &request.topic)
        .replace("{instructions}", &request.instructions)
        .replace("{word_count}", &request.word_count.to_string())
        .replace("{reference_line}", &reference_line)
}

/// Builds the stylistic rewrite prompt around a generated draft.
pub fn build_humanize_prompt(draft: &str) -> String {
    HUMANIZE_PROMPT_TEMPLATE.replace("{draft}", draft)
}

/// Context fields the frontend attaches to an advisory chat message.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub current_step: Option<u32>,
    pub topic: Option<String>,
    pub instructions: Option<String>,
    pub word_count: Option<u32>,
}

/// Builds the single-shot chat prompt: context block, trailing history
/// window, assistant guidelines, then the user's question.
pub fn build_chat_prompt(
    message: &str,
    context: Option<&ChatContext>,
    history: &[ChatMessage],
) -> String {
    let context_info = match context {
        Some(ctx) => format!(
            "Current Step: {}\nTopic: {}\nInstructions: {}\nWord Count: {}",
            ctx.current_step
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Not specified".to_string()),
            ctx.topic.as_deref().unwrap_or("Not specified"),
            ctx.instructions.as_deref().unwrap_or("Not specified"),
            ctx.word_count
                .map(|w| w.to_string())
                .unwrap_or_else(|| "Not specified".to_string()),
        ),
        None => String::new(),
    };

    let window_start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
    let chat_history = history[window_start..]
        .iter()
        .map(|msg| format!("{}: {}", msg.role.as_str(), msg.content))
        .collect::<Vec<_>>()
        .join("\n");

    CHAT_PROMPT_TEMPLATE
        .replace("{context_info}", &context_info)
        .replace("{chat_history}", &chat_history)
        .replace("{message}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writing::models::ChatRole;
    use chrono::Utc;

    fn request() -> WritingRequest {
        WritingRequest {
            topic: "Climate Change".to_string(),
            instructions: "APA style, 3 sources".to_string(),
            word_count: 1000,
            reference_file_url: None,
        }
    }

    #[test]
    fn test_academic_prompt_contains_request_fields() {
        let prompt = build_academic_prompt(&request());
        assert!(prompt.contains("Topic: Climate Change"));
        assert!(prompt.contains("Instructions: APA style, 3 sources"));
        assert!(prompt.contains("Target Word Count: 1000 words"));
        assert!(prompt.contains("Write approximately 1000 words."));
        assert!(!prompt.contains("Reference Document"));
        assert!(!prompt.contains('{'), "unfilled placeholder left in prompt");
    }

    #[test]
    fn test_academic_prompt_includes_reference_url_when_present() {
        let mut req = request();
        req.reference_file_url = Some("https://bucket/signed/doc.pdf".to_string());
        let prompt = build_academic_prompt(&req);
        assert!(prompt.contains("Reference Document: https://bucket/signed/doc.pdf"));
    }

    #[test]
    fn test_humanize_prompt_embeds_draft() {
        let prompt = build_humanize_prompt("The industrial revolution altered climate systems.");
        assert!(prompt.contains("The industrial revolution altered climate systems."));
        assert!(prompt.contains("varied sentence lengths"));
    }

    fn turn(role: ChatRole, content: &str) -> ChatMessage {
        ChatMessage {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_chat_prompt_keeps_last_five_turns() {
        let history: Vec<ChatMessage> = (0..8)
            .map(|i| turn(ChatRole::User, &format!("turn {i}")))
            .collect();
        let prompt = build_chat_prompt("How do I cite?", None, &history);
        assert!(!prompt.contains("turn 2"));
        assert!(prompt.contains("turn 3"));
        assert!(prompt.contains("turn 7"));
    }

    #[test]
    fn test_chat_prompt_renders_context_block() {
        let ctx = ChatContext {
            current_step: Some(2),
            topic: Some("Renewable Energy".to_string()),
            instructions: None,
            word_count: Some(1500),
        };
        let prompt = build_chat_prompt("Which citation style?", Some(&ctx), &[]);
        assert!(prompt.contains("Current Step: 2"));
        assert!(prompt.contains("Topic: Renewable Energy"));
        assert!(prompt.contains("Instructions: Not specified"));
        assert!(prompt.contains("Word Count: 1500"));
        assert!(prompt.contains("User's question: Which citation style?"));
    }
}
