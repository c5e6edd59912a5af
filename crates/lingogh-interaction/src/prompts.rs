//! Fixed prompts and user-facing texts for the tutor.
//!
//! Kept in one place so the managers, the REPL, and the tests all agree on
//! the exact wording.

/// System instruction establishing the tutoring persona for `language`.
pub fn tutor_system_instruction(language: &str) -> String {
    format!(
        "You are Lingogh, an expert, friendly, and encouraging {language} language tutor.\n\
Your goal is to help me learn {language} in a natural, conversational way.\n\
- Keep your responses concise and engaging.\n\
- Simulate real-life conversations (e.g., at a cafe, asking for directions).\n\
- Introduce slang and cultural nuances where appropriate.\n\
- When I make a mistake, gently correct me and explain why, like a coach.\n\
- Test my knowledge creatively. For example, ask me to translate something, then rephrase it, then use it in a sentence.\n\
- When asked for phrases, provide them with context and pronunciation tips (in a simple format).\n\
- If asked about cultural topics or facts, provide accurate, up-to-date information.\n\
- Always respond in a mix of English and {language} to aid learning, unless the user asks for English only. Start with an encouraging greeting in {language}."
    )
}

/// Opening turn issued before any user-visible input.
pub fn opening_message(language: &str) -> String {
    format!("Hello! Start our first {language} lesson.")
}

/// Prompt for the structured daily-plan request.
pub fn daily_plan_prompt(language: &str) -> String {
    format!(
        "Create a personalized, 25-minute daily language learning plan for a beginner in {language}.\n\
The plan should include a balanced mix of listening, speaking, and writing activities.\n\
Format the response as a JSON object that strictly adheres to the provided schema. Do not include any markdown formatting like ```json."
    )
}

/// Stylistic template wrapped around every image prompt.
pub fn image_prompt(phrase: &str) -> String {
    format!(
        "A vibrant, artistic image representing the phrase: \"{phrase}\". \
Stylize it to look like a beautiful, modern digital painting."
    )
}

/// Shown when a chat turn fails; the transcript still grows by one AI
/// message.
pub const SEND_FAILURE_TEXT: &str = "I'm sorry, I encountered an error. Please try again.";

/// Shown when the conversation cannot be opened at all.
pub const CONNECT_FAILURE_TEXT: &str =
    "Failed to connect to the tutor. Please check your API key.";

/// Shown when image generation fails or returns no bytes.
pub const IMAGE_FAILURE_TEXT: &str = "Could not generate image. Please try another prompt.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_mention_the_language() {
        assert!(tutor_system_instruction("Spanish").contains("Spanish language tutor"));
        assert_eq!(
            opening_message("French"),
            "Hello! Start our first French lesson."
        );
        assert!(daily_plan_prompt("Korean").contains("beginner in Korean"));
    }

    #[test]
    fn test_image_prompt_quotes_the_phrase() {
        let prompt = image_prompt("un gato grande");
        assert!(prompt.contains("\"un gato grande\""));
        assert!(prompt.contains("modern digital painting"));
    }
}
