use crate::core::state::AnswerSet;

// The "appropriate" line keeps its two trailing spaces.
pub const SAFETY_FOOTER: &str = "Safety & Boundaries:\n\
- State your limitations when relevant\n\
- Redirect to human experts when appropriate  \n\
- Avoid unsafe, biased, or unethical content\n\
- Maintain neutrality and respect cultural sensitivity";

/// Renders the final prompt from the six answers. Values are interpolated untrimmed.
pub fn render_final_prompt(answers: &AnswerSet) -> String {
    format!(
        "You are a {}. Your goal is to {}.\n\nContext: {}. Target audience: {}.\n\nConstraints: {}\n\nStyle: {}\n\n{}",
        answers.role,
        answers.goal,
        answers.context,
        answers.audience,
        answers.constraints,
        answers.style,
        SAFETY_FOOTER
    )
}

/// Wraps a prompt in the rewrite instructions sent upstream.
pub fn optimization_request(prompt: &str) -> String {
    format!(
        r#"Please optimize this AI prompt for clarity, effectiveness, and completeness. Make it more specific, actionable, and well-structured while maintaining the original intent:

ORIGINAL PROMPT:
{}

OPTIMIZATION GUIDELINES:
- Enhance clarity and specificity
- Improve structure and organization
- Add any missing important elements
- Make instructions more actionable
- Ensure proper formatting
- Maintain the original core intent and requirements

Provide only the optimized prompt as your response, without any explanation or commentary."#,
        prompt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnswerSet {
        AnswerSet {
            role: "Data Analyst".to_string(),
            goal: "summarize churn drivers".to_string(),
            context: "Retail & E-commerce".to_string(),
            audience: "Senior executives".to_string(),
            constraints: "no customer names".to_string(),
            style: "Direct and concise".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_final_prompt_exact() {
        let expected = "You are a Data Analyst. Your goal is to summarize churn drivers.\n\
\n\
Context: Retail & E-commerce. Target audience: Senior executives.\n\
\n\
Constraints: no customer names\n\
\n\
Style: Direct and concise\n\
\n\
Safety & Boundaries:\n\
- State your limitations when relevant\n\
- Redirect to human experts when appropriate  \n\
- Avoid unsafe, biased, or unethical content\n\
- Maintain neutrality and respect cultural sensitivity";

        assert_eq!(render_final_prompt(&sample()), expected);
    }

    #[test]
    fn test_render_ignores_derived_fields() {
        let mut answers = sample();
        let before = render_final_prompt(&answers);
        answers.final_prompt = "old".to_string();
        answers.optimized_prompt = "older".to_string();
        assert_eq!(render_final_prompt(&answers), before);
    }

    #[test]
    fn test_optimization_request_embeds_prompt() {
        let request = optimization_request("Write a poem");
        assert!(request.starts_with("Please optimize this AI prompt"));
        assert!(request.contains("ORIGINAL PROMPT:\nWrite a poem\n\nOPTIMIZATION GUIDELINES:"));
        assert!(request.ends_with("without any explanation or commentary."));
    }
}
