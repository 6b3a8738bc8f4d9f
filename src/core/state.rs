use serde::{Deserialize, Serialize};
use std::fmt;

/// The six answers collected by the wizard, in step order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKey {
    Role,
    Goal,
    Context,
    Audience,
    Constraints,
    Style,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 6] = [
        AnswerKey::Role,
        AnswerKey::Goal,
        AnswerKey::Context,
        AnswerKey::Audience,
        AnswerKey::Constraints,
        AnswerKey::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKey::Role => "role",
            AnswerKey::Goal => "goal",
            AnswerKey::Context => "context",
            AnswerKey::Audience => "audience",
            AnswerKey::Constraints => "constraints",
            AnswerKey::Style => "style",
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    pub role: String,
    pub goal: String,
    pub context: String,
    pub audience: String,
    pub constraints: String,
    pub style: String,
    pub final_prompt: String,
    pub optimized_prompt: String,
}

impl AnswerSet {
    pub fn get(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::Role => &self.role,
            AnswerKey::Goal => &self.goal,
            AnswerKey::Context => &self.context,
            AnswerKey::Audience => &self.audience,
            AnswerKey::Constraints => &self.constraints,
            AnswerKey::Style => &self.style,
        }
    }

    /// Stores the value as typed. Whitespace is only ignored when checking completion.
    pub fn set(&mut self, key: AnswerKey, value: String) {
        let slot = match key {
            AnswerKey::Role => &mut self.role,
            AnswerKey::Goal => &mut self.goal,
            AnswerKey::Context => &mut self.context,
            AnswerKey::Audience => &mut self.audience,
            AnswerKey::Constraints => &mut self.constraints,
            AnswerKey::Style => &mut self.style,
        };
        *slot = value;
    }

    pub fn is_answered(&self, key: AnswerKey) -> bool {
        !self.get(key).trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_value_verbatim() {
        let mut answers = AnswerSet::default();
        answers.set(AnswerKey::Goal, "  teach budgeting  ".to_string());
        assert_eq!(answers.get(AnswerKey::Goal), "  teach budgeting  ");
        assert!(answers.is_answered(AnswerKey::Goal));
    }

    #[test]
    fn test_answer_set_serializes_camel_case() {
        let answers = AnswerSet {
            final_prompt: "p".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["finalPrompt"], "p");
        assert_eq!(json["optimizedPrompt"], "");
        assert_eq!(json["role"], "");
    }
}
