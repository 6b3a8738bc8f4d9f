use crate::core::state::{AnswerKey, AnswerSet};
use crate::core::steps::{step, StepDefinition, STEPS, STEP_COUNT};
use crate::services::optimizer::{OptimizeError, PromptOptimizer};
use crate::services::prompt::render_final_prompt;
use log::{debug, info};

/// Cursor value of the result view that follows the last step.
pub const RESULT_POSITION: usize = STEP_COUNT + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
    pub percent: u32,
}

/// Linear six-step form. Positions 1..=6 are the steps, 7 is the result view.
#[derive(Debug, Clone)]
pub struct WizardEngine {
    answers: AnswerSet,
    position: usize,
    optimizing: bool,
    show_optimized: bool,
}

impl Default for WizardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardEngine {
    pub fn new() -> Self {
        Self {
            answers: AnswerSet::default(),
            position: 1,
            optimizing: false,
            show_optimized: false,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_on_result(&self) -> bool {
        self.position == RESULT_POSITION
    }

    pub fn is_optimizing(&self) -> bool {
        self.optimizing
    }

    pub fn shows_optimized(&self) -> bool {
        self.show_optimized
    }

    /// The step under the cursor, `None` on the result view.
    pub fn current_step(&self) -> Option<&'static StepDefinition> {
        step(self.position)
    }

    pub fn set_answer(&mut self, key: AnswerKey, value: impl Into<String>) {
        self.answers.set(key, value.into());
    }

    /// Stores a preset choice from the step's option list.
    pub fn select_option(&mut self, key: AnswerKey, index: usize) -> bool {
        let choice = STEPS
            .iter()
            .find(|s| s.key == key)
            .and_then(|s| s.dropdown)
            .and_then(|options| options.get(index));

        match choice {
            Some(value) => {
                self.answers.set(key, value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn can_advance(&self, position: usize) -> bool {
        step(position).is_some_and(|s| self.answers.is_answered(s.key))
    }

    pub fn all_complete(&self) -> bool {
        AnswerKey::ALL.iter().all(|key| self.answers.is_answered(*key))
    }

    pub fn advance(&mut self) -> bool {
        if self.position >= STEP_COUNT || !self.can_advance(self.position) {
            return false;
        }
        self.position += 1;
        debug!("Advanced to step {}", self.position);
        true
    }

    pub fn retreat(&mut self) -> bool {
        if self.position <= 1 || self.is_on_result() {
            return false;
        }
        self.position -= 1;
        debug!("Moved back to step {}", self.position);
        true
    }

    /// Renders the final prompt and opens the result view. Only allowed from the
    /// last step (or the result view itself) once every answer is filled in.
    pub fn generate_final_prompt(&mut self) -> Option<String> {
        if self.position < STEP_COUNT || !self.all_complete() {
            return None;
        }
        let prompt = render_final_prompt(&self.answers);
        self.answers.final_prompt = prompt.clone();
        self.position = RESULT_POSITION;
        info!("Final prompt generated ({} chars)", prompt.chars().count());
        Some(prompt)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn progress(&self) -> Progress {
        let step = self.position.min(STEP_COUNT);
        let percent = (step as f64 / STEP_COUNT as f64 * 100.0).round() as u32;
        Progress {
            step,
            total: STEP_COUNT,
            percent,
        }
    }

    pub fn step_status(&self, id: usize) -> StepStatus {
        if id == self.position {
            StepStatus::Current
        } else if id < self.position {
            StepStatus::Completed
        } else {
            StepStatus::Pending
        }
    }

    /// Titles and answers of the steps already passed, skipping empty ones.
    pub fn summary(&self) -> Vec<(&'static str, &str)> {
        let passed = self.position.saturating_sub(1).min(STEP_COUNT);
        STEPS[..passed]
            .iter()
            .map(|s| (s.title, self.answers.get(s.key)))
            .filter(|(_, answer)| !answer.is_empty())
            .collect()
    }

    pub fn displayed_prompt(&self) -> Option<&str> {
        if !self.is_on_result() {
            return None;
        }
        if self.show_optimized {
            Some(&self.answers.optimized_prompt)
        } else {
            Some(&self.answers.final_prompt)
        }
    }

    pub fn show_original(&mut self) {
        self.show_optimized = false;
    }

    /// Marks an optimize call as outstanding and hands out the prompt to send.
    /// Returns `None` when a call is already running or nothing can be optimized.
    pub fn begin_optimization(&mut self) -> Option<String> {
        if self.optimizing || self.show_optimized || !self.is_on_result() {
            return None;
        }
        self.optimizing = true;
        Some(self.answers.final_prompt.clone())
    }

    pub fn finish_optimization(
        &mut self,
        result: Result<String, OptimizeError>,
    ) -> Result<(), OptimizeError> {
        self.optimizing = false;
        let optimized = result?;
        self.answers.optimized_prompt = optimized;
        self.show_optimized = true;
        Ok(())
    }

    /// Runs one optimize round trip. `Ok(false)` means no request was sent.
    pub async fn optimize(&mut self, optimizer: &dyn PromptOptimizer) -> Result<bool, OptimizeError> {
        let Some(prompt) = self.begin_optimization() else {
            return Ok(false);
        };
        let result = optimizer.optimize(&prompt).await;
        self.finish_optimization(result)?;
        Ok(true)
    }
}
