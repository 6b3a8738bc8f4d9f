use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Select, Text};
use std::fmt;
use std::fs;
use std::time::Duration;

use crate::core::steps::{StepDefinition, STEPS};
use crate::services::optimizer::PromptOptimizer;
use crate::services::wizard::{StepStatus, WizardEngine};

const TYPE_OWN_ANSWER: &str = "-- Type my own answer --";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Generate,
    Edit,
    Previous,
    Quit,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepAction::Next => "Next →",
            StepAction::Generate => "Generate Prompt ✓",
            StepAction::Edit => "Edit answer",
            StepAction::Previous => "← Previous",
            StepAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    Optimize,
    ShowOriginal,
    Save,
    Restart,
    Quit,
}

impl fmt::Display for ResultAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResultAction::Optimize => "✨ Optimize with AI",
            ResultAction::ShowOriginal => "Show Original",
            ResultAction::Save => "Save to file",
            ResultAction::Restart => "Create Another Prompt",
            ResultAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Actions offered below a step. Forward moves only appear when the engine allows them.
pub fn step_actions(wizard: &WizardEngine) -> Vec<StepAction> {
    let mut actions = Vec::new();
    if wizard.current_step().is_some_and(|s| s.id == STEPS.len()) {
        if wizard.all_complete() {
            actions.push(StepAction::Generate);
        }
    } else if wizard.can_advance(wizard.position()) {
        actions.push(StepAction::Next);
    }
    actions.push(StepAction::Edit);
    if wizard.position() > 1 {
        actions.push(StepAction::Previous);
    }
    actions.push(StepAction::Quit);
    actions
}

pub fn result_actions(wizard: &WizardEngine) -> Vec<ResultAction> {
    let mut actions = Vec::new();
    if wizard.shows_optimized() {
        actions.push(ResultAction::ShowOriginal);
    } else if !wizard.is_optimizing() {
        actions.push(ResultAction::Optimize);
    }
    actions.push(ResultAction::Save);
    actions.push(ResultAction::Restart);
    actions.push(ResultAction::Quit);
    actions
}

/// Plain-text rendering of the step screen.
pub fn render_step(wizard: &WizardEngine, step: &StepDefinition) -> String {
    let progress = wizard.progress();
    let mut out = String::new();

    out.push_str(&format!(
        "Step {} of {}    {}% Complete\n",
        progress.step, progress.total, progress.percent
    ));
    let indicators: Vec<String> = STEPS
        .iter()
        .map(|s| match wizard.step_status(s.id) {
            StepStatus::Completed => "[✓]".to_string(),
            StepStatus::Current => format!("[{}]", s.id),
            StepStatus::Pending => format!(" {} ", s.id),
        })
        .collect();
    out.push_str(&indicators.join(" "));
    out.push_str("\n\n");

    out.push_str(&format!("Step {}: {}\n", step.id, step.title));
    out.push_str(step.question);
    out.push('\n');
    out.push_str(step.description);
    out.push_str("\n\nConsider these questions:\n");
    for item in step.checklist {
        out.push_str(&format!("  • {}\n", item));
    }

    let summary = wizard.summary();
    if !summary.is_empty() {
        out.push_str("\nSummary So Far\n");
        for (title, answer) in summary {
            out.push_str(&format!("  {}: {}\n", title, answer));
        }
    }
    out
}

pub async fn run_session(optimizer: &dyn PromptOptimizer) -> Result<()> {
    let mut wizard = WizardEngine::new();
    println!("Custom Prompt Generation Assistant");
    println!("Create structured prompts step-by-step for optimal AI performance\n");

    loop {
        let keep_going = match wizard.current_step() {
            Some(step) => run_step(&mut wizard, step)?,
            None => run_result(&mut wizard, optimizer).await?,
        };
        if !keep_going {
            break;
        }
    }
    Ok(())
}

fn run_step(wizard: &mut WizardEngine, step: &'static StepDefinition) -> Result<bool> {
    println!("{}", render_step(wizard, step));
    ask_answer(wizard, step)?;

    loop {
        let action = Select::new("What next?", step_actions(wizard)).prompt()?;
        match action {
            StepAction::Next => {
                wizard.advance();
            }
            StepAction::Generate => {
                wizard.generate_final_prompt();
            }
            StepAction::Edit => ask_answer(wizard, step)?,
            StepAction::Previous => {
                wizard.retreat();
            }
            StepAction::Quit => return Ok(false),
        }
        if action != StepAction::Edit {
            return Ok(true);
        }
    }
}

fn ask_answer(wizard: &mut WizardEngine, step: &StepDefinition) -> Result<()> {
    if let Some(options) = step.dropdown {
        let mut choices = vec![TYPE_OWN_ANSWER];
        choices.extend_from_slice(options);
        let choice = Select::new(step.question, choices)
            .with_page_size(10)
            .prompt()?;
        if let Some(index) = options.iter().position(|o| *o == choice) {
            wizard.select_option(step.key, index);
            return Ok(());
        }
    }

    let current = wizard.answers().get(step.key).to_string();
    let answer = Text::new(step.question)
        .with_placeholder(step.placeholder)
        .with_initial_value(&current)
        .prompt()?;
    wizard.set_answer(step.key, answer);
    Ok(())
}

async fn run_result(wizard: &mut WizardEngine, optimizer: &dyn PromptOptimizer) -> Result<bool> {
    if wizard.shows_optimized() {
        println!("\nAI-Optimized Prompt");
        println!("✨ Enhanced for clarity and effectiveness\n");
    } else {
        println!("\nGenerated Prompt\n");
    }
    println!("{}\n", wizard.displayed_prompt().unwrap_or_default());

    match Select::new("What would you like to do?", result_actions(wizard)).prompt()? {
        ResultAction::Optimize => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            spinner.set_message("Optimizing...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = wizard.optimize(optimizer).await;
            spinner.finish_and_clear();

            if outcome.is_err() {
                println!("Sorry, there was an error optimizing your prompt. Please try again.");
            }
        }
        ResultAction::ShowOriginal => wizard.show_original(),
        ResultAction::Save => {
            let path = Text::new("Save to:").with_default("prompt.txt").prompt()?;
            let text = wizard.displayed_prompt().unwrap_or_default();
            fs::write(&path, text).with_context(|| format!("Failed to write {}", path))?;
            println!("Saved to {}", path);
        }
        ResultAction::Restart => wizard.reset(),
        ResultAction::Quit => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::AnswerKey;

    fn filled() -> WizardEngine {
        let mut wizard = WizardEngine::new();
        for key in AnswerKey::ALL {
            wizard.set_answer(key, format!("{} answer", key));
        }
        wizard
    }

    #[test]
    fn test_step_actions_hide_next_when_blank() {
        let wizard = WizardEngine::new();
        assert_eq!(
            step_actions(&wizard),
            vec![StepAction::Edit, StepAction::Quit]
        );
    }

    #[test]
    fn test_step_actions_middle_step() {
        let mut wizard = filled();
        wizard.advance();
        assert_eq!(
            step_actions(&wizard),
            vec![
                StepAction::Next,
                StepAction::Edit,
                StepAction::Previous,
                StepAction::Quit
            ]
        );
    }

    #[test]
    fn test_step_actions_last_step() {
        let mut wizard = filled();
        while wizard.advance() {}
        assert_eq!(step_actions(&wizard)[0], StepAction::Generate);

        wizard.set_answer(AnswerKey::Audience, " ");
        assert!(!step_actions(&wizard).contains(&StepAction::Generate));
        assert!(!step_actions(&wizard).contains(&StepAction::Next));
    }

    #[test]
    fn test_result_actions_follow_view_flags() {
        let mut wizard = filled();
        while wizard.advance() {}
        wizard.generate_final_prompt();
        assert_eq!(result_actions(&wizard)[0], ResultAction::Optimize);

        wizard.begin_optimization();
        assert!(!result_actions(&wizard).contains(&ResultAction::Optimize));

        wizard.finish_optimization(Ok("better".to_string())).unwrap();
        assert_eq!(result_actions(&wizard)[0], ResultAction::ShowOriginal);
    }

    #[test]
    fn test_render_step_shows_progress_and_summary() {
        let mut wizard = filled();
        wizard.advance();
        let step = wizard.current_step().unwrap();
        let screen = render_step(&wizard, step);

        assert!(screen.starts_with("Step 2 of 6    33% Complete\n"));
        assert!(screen.contains("[✓] [2]  3 "));
        assert!(screen.contains("Step 2: Goal\n"));
        assert!(screen.contains("  • How will you measure success?\n"));
        assert!(screen.contains("Summary So Far\n  Role: role answer\n"));
    }
}
