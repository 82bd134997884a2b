// src/cli/handlers.rs
use console::style;
use std::error::Error;

use crate::cli::CliCommand;
use crate::core::config::Config;
use crate::core::{GenerationError, GenerationOrchestrator};
use crate::generators::StrengthScorer;
use crate::models::{ColorTag, GenerationRequest, StrengthAssessment};
use crate::utils::{format_score, truncate_string};

// Title and description shown to the user for a failed attempt
pub fn describe_failure(error: &GenerationError) -> (&'static str, String) {
    match error {
        GenerationError::ValidationError(e) => ("No options selected", e.to_string()),
        GenerationError::ServiceError(e) => {
            log::debug!("Service failure detail: {}", e);
            (
                "AI Generation Error",
                "The AI password generation service is currently unavailable. Please try again later.".to_string(),
            )
        }
        GenerationError::Busy => ("Please wait", error.to_string()),
    }
}

pub fn print_strength(assessment: &StrengthAssessment) {
    let label = assessment.label.to_string();
    let styled = match assessment.color {
        ColorTag::Destructive => style(label).red().bold(),
        ColorTag::Warning => style(label).yellow().bold(),
        ColorTag::Success => style(label).green().bold(),
    };
    println!("Strength: {} ({})", styled, format_score(assessment.score));
}

pub fn print_history(orchestrator: &GenerationOrchestrator) {
    let history = orchestrator.history();
    if history.is_empty() {
        println!("No passwords in history.");
        return;
    }

    for (i, password) in history.entries().iter().enumerate() {
        println!("{:>3}. {}", i + 1, truncate_string(password, 64));
    }
}

pub async fn handle_generate(
    orchestrator: &mut GenerationOrchestrator,
    request: &GenerationRequest,
) -> Result<(), Box<dyn Error>> {
    if request.pronounceable {
        println!("⏳ Asking the generation service for a pronounceable password...");
    }

    match orchestrator.generate(request).await {
        Ok(password) => {
            println!("\nGenerated Password: {}", style(&password).cyan().bold());
            print_strength(orchestrator.strength());
            Ok(())
        }
        Err(e) => {
            let (title, description) = describe_failure(&e);
            eprintln!("❌ {}: {}", title, description);
            Err(Box::new(e))
        }
    }
}

pub fn handle_strength(password: &str) {
    print_strength(&StrengthScorer::score(password));
}

/// Delete by 1-based position as printed by `print_history`.
pub fn handle_delete(orchestrator: &mut GenerationOrchestrator, position: usize) -> Result<(), Box<dyn Error>> {
    let removed = match position.checked_sub(1) {
        Some(index) => orchestrator.delete_history_entry(index)?,
        None => None,
    };

    match removed {
        Some(_) => println!("✅ Password removed from history."),
        None => println!("❗ No history entry at position {}.", position),
    }
    Ok(())
}

pub fn handle_clear(orchestrator: &mut GenerationOrchestrator) -> Result<(), Box<dyn Error>> {
    orchestrator.clear_history()?;
    println!("✅ History cleared.");
    Ok(())
}

pub async fn run_command(
    command: CliCommand,
    orchestrator: &mut GenerationOrchestrator,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    if let Some(request) = command.to_request(config.default_password_length, config.default_classes) {
        return handle_generate(orchestrator, &request).await;
    }

    match command {
        CliCommand::Strength { password } => handle_strength(&password),
        CliCommand::History => print_history(orchestrator),
        CliCommand::Delete { index } => handle_delete(orchestrator, index)?,
        CliCommand::Clear => handle_clear(orchestrator)?,
        CliCommand::Generate { .. } => {}
    }
    Ok(())
}
