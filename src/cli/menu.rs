// src/cli/menu.rs
use inquire::{Confirm, CustomType, InquireError, MultiSelect, Select};
use std::error::Error;
use std::fmt;

use crate::cli::handlers::{describe_failure, print_history, print_strength};
use crate::core::config::Config;
use crate::core::GenerationOrchestrator;
use crate::models::{CharacterClasses, GenerationRequest, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

const CLASS_NAMES: [&str; 4] = ["Uppercase (A-Z)", "Lowercase (a-z)", "Numbers (0-9)", "Symbols (!@#$)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    TogglePronounceable(bool),
    CharacterTypes,
    SetLength(usize),
    ViewHistory,
    DeleteHistoryEntry,
    ClearHistory,
    Exit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Generate => write!(f, "🔄  Generate password"),
            MenuAction::TogglePronounceable(on) => {
                write!(f, "🗣️  Pronounceable mode: {}", if *on { "on" } else { "off" })
            }
            MenuAction::CharacterTypes => write!(f, "🔠  Character types"),
            MenuAction::SetLength(length) => write!(f, "📏  Length: {}", length),
            MenuAction::ViewHistory => write!(f, "📜  View history"),
            MenuAction::DeleteHistoryEntry => write!(f, "🗑️  Delete a history entry"),
            MenuAction::ClearHistory => write!(f, "🧹  Clear history"),
            MenuAction::Exit => write!(f, "🚪  Exit"),
        }
    }
}

fn selected_names(classes: &CharacterClasses) -> Vec<usize> {
    [classes.uppercase, classes.lowercase, classes.numbers, classes.symbols]
        .iter()
        .enumerate()
        .filter(|(_, enabled)| **enabled)
        .map(|(i, _)| i)
        .collect()
}

fn classes_from_names(names: &[&str]) -> CharacterClasses {
    CharacterClasses {
        uppercase: names.contains(&CLASS_NAMES[0]),
        lowercase: names.contains(&CLASS_NAMES[1]),
        numbers: names.contains(&CLASS_NAMES[2]),
        symbols: names.contains(&CLASS_NAMES[3]),
    }
}

async fn generate(orchestrator: &mut GenerationOrchestrator, request: &GenerationRequest) {
    if request.pronounceable {
        println!("⏳ Asking the generation service for a pronounceable password...");
    }

    match orchestrator.generate(request).await {
        Ok(password) => {
            println!("\nGenerated Password: {}", console::style(&password).cyan().bold());
            print_strength(orchestrator.strength());
        }
        Err(e) => {
            let (title, description) = describe_failure(&e);
            eprintln!("❌ {}: {}", title, description);
        }
    }
}

pub async fn run_cli_menu(orchestrator: &mut GenerationOrchestrator, config: &Config) -> Result<(), Box<dyn Error>> {
    println!("╔══════════════════════════════════════╗");
    println!("║           🔐 PASSQUARTZ              ║");
    println!("╚══════════════════════════════════════╝");

    let mut request = GenerationRequest::new(config.default_password_length, config.default_classes, false);

    if !orchestrator.pronounceable_available() {
        log::info!("Pronounceable mode unavailable: no API key configured");
    }

    // A fresh password is ready as soon as the menu opens
    generate(orchestrator, &request).await;

    loop {
        let options = vec![
            MenuAction::Generate,
            MenuAction::TogglePronounceable(request.pronounceable),
            MenuAction::CharacterTypes,
            MenuAction::SetLength(request.length),
            MenuAction::ViewHistory,
            MenuAction::DeleteHistoryEntry,
            MenuAction::ClearHistory,
            MenuAction::Exit,
        ];

        let selection = tokio::task::spawn_blocking(move || {
            Select::new("Choose an option:", options)
                .with_help_message("Use arrow keys to navigate, Enter to select. Esc to exit.")
                .with_page_size(10)
                .prompt_skippable()
        })
        .await?;

        let action = match selection {
            Ok(Some(action)) => action,
            Ok(None) | Err(InquireError::OperationInterrupted) | Err(InquireError::OperationCanceled) => break,
            Err(e) => return Err(Box::new(e)),
        };

        match action {
            MenuAction::Generate => generate(orchestrator, &request).await,
            MenuAction::TogglePronounceable(on) => {
                request.pronounceable = !on;
                if request.pronounceable && !orchestrator.pronounceable_available() {
                    println!("❗ Set GEMINI_API_KEY to use pronounceable mode.");
                }
                if request.pronounceable {
                    println!("ℹ️  Pronounceable passwords may use every character type.");
                }
            }
            MenuAction::CharacterTypes => {
                let defaults = selected_names(&request.classes);
                let chosen = MultiSelect::new("Character types:", CLASS_NAMES.to_vec())
                    .with_default(&defaults)
                    .prompt_skippable()?;

                if let Some(chosen) = chosen {
                    request.classes = classes_from_names(&chosen);
                    if !request.classes.any() && !request.pronounceable {
                        println!("❗ Select at least one character type before generating.");
                    }
                }
            }
            MenuAction::SetLength(current) => {
                let length = CustomType::<usize>::new("Password length:")
                    .with_default(current)
                    .with_error_message("Please type a whole number")
                    .with_help_message(&format!("Between {} and {}", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH))
                    .prompt_skippable()?;

                if let Some(length) = length {
                    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
                        request.length = length;
                    } else {
                        println!("❗ Length must be between {} and {}.", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
                    }
                }
            }
            MenuAction::ViewHistory => print_history(orchestrator),
            MenuAction::DeleteHistoryEntry => {
                let entries = orchestrator.history().entries().to_vec();
                if entries.is_empty() {
                    println!("No passwords in history.");
                    continue;
                }

                let labels: Vec<String> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, password)| format!("{:>3}. {}", i + 1, password))
                    .collect();

                if let Some(label) = Select::new("Delete which entry?", labels.clone()).prompt_skippable()? {
                    if let Some(index) = labels.iter().position(|l| *l == label) {
                        match orchestrator.delete_history_entry(index) {
                            Ok(_) => println!("✅ Password removed from history."),
                            Err(e) => eprintln!("❌ Failed to update history: {}", e),
                        }
                    }
                }
            }
            MenuAction::ClearHistory => {
                if orchestrator.history().is_empty() {
                    println!("No passwords in history.");
                    continue;
                }

                let confirm = Confirm::new("Clear the whole history?")
                    .with_default(false)
                    .prompt()?;

                if confirm {
                    match orchestrator.clear_history() {
                        Ok(()) => println!("✅ History cleared."),
                        Err(e) => eprintln!("❌ Failed to clear history: {}", e),
                    }
                }
            }
            MenuAction::Exit => break,
        }
    }

    println!("\n👋 Goodbye!");
    Ok(())
}
