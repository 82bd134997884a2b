// src/cli/commands.rs
use clap::builder::RangedU64ValueParser;
use clap::Subcommand;

use crate::models::{CharacterClasses, GenerationRequest};

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a password
    Generate {
        /// Password length (6-64)
        #[arg(long, short, value_parser = RangedU64ValueParser::<usize>::new().range(6..=64))]
        length: Option<usize>,

        /// Leave out uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Leave out lowercase letters
        #[arg(long)]
        no_lowercase: bool,

        /// Leave out numbers
        #[arg(long)]
        no_numbers: bool,

        /// Include symbols
        #[arg(long, conflicts_with = "no_symbols")]
        symbols: bool,

        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,

        /// Ask the generation service for a pronounceable password
        #[arg(long, short)]
        pronounceable: bool,
    },

    /// Score a password without generating anything
    Strength {
        /// Password to score
        #[arg(required = true)]
        password: String,
    },

    /// List recently generated passwords, newest first
    History,

    /// Delete one history entry
    Delete {
        /// Position as shown by `history` (1 = newest)
        #[arg(required = true)]
        index: usize,
    },

    /// Clear the history
    Clear,
}

impl CliCommand {
    /// Build a generation request for `Generate`, filling unset options from
    /// the configured defaults.
    pub fn to_request(&self, default_length: usize, defaults: CharacterClasses) -> Option<GenerationRequest> {
        match self {
            CliCommand::Generate {
                length,
                no_uppercase,
                no_lowercase,
                no_numbers,
                symbols,
                no_symbols,
                pronounceable,
            } => {
                let classes = CharacterClasses {
                    uppercase: defaults.uppercase && !no_uppercase,
                    lowercase: defaults.lowercase && !no_lowercase,
                    numbers: defaults.numbers && !no_numbers,
                    symbols: (defaults.symbols || *symbols) && !no_symbols,
                };
                Some(GenerationRequest::new(
                    length.unwrap_or(default_length),
                    classes,
                    *pronounceable,
                ))
            }
            _ => None,
        }
    }
}
