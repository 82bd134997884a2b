// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::Rng;

use super::ValidationError;

/// Draws passwords by sampling an alphabet uniformly with replacement.
pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    /// Generate `length` characters from `alphabet` using the OS CSPRNG.
    pub fn generate(&self, length: usize, alphabet: &[char]) -> Result<String, ValidationError> {
        self.generate_with(&mut OsRng, length, alphabet)
    }

    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        alphabet: &[char],
    ) -> Result<String, ValidationError> {
        if alphabet.is_empty() {
            return Err(ValidationError::NoCharacterClasses);
        }

        let dist = Uniform::from(0..alphabet.len());
        let password: String = (0..length)
            .map(|_| alphabet[dist.sample(rng)])
            .collect();

        Ok(password)
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}
