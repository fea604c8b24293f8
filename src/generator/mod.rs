//! Random password generation.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{PassmanError, Result};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Longest password we are willing to generate.
pub const MAX_LENGTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub numbers: bool,
    pub special: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            numbers: true,
            special: true,
        }
    }
}

impl GeneratorOptions {
    /// Characters a password may be drawn from.
    pub fn charset(&self) -> Vec<u8> {
        let mut charset = format!("{LOWERCASE}{UPPERCASE}");
        if self.numbers {
            charset.push_str(NUMBERS);
        }
        if self.special {
            charset.push_str(SPECIAL);
        }
        charset.into_bytes()
    }
}

/// Generate a password by drawing each character uniformly from the charset.
pub fn generate(options: &GeneratorOptions) -> Result<Zeroizing<String>> {
    if options.length == 0 || options.length > MAX_LENGTH {
        return Err(PassmanError::CommandFailed(format!(
            "password length must be between 1 and {MAX_LENGTH}"
        )));
    }

    let charset = options.charset();
    let mut rng = rand::rng();
    let password: String = (0..options.length)
        .map(|_| char::from(charset[rng.random_range(0..charset.len())]))
        .collect();

    Ok(Zeroizing::new(password))
}
