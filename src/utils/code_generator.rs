//! Random short code generation.
//!
//! Codes are drawn uniformly from a configured alphabet. They are public
//! identifiers, not secrets, so a fast thread-local RNG is sufficient; the
//! goal is an even spread over the code space to keep collisions rare.

use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Default alphabet: `A-Z`, `a-z`, `0-9` (62 symbols).
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default code length, giving 62^6 (about 5.68e10) possible codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that would shadow service routes or act as path segments.
const RESERVED_CODES: &[&str] = &["health", "shorten", "links", "auth", "api", ".", ".."];

/// Symbols besides ASCII alphanumerics that appear unescaped in a URL path.
const PATH_SAFE_PUNCTUATION: &[char] = &['-', '.', '_', '~'];

/// Rejected generator settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorConfigError {
    #[error("code length must be greater than 0")]
    ZeroLength,

    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    #[error("alphabet may only contain A-Z, a-z, 0-9, '-', '.', '_' and '~', found {0:?}")]
    UnsafeSymbol(char),

    #[error("alphabet contains {0:?} more than once")]
    DuplicateSymbol(char),
}

/// Produces fixed-length candidate codes.
///
/// # Examples
///
/// ```
/// use snaplink::utils::code_generator::CodeGenerator;
///
/// let generator = CodeGenerator::new("ab", 4).unwrap();
/// let code = generator.generate_candidate();
/// assert_eq!(code.len(), 4);
/// assert!(code.chars().all(|c| c == 'a' || c == 'b'));
/// ```
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<u8>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator over `alphabet` producing codes of `length` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorConfigError`] if the length is zero, the alphabet
    /// is empty or repeats a symbol, or a symbol would need percent-encoding
    /// in a URL path.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, GeneratorConfigError> {
        if length == 0 {
            return Err(GeneratorConfigError::ZeroLength);
        }
        if alphabet.is_empty() {
            return Err(GeneratorConfigError::EmptyAlphabet);
        }

        let mut seen = HashSet::new();
        for c in alphabet.chars() {
            if !is_path_safe(c) {
                return Err(GeneratorConfigError::UnsafeSymbol(c));
            }
            if !seen.insert(c) {
                return Err(GeneratorConfigError::DuplicateSymbol(c));
            }
        }

        Ok(Self {
            alphabet: alphabet.as_bytes().to_vec(),
            length,
        })
    }

    /// Returns a uniformly random code of exactly [`Self::length`] symbols.
    pub fn generate_candidate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..self.alphabet.len());
                self.alphabet[idx] as char
            })
            .collect()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &str {
        // Validated as ASCII in `new`.
        std::str::from_utf8(&self.alphabet).unwrap_or_default()
    }

    /// Number of distinct codes, or `None` if it overflows `u128`.
    pub fn code_space(&self) -> Option<u128> {
        let length = u32::try_from(self.length).ok()?;
        (self.alphabet.len() as u128).checked_pow(length)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.as_bytes().to_vec(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

fn is_path_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || PATH_SAFE_PUNCTUATION.contains(&c)
}

/// Returns true for codes that collide with service routes or dot segments.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
