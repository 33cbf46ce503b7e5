//! Numeric one-time code generation

use otp_shared::config::MAX_CODE_LENGTH;
use rand::{rngs::OsRng, Rng};

use crate::domain::entities::otp_record::CODE_LENGTH;

/// Generates fixed-width numeric codes from the operating system CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    /// Create a generator for codes of `length` digits (clamped to 1..=18)
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draw a code uniformly from the full N-digit range
    ///
    /// For six digits that is 100000..=999999, so a code never starts with zero.
    pub fn generate(&self) -> String {
        let exponent = (self.length - 1) as u32;
        let low = 10u64.pow(exponent);
        let high = low * 10;
        OsRng.gen_range(low..high).to_string()
    }

    /// Check that `code` is exactly N ASCII digits
    pub fn is_valid_format(&self, code: &str) -> bool {
        code.len() == self.length && code.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(CODE_LENGTH)
    }
}
