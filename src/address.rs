//! Account address sanity check and interactive prompts.
//!
//! The monitor accepts any non-empty address, but one that does not look
//! like `0x` + 40 hex digits is confirmed with the user first.

use std::io::{self, BufRead, Write};

/// Expected address length including the `0x` prefix.
const ADDRESS_LEN: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCheck {
    Valid,
    /// Usable, but not the usual shape. Carries the reason.
    Suspicious(&'static str),
}

pub fn check_address(address: &str) -> AddressCheck {
    let Some(hex) = address.strip_prefix("0x") else {
        return AddressCheck::Suspicious("does not start with 0x");
    };
    if address.len() != ADDRESS_LEN {
        return AddressCheck::Suspicious("is not 42 characters long");
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return AddressCheck::Suspicious("contains non-hex characters");
    }
    AddressCheck::Valid
}

/// Print `question` and read one trimmed line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask a yes/no question; only `y` or `yes` (any case) count as yes.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    let answer = prompt_line(input, out, &format!("{question} (y/n): "))?;
    Ok(matches!(
        answer.map(|a| a.to_ascii_lowercase()).as_deref(),
        Some("y" | "yes")
    ))
}
