//! Global configuration for mafkit runtime behavior.
//!
//! This module provides thread-safe global configuration that affects
//! sequence-line parsing without adding overhead to hot loops.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for lenient numeric field parsing.
///
/// When enabled, the numeric fields of `s` lines (start, size, source size)
/// are read the way C's `strtoul` reads them: leading decimal digits are used
/// and anything after them is ignored. A field with no leading digits reads
/// as 0. When disabled (the default), such fields are a parse error.
///
/// This is set once at startup and read during parsing.
static LENIENT_NUMBERS: AtomicBool = AtomicBool::new(false);

/// Enable or disable lenient numeric parsing.
///
/// # Example
///
/// ```
/// use mafkit::config;
///
/// // Enable at startup before any parsing
/// config::set_lenient_numbers(true);
///
/// // "100bp" now reads as 100 instead of failing
/// assert_eq!(config::parse_count("100bp"), Some(100));
/// config::set_lenient_numbers(false);
/// ```
#[inline]
pub fn set_lenient_numbers(enabled: bool) {
    LENIENT_NUMBERS.store(enabled, Ordering::Release);
}

/// Check if lenient numeric parsing is enabled.
#[inline]
pub fn is_lenient_numbers() -> bool {
    LENIENT_NUMBERS.load(Ordering::Acquire)
}

/// Parse a non-negative decimal count according to the current mode.
///
/// Strict mode accepts only a non-empty run of ASCII digits that fits in a
/// `u64`. Lenient mode takes the longest digit prefix (saturating on
/// overflow) and never fails.
#[inline]
pub fn parse_count(token: &str) -> Option<u64> {
    if is_lenient_numbers() {
        Some(leading_digits(token.as_bytes()))
    } else {
        parse_digits(token.as_bytes())
    }
}

#[inline]
fn parse_digits(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

#[inline]
fn leading_digits(bytes: &[u8]) -> u64 {
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            break;
        }
        n = n.saturating_mul(10).saturating_add(d as u64);
    }
    n
}
