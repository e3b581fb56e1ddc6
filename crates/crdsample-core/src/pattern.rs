//! Random strings matching a regular expression
//!
//! Walks the high-level IR produced by `regex-syntax` and picks one branch,
//! repetition count and character at a time. Anchors and other look-around
//! assertions produce nothing.

use rand::Rng;
use regex_syntax::hir::{Class, Hir, HirKind};

/// Extra repetitions allowed beyond the minimum of an unbounded (or very wide) repeat
const MAX_EXTRA_REPEAT: u32 = 8;

/// Printable ASCII, preferred whenever a character class allows it
const PRINTABLE: (u32, u32) = (0x20, 0x7e);

/// Generate a string matching `pattern`, or `None` if the pattern cannot be parsed
pub fn generate<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> Option<String> {
    let hir = match regex_syntax::Parser::new().parse(pattern) {
        Ok(hir) => hir,
        Err(e) => {
            tracing::trace!(pattern, error = %e, "pattern not usable for sampling");
            return None;
        }
    };

    let mut out = String::new();
    sample(&hir, rng, &mut out);
    Some(out)
}

fn sample<R: Rng + ?Sized>(hir: &Hir, rng: &mut R, out: &mut String) {
    match hir.kind() {
        HirKind::Empty | HirKind::Look(_) => {}
        HirKind::Literal(literal) => out.push_str(&String::from_utf8_lossy(&literal.0)),
        HirKind::Class(Class::Unicode(class)) => {
            let ranges: Vec<(u32, u32)> = class
                .ranges()
                .iter()
                .map(|r| (r.start() as u32, r.end() as u32))
                .collect();
            if let Some(c) = pick(&ranges, rng).and_then(char::from_u32) {
                out.push(c);
            }
        }
        HirKind::Class(Class::Bytes(class)) => {
            let ranges: Vec<(u32, u32)> = class
                .ranges()
                .iter()
                .map(|r| (u32::from(r.start()), u32::from(r.end())))
                .collect();
            if let Some(c) = pick(&ranges, rng).and_then(char::from_u32) {
                out.push(c);
            }
        }
        HirKind::Repetition(repetition) => {
            let min = repetition.min;
            let max = repetition
                .max
                .unwrap_or(u32::MAX)
                .min(min.saturating_add(MAX_EXTRA_REPEAT));
            let count = rng.random_range(min..=max);
            for _ in 0..count {
                sample(&repetition.sub, rng, out);
            }
        }
        HirKind::Capture(capture) => sample(&capture.sub, rng, out),
        HirKind::Concat(parts) => {
            for part in parts {
                sample(part, rng, out);
            }
        }
        HirKind::Alternation(branches) => {
            if !branches.is_empty() {
                let index = rng.random_range(0..branches.len());
                sample(&branches[index], rng, out);
            }
        }
    }
}

/// Pick one code point from inclusive ranges, favouring printable ASCII
fn pick<R: Rng + ?Sized>(ranges: &[(u32, u32)], rng: &mut R) -> Option<u32> {
    let printable: Vec<(u32, u32)> = ranges
        .iter()
        .filter_map(|&(start, end)| {
            let start = start.max(PRINTABLE.0);
            let end = end.min(PRINTABLE.1);
            (start <= end).then_some((start, end))
        })
        .collect();

    let candidates = if printable.is_empty() {
        ranges
    } else {
        &printable[..]
    };

    let total: u64 = candidates
        .iter()
        .map(|&(start, end)| u64::from(end - start) + 1)
        .sum();
    if total == 0 {
        return None;
    }

    let mut offset = rng.random_range(0..total);
    for &(start, end) in candidates {
        let size = u64::from(end - start) + 1;
        if offset < size {
            return Some(start + offset as u32);
        }
        offset -= size;
    }
    None
}
