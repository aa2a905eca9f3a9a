//! Description rules for sheets and their line items.
//!
//! Descriptions are unique per owner (sheets) or per sheet (line items),
//! compared trimmed and case-insensitively. Copies get a `(Cópia n)` suffix.

use std::collections::HashSet;

use smartbudget_shared::AppError;

use crate::access::ResourceKind;

/// Trims surrounding whitespace; this is the stored form.
#[must_use]
pub fn normalize_description(raw: &str) -> String {
    raw.trim().to_string()
}

/// Compares two descriptions the way the uniqueness rule does.
#[must_use]
pub fn same_description(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Fails if `candidate` matches any of `existing`.
///
/// # Errors
///
/// Returns `AppError::Conflict` naming the kind and the candidate.
pub fn ensure_unique_description<'a, I>(
    kind: ResourceKind,
    candidate: &str,
    existing: I,
) -> Result<(), AppError>
where
    I: IntoIterator<Item = &'a str>,
{
    if existing.into_iter().any(|d| same_description(d, candidate)) {
        return Err(AppError::Conflict(format!(
            "this {} already exists: {}",
            kind.noun(),
            candidate.trim()
        )));
    }
    Ok(())
}

/// Picks a description for a copy of `original`.
///
/// Returns `original` itself when free, else the first free
/// `"{original} (Cópia {n})"` for n = 1, 2, ... Candidates are compared
/// against `existing` with the same rule as [`same_description`], so the
/// result always passes [`ensure_unique_description`].
#[must_use]
pub fn generate_duplicate_description<S: AsRef<str>>(original: &str, existing: &[S]) -> String {
    let taken: HashSet<String> = existing.iter().map(|d| description_key(d.as_ref())).collect();

    if !taken.contains(&description_key(original)) {
        return original.to_string();
    }

    let mut n: u64 = 1;
    loop {
        let candidate = format!("{original} (Cópia {n})");
        if !taken.contains(&description_key(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

fn description_key(description: &str) -> String {
    description.trim().to_lowercase()
}
