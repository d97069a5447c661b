//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use convcheck::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("Zinssatz 5%"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Lowercase the text and drop everything that is not alphanumeric.
///
/// Used to compare declared app names against identifiers found in code,
/// where `Loan Calc`, `loan-calc` and `LoanCalc` must all match.
///
/// ```
/// use convcheck::utils::fold_name;
///
/// assert_eq!(fold_name("Loan Calc"), "loancalc");
/// assert_eq!(fold_name("loan_calc.prefs"), "loancalcprefs");
/// ```
pub fn fold_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `"1 file"` / `"3 files"`.
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
