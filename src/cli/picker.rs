//! Interactive fund picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `fv show` and choose a fund" UX

use std::io::{self, Write};

use crate::domain::{Fund, FundId};
use crate::error::AppError;

/// Outcome of one line of picker input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Fund(FundId),
    Cancel,
    Invalid(String),
}

/// Prompt the user to select a fund on stdin.
///
/// Behavior:
/// - list the given funds
/// - accept either a number (from the list) or any other fund id
/// - `q` cancels
pub fn prompt_for_fund(funds: &[Fund]) -> Result<FundId, AppError> {
    if funds.is_empty() {
        return Err(AppError::usage("No funds to choose from. Provide one with `fv show -f <id>`."));
    }

    println!("Known funds:");
    for (idx, fund) in funds.iter().enumerate() {
        println!("{:>3}) {} [{}] (id {})", idx + 1, fund.name, fund.risk_label(), fund.id);
    }

    loop {
        print!("Select a fund by number (1-{}) or type a fund id (q to quit): ", funds.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::usage(
                "No input received. Provide a fund with `fv show -f <id>`.",
            ));
        }

        match resolve_choice(&input, funds) {
            Choice::Fund(id) => return Ok(id),
            Choice::Cancel => return Err(AppError::usage("Canceled.")),
            Choice::Invalid(msg) => {
                println!("{msg}");
                continue;
            }
        }
    }
}

/// Interpret one line of picker input.
///
/// Small numbers select from the list; anything larger is taken as a fund id.
pub fn resolve_choice(input: &str, funds: &[Fund]) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Cancel;
    }

    match input.parse::<u32>() {
        Ok(0) => Choice::Invalid("Invalid choice: 0.".to_string()),
        Ok(n) if (n as usize) <= funds.len() => Choice::Fund(funds[n as usize - 1].id),
        Ok(id) => Choice::Fund(id),
        Err(_) => Choice::Invalid(format!(
            "Invalid choice: '{input}'. Enter a number between 1 and {} or a fund id.",
            funds.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog;

    #[test]
    fn list_numbers_and_ids() {
        let funds = catalog();
        assert_eq!(resolve_choice("2\n", &funds), Choice::Fund(187));
        assert_eq!(resolve_choice("15077", &funds), Choice::Fund(15077));
        assert_eq!(resolve_choice(" Q ", &funds), Choice::Cancel);
        assert!(matches!(resolve_choice("abc", &funds), Choice::Invalid(_)));
        assert!(matches!(resolve_choice("0", &funds), Choice::Invalid(_)));
    }
}
