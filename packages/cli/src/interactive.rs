//! Interactive prompts for running a batch without memorizing flags.
//!
//! Asks for the two directories (pre-filled from the environment when
//! set), an optional page range, and the concurrency, then runs the batch
//! exactly like `pdf_tabify run`.

use std::num::ParseIntError;
use std::path::PathBuf;

use dialoguer::{Confirm, Input};
use pdf_tabify_cli_utils::MultiProgress;
use pdf_tabify_pipeline::TabifyConfig;
use pdf_tabify_pipeline::config::{ENV_OUTPUT_DIR, ENV_PDFS_DIR};

/// Prompts for a directory, defaulting to the value of `env_key`.
fn prompt_dir(prompt: &str, env_key: &str) -> Result<PathBuf, dialoguer::Error> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Ok(default) = std::env::var(env_key)
        && !default.is_empty()
    {
        input = input.default(default);
    }
    Ok(PathBuf::from(input.interact_text()?))
}

/// Parses an optional page number; blank means "no limit".
fn parse_page(value: &str) -> Result<Option<u32>, ParseIntError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some)
}

fn parse_jobs(value: &str) -> Result<usize, ParseIntError> {
    value.trim().parse()
}

/// Prompts for an optional 1-based page number.
fn prompt_page(prompt: &str) -> Result<Option<u32>, Box<dyn std::error::Error>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(parse_page(&value)?)
}

/// Runs the interactive flow.
///
/// # Errors
///
/// Returns an error if a prompt fails, an entered value is invalid, or the
/// batch itself fails its precondition check.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("PDF Tabify");
    println!();

    let mut config = TabifyConfig {
        pdfs_dir: Some(prompt_dir("Directory containing PDFs", ENV_PDFS_DIR)?),
        output_dir: Some(prompt_dir("Output directory", ENV_OUTPUT_DIR)?),
        ..TabifyConfig::default()
    };

    config.extractor.pages.first = prompt_page("First page (empty for all)")?;
    config.extractor.pages.last = prompt_page("Last page (empty for all)")?;

    let jobs_str: String = Input::new()
        .with_prompt("PDFs to process concurrently")
        .default("1".to_string())
        .interact_text()?;
    config.jobs = parse_jobs(&jobs_str)?;

    config.keep_intermediate = Confirm::new()
        .with_prompt("Keep intermediate .spt files?")
        .default(true)
        .interact()?;

    let config = config.resolve()?;
    crate::run_batch(&config, multi, None).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_page_means_unbounded() {
        assert_eq!(parse_page("").unwrap(), None);
        assert_eq!(parse_page("  3 ").unwrap(), Some(3));
        assert!(parse_page("third").is_err());
    }

    #[test]
    fn invalid_job_count_is_an_error() {
        assert_eq!(parse_jobs(" 4").unwrap(), 4);
        assert!(parse_jobs("four").is_err());
        assert!(parse_jobs("-1").is_err());
    }
}
