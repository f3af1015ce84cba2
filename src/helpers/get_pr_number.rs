use lazy_static::lazy_static;
use regex::Regex;
use std::env;

lazy_static! {
    static ref PR_REF_REGEX: Regex = Regex::new(r"^refs/pull/(?P<pr_number>\d+)/merge$").unwrap();
}

/// Pull request number of the current GitHub Actions run, if any
pub fn get_pr_number_from_env() -> Option<u64> {
    let ref_ = env::var("GITHUB_REF").ok()?;
    let captures = PR_REF_REGEX.captures(&ref_)?;
    captures["pr_number"]
        .parse::<u64>()
        .ok()
        .filter(|pr_number| *pr_number > 0)
}
