use std::time::Duration;

use error_stack::Report;
use kernel::prelude::ledger::RetryConfig;
use kernel::{KernelError, KernelErrorExt};

use crate::optional_env;

static LEDGER_MAX_RETRY: &str = "LEDGER_MAX_RETRY";
static LEDGER_RETRY_DELAY_MS: &str = "LEDGER_RETRY_DELAY_MS";
static JWT_SECRET: &str = "JWT_SECRET";
static JWT_EXPIRES_IN: &str = "JWT_EXPIRES_IN";

/// Reads the ledger retry bounds, falling back to [`RetryConfig::default`]
/// for unset variables.
pub fn retry_config() -> error_stack::Result<RetryConfig, KernelError> {
    let default = RetryConfig::default();
    let max_retry = match optional_env(LEDGER_MAX_RETRY)? {
        Some(raw) => parse(LEDGER_MAX_RETRY, &raw)?,
        None => *default.max_retry(),
    };
    let retry_delay = match optional_env(LEDGER_RETRY_DELAY_MS)? {
        Some(raw) => Duration::from_millis(parse(LEDGER_RETRY_DELAY_MS, &raw)?),
        None => *default.retry_delay(),
    };
    Ok(RetryConfig::new(max_retry, retry_delay))
}

/// `None` when `JWT_SECRET` is unset.
pub fn token_secret() -> error_stack::Result<Option<String>, KernelError> {
    match optional_env(JWT_SECRET)? {
        Some(secret) if secret.trim().is_empty() => Err(Report::new(KernelError::Internal)
            .with_message(format!("{JWT_SECRET} must not be empty"))),
        secret => Ok(secret),
    }
}

/// `JWT_EXPIRES_IN` as `<n>s`, `<n>m`, `<n>h` or `<n>d` (a bare number is
/// seconds). Defaults to 90 days.
pub fn token_lifetime() -> error_stack::Result<time::Duration, KernelError> {
    match optional_env(JWT_EXPIRES_IN)? {
        Some(raw) => parse_lifetime(&raw),
        None => Ok(time::Duration::days(90)),
    }
}

fn parse_lifetime(raw: &str) -> error_stack::Result<time::Duration, KernelError> {
    let raw = raw.trim();
    let (amount, unit) = match raw.char_indices().last() {
        Some((at, unit)) if unit.is_ascii_alphabetic() => (&raw[..at], Some(unit)),
        _ => (raw, None),
    };
    let amount: i64 = parse(JWT_EXPIRES_IN, amount)?;
    match unit {
        None | Some('s') => Ok(time::Duration::seconds(amount)),
        Some('m') => Ok(time::Duration::minutes(amount)),
        Some('h') => Ok(time::Duration::hours(amount)),
        Some('d') => Ok(time::Duration::days(amount)),
        Some(other) => Err(Report::new(KernelError::Internal)
            .with_message(format!("{JWT_EXPIRES_IN} has an unknown unit `{other}`"))),
    }
}

fn parse<N: std::str::FromStr>(key: &str, raw: &str) -> error_stack::Result<N, KernelError>
where
    N::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse::<N>().map_err(|error| {
        Report::from(error)
            .change_context(KernelError::Internal)
            .with_message(format!("{key} must be a non-negative integer"))
    })
}

#[cfg(test)]
mod test {
    use super::parse_lifetime;

    #[test]
    fn lifetimes_accept_unit_suffixes() {
        assert_eq!(parse_lifetime("90d").unwrap(), time::Duration::days(90));
        assert_eq!(parse_lifetime(" 15m ").unwrap(), time::Duration::minutes(15));
        assert_eq!(parse_lifetime("3600").unwrap(), time::Duration::hours(1));
        assert!(parse_lifetime("2w").is_err());
        assert!(parse_lifetime("d").is_err());
    }
}
