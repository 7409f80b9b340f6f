use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Split a comma separated list but keep empty positions, so `a,,c` leaves
/// the second player to fall back to a default name.
pub fn split_csv_positional(s: &str) -> Vec<String> {
    s.split(',').map(|x| x.trim().to_string()).collect()
}

/// Parse a seed given as a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_seed(token: &str) -> Result<u64> {
    let token = token.trim();
    let parsed = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        u64::from_str_radix(&hex.replace('_', ""), 16)
    } else {
        token.replace('_', "").parse::<u64>()
    };
    parsed.with_context(|| format!("Unrecognized seed token: {token}"))
}
