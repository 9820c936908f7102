use once_cell::sync::Lazy;
use regex::Regex;

use crate::exception::{SamplerException, SamplerResult};

/// Length of the token the RFID reader produces.
pub const TOKEN_LEN: usize = 8;

static SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());

/// Accepts identifiers that are safe to embed in file names.
pub fn parse_slug(value: &str) -> SamplerResult<String> {
    if SLUG.is_match(value) {
        Ok(value.to_owned())
    } else {
        Err(SamplerException::InvalidIdentifier {
            value: value.to_owned(),
        })
    }
}

/// Extracts the deployment token from the body of a tagging request.
pub fn parse_token(body: &[u8]) -> SamplerResult<String> {
    let head = body.get(..TOKEN_LEN).ok_or_else(|| SamplerException::InvalidIdentifier {
        value: String::from_utf8_lossy(body).into_owned(),
    })?;
    let token = std::str::from_utf8(head).map_err(|_| SamplerException::InvalidIdentifier {
        value: String::from_utf8_lossy(head).into_owned(),
    })?;
    parse_slug(token)
}
