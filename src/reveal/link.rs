// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reveal links.
//!
//! The pair is serialized as JSON, encoded as URL-safe base64 without
//! padding, and carried in the `data` query parameter of the reveal page.
//! Names never appear in clear text in the link.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RevealError;

/// Query parameter holding the encoded payload.
pub const DATA_PARAM: &str = "data";

/// What a reveal link decodes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPayload {
    pub giver: String,
    pub recipient: String,
}

impl RevealPayload {
    /// The base64 text stored in the `data` parameter.
    pub fn encode(&self) -> String {
        let json = serde_json::json!({
            "giver": self.giver,
            "recipient": self.recipient,
        });
        URL_SAFE_NO_PAD.encode(json.to_string())
    }

    /// Parse the base64 text of a `data` parameter. Padding is tolerated.
    pub fn decode(data: &str) -> Result<Self, RevealError> {
        let bytes = URL_SAFE_NO_PAD.decode(data.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Link that reveals `recipient` to `giver`.
///
/// Existing query parameters of `base_url` are kept.
///
/// ```
/// use url::Url;
/// use santa_draw::reveal::{build_reveal_link, decode_reveal_link};
///
/// let base = Url::parse("https://example.com/reveal").unwrap();
/// let link = build_reveal_link(&base, "Bob", "Jim");
/// assert!(link.as_str().starts_with("https://example.com/reveal?data="));
/// assert!(!link.as_str().contains("Jim"));
///
/// let payload = decode_reveal_link(link.as_str()).unwrap();
/// assert_eq!(payload.recipient, "Jim");
/// ```
pub fn build_reveal_link(base_url: &Url, giver: &str, recipient: &str) -> Url {
    let payload = RevealPayload {
        giver: giver.to_string(),
        recipient: recipient.to_string(),
    };
    let mut link = base_url.clone();
    link.query_pairs_mut().append_pair(DATA_PARAM, &payload.encode());
    link
}

/// Decode a link produced by [`build_reveal_link`].
pub fn decode_reveal_link(link: &str) -> Result<RevealPayload, RevealError> {
    let url = Url::parse(link)?;
    let data = url
        .query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(RevealError::MissingData)?;
    RevealPayload::decode(&data)
}
