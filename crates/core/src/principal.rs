//! Parsing of the forwarded identity assertion header.
//!
//! The reverse proxy forwards the authenticated user as a base64-encoded
//! JSON claims document in the `X-MS-CLIENT-PRINCIPAL` header. This module
//! extracts the display name and the set of candidate email addresses;
//! subscriptions are matched against those emails.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::CoreError;

/// Claim type carrying the user's primary email address.
const CLAIM_EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";

/// Claim type carrying the user's preferred sign-in name (usually also an email).
const CLAIM_PREFERRED_USERNAME: &str = "preferred_username";

/// Claim type carrying the user's display name.
const CLAIM_NAME: &str = "name";

/// The resolved caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Display name; `"Guest"` when the name claim is absent.
    pub display_name: String,
    /// Candidate email addresses, lowercased and deduplicated. May be empty.
    pub emails: Vec<String>,
}

impl Principal {
    /// The unauthenticated fallback identity.
    pub fn guest() -> Self {
        Principal {
            display_name: "Guest".to_string(),
            emails: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct ClientPrincipal {
    #[serde(default)]
    claims: Vec<Claim>,
}

#[derive(Deserialize)]
struct Claim {
    #[serde(default)]
    typ: String,
    #[serde(default)]
    val: String,
}

/// Parse a base64-encoded claims document into a [`Principal`].
///
/// Unknown claim types are ignored. Both the email-address claim and
/// `preferred_username` are treated as candidate emails.
pub fn parse_client_principal(encoded: &str) -> Result<Principal, CoreError> {
    let decoded = BASE64
        .decode(encoded)
        .map_err(|e| CoreError::Unauthorized(format!("Malformed identity assertion: {e}")))?;
    let principal: ClientPrincipal = serde_json::from_slice(&decoded)
        .map_err(|e| CoreError::Unauthorized(format!("Malformed identity claims: {e}")))?;

    let mut display_name = "Guest".to_string();
    let mut emails: Vec<String> = Vec::new();

    for claim in principal.claims {
        match claim.typ.as_str() {
            CLAIM_NAME => display_name = claim.val,
            CLAIM_EMAIL | CLAIM_PREFERRED_USERNAME => {
                let email = claim.val.trim().to_lowercase();
                if !email.is_empty() && !emails.contains(&email) {
                    emails.push(email);
                }
            }
            _ => {}
        }
    }

    Ok(Principal {
        display_name,
        emails,
    })
}
