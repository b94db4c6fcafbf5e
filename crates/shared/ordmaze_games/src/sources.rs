//! Identifier extraction from wallet and indexer payloads.
//!
//! The wallet bridges and HTTP calls live outside this crate; their JSON
//! responses are accepted here and reduced to a list of identifiers.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("payload contains no identifiers")]
    Empty,
}

/// `GET /address/<addr>` on the ord indexer.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInscriptions {
    pub inscriptions: Vec<String>,
}

/// Xverse `getAccounts` result.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<Vec<AccountEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountEntry {
    #[serde(default)]
    pub address: Option<String>,
}

/// Tap wallet `getInscriptions(offset, limit)` result.
#[derive(Debug, Clone, Deserialize)]
pub struct InscriptionList {
    pub list: Vec<InscriptionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InscriptionEntry {
    #[serde(default, rename = "inscriptionId")]
    pub inscription_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl InscriptionEntry {
    /// The inscription id, or the owning address when the id is missing.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(self.inscription_id.as_deref()).or_else(|| non_empty(self.address.as_deref()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Payload {
    Address(AddressInscriptions),
    Accounts(AccountsResponse),
    Inscriptions(InscriptionList),
    Plain(Vec<String>),
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Identifiers from any of the supported payload shapes, in payload order.
///
/// Empty strings are skipped.
pub fn identifiers_from_json(text: &str) -> Result<Vec<String>, SourceError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let payload = Payload::deserialize(value)
        .map_err(|_| SourceError::UnexpectedResponse(shorten(text)))?;

    let ids: Vec<String> = match payload {
        Payload::Address(a) => a.inscriptions,
        Payload::Accounts(a) => {
            if a.status != "success" {
                return Err(SourceError::UnexpectedResponse(format!(
                    "status {:?}",
                    a.status
                )));
            }
            let entries = a.result.ok_or_else(|| {
                SourceError::UnexpectedResponse("missing result array".to_string())
            })?;
            entries.into_iter().filter_map(|e| e.address).collect()
        }
        Payload::Inscriptions(l) => l
            .list
            .iter()
            .filter_map(|e| e.identifier().map(str::to_string))
            .collect(),
        Payload::Plain(v) => v,
    };

    let ids: Vec<String> = ids.into_iter().filter(|s| !s.is_empty()).collect();
    if ids.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(ids)
}

fn shorten(text: &str) -> String {
    const MAX: usize = 120;
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((i, _)) => format!("{}...", &trimmed[..i]),
        None => trimmed.to_string(),
    }
}
