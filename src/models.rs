//! Result data structures emitted for each audited URL.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::LABEL_NA;

/// One observed response in a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopRecord {
    /// Effective URL fetched for this hop
    pub url: String,
    /// HTTP status code of the response
    pub status: u16,
    /// Classifier label for the server that answered
    pub server_name: String,
}

/// Status reported for a URL: the first hop's code, or `"Error"` when no hop
/// completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Code(u16),
    Error,
}

const ERROR_SENTINEL: &str = "Error";

impl Serialize for ResultStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultStatus::Code(code) => serializer.serialize_u16(*code),
            ResultStatus::Error => serializer.serialize_str(ERROR_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for ResultStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(ResultStatus::Code(code)),
            Raw::Text(text) if text == ERROR_SENTINEL => Ok(ResultStatus::Error),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a status code or \"{ERROR_SENTINEL}\", got \"{text}\""
            ))),
        }
    }
}

/// Comment of a walk that ended on its first response.
pub const COMMENT_OK: &str = "OK";
/// Comment of a walk that succeeded after at least one redirect.
pub const COMMENT_REDIRECT_CHAIN: &str = "Redirect Chain";

/// Final output for one input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResult {
    /// Input URL after scheme normalization
    pub url: String,
    pub status: ResultStatus,
    /// Outcome text: "OK", "Redirect Chain", or a failure description
    pub comment: String,
    /// Server name of the first hop, or "N/A"
    pub server_name: String,
    pub redirect_chain: Vec<HopRecord>,
}

impl UrlResult {
    /// Builds a result whose status and server name come from the first hop.
    pub fn from_chain(url: String, comment: String, redirect_chain: Vec<HopRecord>) -> Self {
        let (status, server_name) = match redirect_chain.first() {
            Some(hop) => (ResultStatus::Code(hop.status), hop.server_name.clone()),
            None => (ResultStatus::Error, LABEL_NA.to_string()),
        };
        Self {
            url,
            status,
            comment,
            server_name,
            redirect_chain,
        }
    }

    /// Whether the walk ended in a non-error response.
    pub fn is_success(&self) -> bool {
        self.comment == COMMENT_OK || self.comment == COMMENT_REDIRECT_CHAIN
    }
}

/// A message on the batch output channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchMessage {
    Result(Box<UrlResult>),
    Done(DoneMarker),
}

impl BatchMessage {
    pub fn done() -> Self {
        BatchMessage::Done(DoneMarker {
            status: DoneStatus::Done,
        })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, BatchMessage::Done(_))
    }
}

impl From<UrlResult> for BatchMessage {
    fn from(result: UrlResult) -> Self {
        BatchMessage::Result(Box::new(result))
    }
}

/// Terminal marker, serialized as `{"status": "done"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoneMarker {
    pub status: DoneStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoneStatus {
    Done,
}
