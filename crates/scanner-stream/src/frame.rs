//! Stream frame model
//!
//! Each frame is one newline-delimited JSON object on the wire, tagged by
//! a `type` field:
//!
//! ```json
//! {"type":"header","mode":"batch","codes":["600000.SH","000001.SZ"]}
//! {"type":"progress","code":"600000.SH","chunk":"Revenue grew"}
//! {"type":"result","code":"600000.SH","analysis":"...","score":72}
//! {"type":"error","code":"000001.SZ","message":"upstream timeout"}
//! {"type":"complete","status":"ok"}
//! ```

use serde::{Deserialize, Serialize};

/// Classification of a stream: one target or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    Single,
    Batch,
}

/// Terminal status carried by the closing sentinel frame.
///
/// `Aborted` means the stream ended on a producer hard fault rather than
/// by the producer finishing; clients must not trust the HTTP status for
/// this distinction since the response header was already sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Ok,
    Aborted,
}

/// One unit of a streaming analysis response.
///
/// Ordering contract: exactly one `Header` opens the stream; `Progress`
/// frames arrive in producer order; each requested code eventually gets a
/// terminal `Result` or `Error` frame; a `Complete` sentinel closes every
/// stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamFrame {
    Header {
        mode: StreamMode,
        codes: Vec<String>,
    },
    Progress {
        code: String,
        chunk: String,
    },
    Result {
        code: String,
        analysis: String,
        score: Option<u8>,
    },
    Error {
        /// Absent when the failure is not attributable to one code
        #[serde(skip_serializing_if = "Option::is_none", default)]
        code: Option<String>,
        message: String,
    },
    Complete {
        status: StreamStatus,
    },
}

impl StreamFrame {
    /// True for frames that end the story of one requested code.
    pub fn is_terminal_for(&self, target: &str) -> bool {
        match self {
            Self::Result { code, .. } => code == target,
            Self::Error { code: Some(code), .. } => code == target,
            _ => false,
        }
    }
}
