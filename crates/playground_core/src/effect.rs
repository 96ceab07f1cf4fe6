use std::path::PathBuf;

use crate::{BlobChange, BlobUrl, OptimizationConfig, SVG_MIME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the optimizer synchronously, after the busy view has been rendered.
    Optimize {
        input: String,
        config: OptimizationConfig,
    },
    ReadFile { path: PathBuf },
    FetchUrl { url: String },
    /// Make `url` resolve to `text`.
    PublishBlob {
        url: BlobUrl,
        mime: &'static str,
        text: String,
    },
    RevokeBlob { url: BlobUrl },
    CopyToClipboard { text: String },
    /// Flash the short "copied" notice.
    ShowFeedback,
    Download { url: BlobUrl, file_name: &'static str },
    OpenWindow { url: BlobUrl },
}

impl From<BlobChange> for Effect {
    fn from(change: BlobChange) -> Self {
        match change {
            BlobChange::Published { url, text } => Effect::PublishBlob {
                url,
                mime: SVG_MIME,
                text,
            },
            BlobChange::Revoked { url } => Effect::RevokeBlob { url },
        }
    }
}
