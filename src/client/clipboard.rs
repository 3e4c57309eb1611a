//! Clipboard access for the paste and copy actions

use crate::client::error::ClientError;

pub trait Clipboard {
    fn read_text(&mut self) -> Result<String, ClientError>;
    fn write_text(&mut self, text: &str) -> Result<(), ClientError>;
}

/// The desktop clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClientError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClientError::ClipboardDenied(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClientError> {
        self.inner
            .get_text()
            .map_err(|e| ClientError::ClipboardDenied(e.to_string()))
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClientError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClientError::ClipboardDenied(e.to_string()))
    }
}

/// In-process clipboard; `denied` simulates a refused permission prompt
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub denied: bool,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            denied: false,
        }
    }

    pub fn denied() -> Self {
        Self {
            contents: None,
            denied: true,
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClientError> {
        if self.denied {
            return Err(ClientError::ClipboardDenied("permission refused".to_string()));
        }
        Ok(self.contents.clone().unwrap_or_default())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClientError> {
        if self.denied {
            return Err(ClientError::ClipboardDenied("permission refused".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
