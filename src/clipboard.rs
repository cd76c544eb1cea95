//! Clipboard access as an injectable service

/// Get/set-string clipboard service
pub trait Clipboard: std::fmt::Debug {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// The OS clipboard via `arboard`. Failures are logged and otherwise ignored.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Clipboard read failed: {}", e);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Err(e) =
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text))
        {
            tracing::warn!("Clipboard write failed: {}", e);
        }
    }
}

/// Process-local clipboard for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}
