use std::sync::{Mutex, PoisonError};

/// The text field the user types artist ids into. The controller reads it
/// on add and clears it afterwards.
pub trait InputPort: Send + Sync {
    fn read(&self) -> String;
    fn clear(&self);
}

#[derive(Default)]
pub struct BufferedInput {
    value: Mutex<String>,
}

impl BufferedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: impl Into<String>) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }
}

impl InputPort for BufferedInput {
    fn read(&self) -> String {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_raw_text_until_cleared() {
        let input = BufferedInput::new();
        input.set("  6eUKZXaKkcviH0Ku9w2n3V ");
        assert_eq!(input.read(), "  6eUKZXaKkcviH0Ku9w2n3V ");
        input.clear();
        assert_eq!(input.read(), "");
    }
}
