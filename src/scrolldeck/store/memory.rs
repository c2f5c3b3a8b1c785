use super::Backend;
use crate::error::Result;
use crate::model::StoreData;

/// In-memory backend for tests: persists into a held snapshot, no files.
#[derive(Default)]
pub struct MemoryBackend {
    snapshot: Option<StoreData>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been persisted before.
    pub fn seeded(data: StoreData) -> Self {
        Self {
            snapshot: Some(data),
        }
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> Result<Option<StoreData>> {
        Ok(self.snapshot.clone())
    }

    fn persist(&mut self, data: &StoreData) -> Result<()> {
        self.snapshot = Some(data.clone());
        Ok(())
    }
}
