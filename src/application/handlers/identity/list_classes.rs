//! ListClassesHandler - every class, for administrative tooling.

use std::sync::Arc;

use crate::domain::classroom::{Class, PortalError};
use crate::ports::PortalStore;

pub struct ListClassesHandler {
    store: Arc<dyn PortalStore>,
}

impl ListClassesHandler {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<Class>, PortalError> {
        Ok(self.store.list_classes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPortalStore;

    #[tokio::test]
    async fn lists_seeded_classes_by_name() {
        let classes = ListClassesHandler::new(Arc::new(InMemoryPortalStore::seeded()))
            .handle()
            .await
            .unwrap();
        let names: Vec<&str> = classes.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Class 10A", "Class 10B", "Class 11A"]);
    }
}
