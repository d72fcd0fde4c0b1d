//! Shared fixture for handler tests.

use std::sync::Arc;

use serde_json::json;

use crate::adapters::memory::InMemoryPortalStore;
use crate::application::PolicyGate;
use crate::domain::classroom::{AuthIdentity, Profile};
use crate::domain::foundation::{ClassId, UserId};
use crate::ports::PortalStore;

pub struct Fixture {
    pub store: InMemoryPortalStore,
    pub gate: PolicyGate,
    pub class_a: ClassId,
    pub class_b: ClassId,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = InMemoryPortalStore::seeded();
        let classes = store.list_classes().await.unwrap();
        Self {
            gate: PolicyGate::new(Arc::new(store.clone())),
            class_a: classes[0].id(),
            class_b: classes[1].id(),
            store,
        }
    }

    pub fn store_arc(&self) -> Arc<dyn PortalStore> {
        Arc::new(self.store.clone())
    }

    /// Registers an identity with `role` and places it in `class_id`.
    pub async fn user(&self, email: &str, role: &str, class_id: Option<ClassId>) -> UserId {
        let identity =
            AuthIdentity::new(email, Some(json!({ "role": role, "name": email }))).unwrap();
        let mut profile = Profile::bootstrap(&identity);
        self.store.insert_identity(&identity, &profile).await.unwrap();
        if class_id.is_some() {
            profile.assign_class(class_id);
            self.store.update_profile(&profile).await.unwrap();
        }
        identity.id()
    }
}

