//! Accessors for [`Service`] records.

use atelier_shared::constants::KEY_SERVICES;
use atelier_shared::types::{ServiceId, UserId};

use crate::error::{Result, StoreError};
use crate::models::Service;
use crate::store::Store;

impl Store {
    /// Persist a new service listing (or replace one with the same id).
    pub fn add_service(&self, service: Service) -> Result<Service> {
        tracing::info!(service = %service.id, provider = %service.provider.id, "service saved");
        self.put(KEY_SERVICES, service.clone())?;
        Ok(service)
    }

    /// Every service listing, in creation order.
    pub fn services(&self) -> Result<Vec<Service>> {
        self.read(KEY_SERVICES)
    }

    /// Services offered by `provider`, in creation order.
    pub fn services_for(&self, provider: UserId) -> Result<Vec<Service>> {
        let mut services: Vec<Service> = self.read(KEY_SERVICES)?;
        services.retain(|s| s.provider.id == provider);
        Ok(services)
    }

    /// Fetch a single service by id.
    pub fn service(&self, id: ServiceId) -> Result<Service> {
        self.read::<Service>(KEY_SERVICES)?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::models::Party;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).expect("should open");
        (dir, Store::open(db))
    }

    fn service(provider: &Party, title: &str) -> Service {
        Service {
            id: ServiceId::new(),
            title: title.to_string(),
            description: "desc".to_string(),
            category: "design".to_string(),
            free_offer: false,
            provider: provider.clone(),
        }
    }

    #[test]
    fn provider_filter_preserves_creation_order() {
        let (_dir, store) = open_temp();
        let ana = Party {
            id: UserId::new(),
            name: "ana".to_string(),
            avatar: String::new(),
        };
        let bea = Party {
            id: UserId::new(),
            name: "bea".to_string(),
            avatar: String::new(),
        };

        store.add_service(service(&ana, "logos")).unwrap();
        store.add_service(service(&bea, "copywriting")).unwrap();
        store.add_service(service(&ana, "branding")).unwrap();

        let for_ana = store.services_for(ana.id).unwrap();
        let titles: Vec<&str> = for_ana.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["logos", "branding"]);

        let err = store.service(ServiceId::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
