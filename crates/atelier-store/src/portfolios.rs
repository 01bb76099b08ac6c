//! Accessors for [`Portfolio`] records.

use atelier_shared::constants::KEY_PORTFOLIOS;
use atelier_shared::types::{PortfolioId, UserId};

use crate::error::{Result, StoreError};
use crate::models::Portfolio;
use crate::store::Store;

impl Store {
    /// Persist a new portfolio piece (or replace one with the same id).
    pub fn add_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
        tracing::info!(portfolio = %portfolio.id, creator = %portfolio.creator.id, "portfolio saved");
        self.put(KEY_PORTFOLIOS, portfolio.clone())?;
        Ok(portfolio)
    }

    /// Every user-created portfolio, newest first.
    pub fn portfolios(&self) -> Result<Vec<Portfolio>> {
        let mut portfolios: Vec<Portfolio> = self.read(KEY_PORTFOLIOS)?;
        portfolios.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(portfolios)
    }

    /// Portfolios owned by `creator`, newest first.
    pub fn portfolios_for(&self, creator: UserId) -> Result<Vec<Portfolio>> {
        let mut portfolios = self.portfolios()?;
        portfolios.retain(|p| p.creator.id == creator);
        Ok(portfolios)
    }

    /// Fetch a single portfolio by id.
    pub fn portfolio(&self, id: PortfolioId) -> Result<Portfolio> {
        self.read::<Portfolio>(KEY_PORTFOLIOS)?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::database::Database;
    use crate::models::Party;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).expect("should open");
        (dir, Store::open(db))
    }

    fn portfolio(creator: &Party, title: &str) -> Portfolio {
        Portfolio {
            id: PortfolioId::new(),
            title: title.to_string(),
            category: "design".to_string(),
            description: String::new(),
            image: "data:image/png;base64,AAAA".to_string(),
            creator: creator.clone(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_filter_and_lookup() {
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

        let mine = store.add_portfolio(portfolio(&ana, "posters")).unwrap();
        store.add_portfolio(portfolio(&bea, "logos")).unwrap();

        let for_ana = store.portfolios_for(ana.id).unwrap();
        assert_eq!(for_ana.len(), 1);
        assert_eq!(for_ana[0].id, mine.id);

        assert_eq!(store.portfolio(mine.id).unwrap().title, "posters");
        let err = store.portfolio(PortfolioId::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
