//! Portfolio commands.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use atelier_shared::types::PortfolioId;
use atelier_shared::ValidationError;
use atelier_store::{Party, Portfolio};

use crate::error::Result;
use crate::events::{notify, Notice};
use crate::state::{lock, SharedState};

/// Form input for a new portfolio piece.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub title: String,
    pub category: String,
    pub description: String,
    /// Uploaded image as a data URL.
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDto {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub creator: Party,
    pub created_at: String,
}

impl From<&Portfolio> for PortfolioDto {
    fn from(p: &Portfolio) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            category: p.category.clone(),
            description: p.description.clone(),
            image: p.image.clone(),
            creator: p.creator.clone(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Publish a portfolio piece.  Title, category and image are required.
pub async fn create_portfolio(state: &SharedState, input: NewPortfolio) -> Result<PortfolioDto> {
    let missing = if input.title.trim().is_empty() {
        Some("title")
    } else if input.category.trim().is_empty() {
        Some("category")
    } else if input.image.is_empty() {
        Some("image")
    } else {
        None
    };
    if let Some(field) = missing {
        let guard = lock(state)?;
        let err = ValidationError::MissingField(field);
        notify(
            guard.notice_tx.as_ref(),
            Notice::error(
                "Error",
                "Please fill in all required fields and upload an image.",
            ),
        );
        return Err(err.into());
    }

    let (latency, creator) = {
        let guard = lock(state)?;
        let user = guard.current_user()?;
        (guard.config.request_latency(), Party::from(user))
    };

    tokio::time::sleep(latency).await;

    let portfolio = Portfolio {
        id: PortfolioId::new(),
        title: input.title.trim().to_string(),
        category: input.category.trim().to_string(),
        description: input.description.trim().to_string(),
        image: input.image,
        creator,
        created_at: Utc::now(),
    };

    let guard = lock(state)?;
    let stored = guard.store.add_portfolio(portfolio)?;

    info!(portfolio = %stored.id, "portfolio published");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success("Portfolio created!", "Your work is now visible to clients."),
    );

    Ok(PortfolioDto::from(&stored))
}

/// Every published portfolio, newest first.
pub fn list_portfolios(state: &SharedState) -> Result<Vec<PortfolioDto>> {
    let guard = lock(state)?;
    let portfolios = guard.store.portfolios()?;
    Ok(portfolios.iter().map(PortfolioDto::from).collect())
}

/// The signed-in user's portfolios, newest first.
pub fn my_portfolios(state: &SharedState) -> Result<Vec<PortfolioDto>> {
    let guard = lock(state)?;
    let user = guard.current_user()?;
    let portfolios = guard.store.portfolios_for(user.id)?;
    Ok(portfolios.iter().map(PortfolioDto::from).collect())
}

/// One portfolio piece; the caller renders not-found on error.
pub fn get_portfolio(state: &SharedState, id: PortfolioId) -> Result<PortfolioDto> {
    let guard = lock(state)?;
    Ok(PortfolioDto::from(&guard.store.portfolio(id)?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use atelier_shared::types::Role;
    use atelier_store::{Database, Store};

    use super::*;
    use crate::commands::auth;
    use crate::config::ClientConfig;
    use crate::state::AppState;
    use crate::ClientError;

    fn test_state(dir: &tempfile::TempDir) -> SharedState {
        let db = Database::open_at(&dir.path().join("test.db")).expect("should open");
        let config = ClientConfig {
            simulated_latency: Duration::from_millis(0),
            ..ClientConfig::default()
        };
        AppState::new(Arc::new(Store::open(db)), config).shared()
    }

    fn input(title: &str) -> NewPortfolio {
        NewPortfolio {
            title: title.to_string(),
            category: "design".to_string(),
            description: "desc".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[tokio::test]
    async fn published_work_is_owned_by_the_session_user() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let me = auth::sign_up(&state, "Ana", "ana@example.com", "pw", Role::Creator)
            .await
            .unwrap();

        let piece = create_portfolio(&state, input("Posters")).await.unwrap();
        assert_eq!(piece.creator.id.to_string(), me.id);

        assert_eq!(my_portfolios(&state).unwrap().len(), 1);
        assert_eq!(list_portfolios(&state).unwrap().len(), 1);
        assert_eq!(
            get_portfolio(&state, PortfolioId::parse(&piece.id).unwrap())
                .unwrap()
                .title,
            "Posters"
        );
    }

    #[tokio::test]
    async fn missing_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        auth::sign_up(&state, "Ana", "ana@example.com", "pw", Role::Creator)
            .await
            .unwrap();

        let mut bad = input("Posters");
        bad.image = String::new();
        let err = create_portfolio(&state, bad).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(list_portfolios(&state).unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_portfolio_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let err = get_portfolio(&state, PortfolioId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
