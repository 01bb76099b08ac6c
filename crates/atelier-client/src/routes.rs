//! Path → view mapping for the routing collaborator.
//!
//! The shell resolves every navigation through [`Route::parse`] and then
//! [`Route::gate`]: protected views require a session and fall back to
//! the sign-in view otherwise.  Unknown paths and malformed ids resolve
//! to the not-found view.

use atelier_shared::types::{ConversationId, OrderId, PortfolioId, ServiceId, UserId};

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Auth,
    Portfolios,
    PortfolioDetail(PortfolioId),
    CreatePortfolio,
    Services,
    ServiceDetail(ServiceId),
    Profile(UserId),
    Messages,
    Conversation(ConversationId),
    Dashboard,
    Hire(UserId),
    Payment(OrderId),
    WriteReview(ServiceId),
    NotFound(String),
}

impl Route {
    /// Parse a URL path into a route.  Trailing slashes are tolerated;
    /// anything unrecognized (including a malformed id) is `NotFound`.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["auth"] => Route::Auth,
            ["portfolios"] => Route::Portfolios,
            ["portfolio", id] => match PortfolioId::parse(id) {
                Ok(id) => Route::PortfolioDetail(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["create-portfolio"] => Route::CreatePortfolio,
            ["services"] => Route::Services,
            ["service", id] => match ServiceId::parse(id) {
                Ok(id) => Route::ServiceDetail(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["profile", id] => match UserId::parse(id) {
                Ok(id) => Route::Profile(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["messages"] => Route::Messages,
            ["conversation", id] => match ConversationId::parse(id) {
                Ok(id) => Route::Conversation(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["dashboard"] => Route::Dashboard,
            ["hire", id] => match UserId::parse(id) {
                Ok(id) => Route::Hire(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["payment", id] => match OrderId::parse(id) {
                Ok(id) => Route::Payment(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["write-review", id] => match ServiceId::parse(id) {
                Ok(id) => Route::WriteReview(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Whether this view needs a signed-in session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::CreatePortfolio
                | Route::Messages
                | Route::Conversation(_)
                | Route::Dashboard
                | Route::Hire(_)
                | Route::Payment(_)
                | Route::WriteReview(_)
        )
    }

    /// Apply the authentication gate: a protected route without a session
    /// resolves to the sign-in view.
    pub fn gate(self, authenticated: bool) -> Route {
        if self.requires_auth() && !authenticated {
            Route::Auth
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/portfolios/"), Route::Portfolios);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
    }

    #[test]
    fn parameterized_routes_carry_their_id() {
        let id = UserId::new();
        assert_eq!(Route::parse(&format!("/hire/{id}")), Route::Hire(id));
        assert_eq!(Route::parse(&format!("/profile/{id}")), Route::Profile(id));

        let order = OrderId::new();
        assert_eq!(
            Route::parse(&format!("/payment/{order}")),
            Route::Payment(order)
        );
    }

    #[test]
    fn malformed_ids_and_unknown_paths_fall_through() {
        assert!(matches!(
            Route::parse("/portfolio/not-a-uuid"),
            Route::NotFound(_)
        ));
        assert!(matches!(Route::parse("/no/such/page"), Route::NotFound(_)));
    }

    #[test]
    fn auth_gate_redirects_protected_views() {
        let id = ConversationId::new();
        assert_eq!(Route::Conversation(id).gate(false), Route::Auth);
        assert_eq!(Route::Conversation(id).gate(true), Route::Conversation(id));
        assert_eq!(Route::Services.gate(false), Route::Services);
    }
}
