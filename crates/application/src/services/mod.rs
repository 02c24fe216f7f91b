//! Domain Service Adapters
//!
//! Each adapter translates typed calls into one request against the backend
//! and decodes the response. Adapters hold no state of their own and never
//! retry.

mod auth;
mod ingredients;
mod meals;
mod ml;
mod recipes;
mod social;

use std::sync::Arc;

pub use auth::AuthService;
pub use ingredients::IngredientService;
pub use meals::MealService;
pub use ml::MlService;
pub use recipes::RecipeService;
pub use social::SocialService;

use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;
use crate::session::SessionContext;

/// Hands out every adapter over one shared client.
#[derive(Debug)]
pub struct LarderApi<T> {
    client: Arc<ApiClient<T>>,
}

impl<T> Clone for LarderApi<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: HttpTransport> LarderApi<T> {
    /// Wraps a client.
    #[must_use]
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Returns the session shared by all adapters.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Account and profile operations.
    #[must_use]
    pub fn auth(&self) -> AuthService<T> {
        AuthService::new(Arc::clone(&self.client))
    }

    /// Meal operations.
    #[must_use]
    pub fn meals(&self) -> MealService<T> {
        MealService::new(Arc::clone(&self.client))
    }

    /// Recipe operations.
    #[must_use]
    pub fn recipes(&self) -> RecipeService<T> {
        RecipeService::new(Arc::clone(&self.client))
    }

    /// Ingredient operations.
    #[must_use]
    pub fn ingredients(&self) -> IngredientService<T> {
        IngredientService::new(Arc::clone(&self.client))
    }

    /// Optimization and analysis operations.
    #[must_use]
    pub fn ml(&self) -> MlService<T> {
        MlService::new(Arc::clone(&self.client))
    }

    /// Share link operations.
    #[must_use]
    pub fn social(&self) -> SocialService<T> {
        SocialService::new(Arc::clone(&self.client))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
pub(crate) fn scripted_api() -> (LarderApi<crate::pipeline::testing::ScriptedTransport>, crate::pipeline::testing::ScriptedTransport) {
    let transport = crate::pipeline::testing::ScriptedTransport::new();
    let client = ApiClient::new(
        transport.clone(),
        SessionContext::in_memory(),
        &larder_domain::ClientSettings::default(),
    );
    (LarderApi::new(client), transport)
}
