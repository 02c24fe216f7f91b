//! Larder Domain - Core business types
//!
//! This crate defines the domain model for the Larder recipe client.
//! All types here are pure Rust with no I/O dependencies.

pub mod api_error;
pub mod error;
pub mod ingredient;
pub mod meal;
pub mod ml;
pub mod pagination;
pub mod recipe;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;
pub mod share;
pub mod sort;
pub mod timestamp;
pub mod user;

pub use api_error::{ApiError, ApiErrorKind};
pub use error::{DomainError, DomainResult};
pub use ingredient::{Ingredient, IngredientDraft, IngredientQuery};
pub use meal::{Meal, MealDraft, MealQuery};
pub use ml::{
    IngredientInfluence, InfluenceReport, ModelType, OptimizedRecipe, RatingPrediction,
    SavedOptimization, TrainingReport,
};
pub use pagination::Page;
pub use recipe::{
    MeasurementUnit, Recipe, RecipeDraft, RecipeIngredient, RecipeIngredientDraft, RecipeUpdate,
};
pub use request::{ApiRequest, HttpMethod, RequestBody};
pub use response::ApiResponse;
pub use session::{Credential, SessionEvent, SessionState};
pub use settings::{ClientSettings, DEFAULT_API_URL, DEFAULT_SIGN_IN_PATH, DEFAULT_TIMEOUT_MS};
pub use share::{ShareLink, SharedRecipe};
pub use sort::SortOption;
pub use user::{AccessToken, LoginCredentials, NewUser, ProfileImage, User, UserUpdate};
