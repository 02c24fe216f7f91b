//! Form models for every data-entry screen, with their validators.

mod account;
mod ingredient;
mod meal;
mod recipe;

pub use account::{LoginField, LoginForm, ProfileField, ProfileForm, RegisterField, RegisterForm};
pub use ingredient::{IngredientField, IngredientForm};
pub use meal::{MealField, MealForm};
pub use recipe::{RecipeField, RecipeForm, RecipeLine};
