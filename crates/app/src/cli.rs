//! Command-line surface.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use larder_application::forms::RecipeLine;
use larder_domain::{MeasurementUnit, ModelType, SortOption};

/// Larder recipe client.
#[derive(Debug, Parser)]
#[command(name = "larder", version, about = "Track meals, recipes and ratings")]
pub struct Cli {
    /// Override the API base address for this run.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        /// Display name, at least 3 characters
        #[arg(long)]
        username: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Password, at least 6 characters
        #[arg(long)]
        password: String,
        /// Repeat of the password
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Update the signed-in account
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Manage meals
    #[command(subcommand)]
    Meals(MealsCommand),
    /// Manage ingredients
    #[command(subcommand)]
    Ingredients(IngredientsCommand),
    /// Manage recipes
    #[command(subcommand)]
    Recipes(RecipesCommand),
    /// Ask the model for a better version of a recipe
    Optimize {
        /// Recipe to optimize
        recipe_id: i64,
        /// Regression model
        #[arg(long, value_parser = ModelType::from_str)]
        model: Option<ModelType>,
        /// Store the proposal as a new recipe
        #[arg(long)]
        save: bool,
    },
    /// Rank ingredients by their effect on a meal's rating
    Analyze {
        /// Meal to analyze
        meal_id: i64,
        /// Regression model
        #[arg(long, value_parser = ModelType::from_str)]
        model: Option<ModelType>,
    },
    /// Predict the rating of an ingredient list
    Predict {
        /// Meal the ingredients belong to
        meal_id: i64,
        /// Ingredient line as `ID:QUANTITY[:UNIT]`
        #[arg(long = "ingredient", value_parser = parse_line, required = true)]
        ingredients: Vec<RecipeLine>,
        /// Regression model
        #[arg(long, value_parser = ModelType::from_str)]
        model: Option<ModelType>,
    },
    /// Train the model for a meal on its rated recipes
    Train {
        /// Meal to train on
        meal_id: i64,
        /// Regression model
        #[arg(long, value_parser = ModelType::from_str)]
        model: Option<ModelType>,
    },
    /// Manage share links
    #[command(subcommand)]
    Share(ShareCommand),
}

/// `larder profile ...`
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Change username or email
    Update {
        /// New display name
        #[arg(long)]
        username: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
    },
    /// Upload a profile picture
    Image {
        /// Image file
        path: PathBuf,
    },
}

/// Paging flags shared by list commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Items per page
    #[arg(long)]
    pub limit: Option<u32>,
}

/// `larder meals ...`
#[derive(Debug, Subcommand)]
pub enum MealsCommand {
    /// List meals
    List {
        /// Name filter
        #[arg(long)]
        search: Option<String>,
        /// Ordering
        #[arg(long, value_parser = SortOption::from_str)]
        sort: Option<SortOption>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one meal
    Show {
        /// Meal id
        id: i64,
    },
    /// Create a meal
    Add {
        /// Meal name
        name: String,
    },
    /// Rename a meal
    Rename {
        /// Meal id
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a meal and its recipes
    Delete {
        /// Meal id
        id: i64,
    },
}

/// `larder ingredients ...`
#[derive(Debug, Subcommand)]
pub enum IngredientsCommand {
    /// List ingredients
    List {
        /// Name filter
        #[arg(long)]
        search: Option<String>,
        /// Hide other users' public ingredients
        #[arg(long)]
        mine_only: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Create an ingredient
    Add {
        /// Ingredient name
        name: String,
        /// Share with other users
        #[arg(long)]
        public: bool,
    },
    /// Delete an ingredient
    Delete {
        /// Ingredient id
        id: i64,
    },
}

/// `larder recipes ...`
#[derive(Debug, Subcommand)]
pub enum RecipesCommand {
    /// List the recipes of a meal
    List {
        /// Meal id
        meal_id: i64,
        /// Ordering
        #[arg(long, value_parser = SortOption::from_str)]
        sort: Option<SortOption>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one recipe
    Show {
        /// Recipe id
        id: i64,
    },
    /// Record a recipe for a meal
    Add {
        /// Meal id
        meal_id: i64,
        /// Rating between 1 and 10
        #[arg(long, default_value = "5")]
        rating: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Ingredient line as `ID:QUANTITY[:UNIT]`
        #[arg(long = "ingredient", value_parser = parse_line)]
        ingredients: Vec<RecipeLine>,
    },
    /// Change a recorded recipe
    Edit {
        /// Recipe id
        id: i64,
        /// Rating between 1 and 10
        #[arg(long)]
        rating: Option<String>,
        /// Free-form notes; an empty value clears them
        #[arg(long)]
        notes: Option<String>,
        /// Replacement ingredient line as `ID:QUANTITY[:UNIT]`; omit to keep the current lines
        #[arg(long = "ingredient", value_parser = parse_line)]
        ingredients: Vec<RecipeLine>,
    },
    /// Rate a recipe
    Rate {
        /// Recipe id
        id: i64,
        /// Rating between 1 and 10
        rating: f64,
    },
    /// Delete a recipe
    Delete {
        /// Recipe id
        id: i64,
    },
}

/// `larder share ...`
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Create a share link for a recipe
    Create {
        /// Recipe id
        recipe_id: i64,
    },
    /// Open a shared recipe
    Show {
        /// Share token
        token: String,
    },
    /// Revoke a share link
    Revoke {
        /// Share id
        share_id: i64,
    },
}

/// Parses an ingredient line of the form `ID:QUANTITY[:UNIT]`.
///
/// The unit defaults to grams.
///
/// # Errors
///
/// Returns a message naming the malformed part.
pub fn parse_line(input: &str) -> Result<RecipeLine, String> {
    let mut parts = input.splitn(3, ':');
    let (Some(id), Some(quantity)) = (parts.next(), parts.next()) else {
        return Err(format!("expected ID:QUANTITY[:UNIT], got `{input}`"));
    };

    let ingredient_id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid ingredient id `{id}`"))?;
    let quantity = quantity
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid quantity `{quantity}`"))?;
    let unit = match parts.next() {
        Some(unit) => unit.trim().parse::<MeasurementUnit>().map_err(|e| e.to_string())?,
        None => MeasurementUnit::default(),
    };

    Ok(RecipeLine {
        ingredient_id,
        quantity,
        unit,
    })
}
