//! Command handlers.
//!
//! Each handler drives the same form or service adapter a screen would,
//! and prints a short plain-text result.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use larder_application::forms::{
    IngredientField, IngredientForm, LoginField, LoginForm, MealField, MealForm, ProfileField,
    ProfileForm, RecipeField, RecipeForm, RecipeLine, RegisterField, RegisterForm,
};
use larder_application::ports::{HttpTransport, TransportError};
use larder_application::{
    ApplicationError, FormErrors, FormModel, LarderApi, RawInput, SubmitOutcome,
};
use larder_domain::{
    ApiError, Ingredient, IngredientQuery, Meal, MealQuery, ModelType, Page, Recipe,
    RecipeDraft, RecipeIngredientDraft,
};
use larder_infrastructure::SettingsError;

use crate::cli::{
    Command, IngredientsCommand, MealsCommand, PageArgs, ProfileCommand, RecipesCommand,
    ShareCommand,
};

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// A use case failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The input did not pass form validation.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Settings could not be resolved.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The HTTP transport could not be created.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Output or a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        Self::Application(error.into())
    }
}

impl From<larder_application::form::FormError> for CliError {
    fn from(error: larder_application::form::FormError) -> Self {
        Self::Application(error.into())
    }
}

/// Result type for command handlers.
pub type CliResult<T = ()> = Result<T, CliError>;

/// Runs one command against the API.
///
/// # Errors
///
/// Returns an error if validation, the backend call or output fails.
pub async fn run<T, W>(api: &LarderApi<T>, command: Command, out: &mut W) -> CliResult
where
    T: HttpTransport,
    W: Write,
{
    match command {
        Command::Login { email, password } => login(api, &email, &password, out).await,
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm::form();
            form.set_field(RegisterField::Username, &RawInput::text(username))?;
            form.set_field(RegisterField::Email, &RawInput::text(email))?;
            form.set_field(RegisterField::Password, &RawInput::text(password))?;
            form.set_field(RegisterField::ConfirmPassword, &RawInput::text(confirm_password))?;

            let mut created = None;
            let slot = &mut created;
            let outcome = form
                .submit(|values| async move {
                    *slot = Some(api.auth().register(&values.new_user()).await?);
                    Ok::<_, ApiError>(())
                })
                .await;
            settle::<RegisterForm>(outcome)?;
            if let Some(user) = created {
                writeln!(out, "Registered {} <{}>. Sign in with `larder login`.", user.username, user.email)?;
            }
            Ok(())
        }
        Command::Logout => {
            if api.auth().logout().await {
                writeln!(out, "Signed out.")?;
            } else {
                writeln!(out, "Not signed in.")?;
            }
            Ok(())
        }
        Command::Whoami => {
            require_session(api).await?;
            let user = api.auth().current_user().await?;
            writeln!(out, "{} <{}> (id {})", user.username, user.email, user.id)?;
            Ok(())
        }
        Command::Profile(command) => profile(api, command, out).await,
        Command::Meals(command) => meals(api, command, out).await,
        Command::Ingredients(command) => ingredients(api, command, out).await,
        Command::Recipes(command) => recipes(api, command, out).await,
        Command::Optimize {
            recipe_id,
            model,
            save,
        } => optimize(api, recipe_id, model, save, out).await,
        Command::Analyze { meal_id, model } => {
            let report = api.ml().analyze_ingredients(meal_id, model).await?;
            if report.influences.is_empty() {
                writeln!(out, "Not enough rated recipes to analyze.")?;
            }
            for entry in report.ranked() {
                writeln!(
                    out,
                    "{:>+8.3}  {} ({})",
                    entry.influence, entry.ingredient_name, entry.unit
                )?;
            }
            Ok(())
        }
        Command::Predict {
            meal_id,
            ingredients,
            model,
        } => {
            let lines: Vec<RecipeIngredientDraft> = ingredients.into_iter().map(Into::into).collect();
            let prediction = api.ml().predict_rating(&lines, meal_id, model).await?;
            writeln!(out, "Predicted rating: {:.1}", prediction.predicted_rating)?;
            Ok(())
        }
        Command::Train { meal_id, model } => {
            let report = api.ml().train_model(meal_id, model).await?;
            let verdict = if report.success { "trained" } else { "not trained" };
            writeln!(out, "Model {} {verdict}: {}", report.model_type, report.metrics)?;
            Ok(())
        }
        Command::Share(command) => share(api, command, out).await,
    }
}

async fn login<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    email: &str,
    password: &str,
    out: &mut W,
) -> CliResult {
    let form = LoginForm::form();
    form.set_field(LoginField::Email, &RawInput::text(email))?;
    form.set_field(LoginField::Password, &RawInput::text(password))?;

    let outcome = form
        .submit(|values| async move { api.auth().login(&values.credentials()).await })
        .await;
    settle::<LoginForm>(outcome)?;

    info!("Signed in");
    writeln!(out, "Signed in as {}.", email.trim())?;
    Ok(())
}

async fn profile<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    command: ProfileCommand,
    out: &mut W,
) -> CliResult {
    require_session(api).await?;
    match command {
        ProfileCommand::Update { username, email } => {
            let current = api.auth().current_user().await?;
            let form = ProfileForm::form(current.username, current.email);
            if let Some(username) = username {
                form.set_field(ProfileField::Username, &RawInput::text(username))?;
            }
            if let Some(email) = email {
                form.set_field(ProfileField::Email, &RawInput::text(email))?;
            }

            let mut updated = None;
            let slot = &mut updated;
            let outcome = form
                .submit(|values| async move {
                    *slot = Some(api.auth().update_profile(&values.update()).await?);
                    Ok::<_, ApiError>(())
                })
                .await;
            settle::<ProfileForm>(outcome)?;
            if let Some(user) = updated {
                writeln!(out, "Profile updated: {} <{}>", user.username, user.email)?;
            }
        }
        ProfileCommand::Image { path } => {
            let content = tokio::fs::read(&path).await?;
            let url = api
                .auth()
                .upload_profile_image(&file_name(&path), content)
                .await?;
            writeln!(out, "Profile image: {url}")?;
        }
    }
    Ok(())
}

async fn meals<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    command: MealsCommand,
    out: &mut W,
) -> CliResult {
    match command {
        MealsCommand::List { search, sort, page } => {
            let query = MealQuery {
                search,
                sort,
                page: page_of(page, Page::DEFAULT_LIMIT),
            };
            let meals = api.meals().list(&query).await?;
            if meals.is_empty() {
                writeln!(out, "No meals found.")?;
            }
            for meal in &meals {
                writeln!(out, "{}", describe_meal(meal))?;
            }
        }
        MealsCommand::Show { id } => {
            let meal = api.meals().get(id).await?;
            writeln!(out, "{}", describe_meal(&meal))?;
        }
        MealsCommand::Add { name } => {
            let meal = submit_meal(api, None, name).await?;
            writeln!(out, "Created meal {}: {}", meal.id, meal.name)?;
        }
        MealsCommand::Rename { id, name } => {
            let meal = submit_meal(api, Some(id), name).await?;
            writeln!(out, "Renamed meal {} to {}", meal.id, meal.name)?;
        }
        MealsCommand::Delete { id } => {
            api.meals().delete(id).await?;
            writeln!(out, "Deleted meal {id}.")?;
        }
    }
    Ok(())
}

async fn submit_meal<T: HttpTransport>(
    api: &LarderApi<T>,
    id: Option<i64>,
    name: String,
) -> CliResult<Meal> {
    let form = MealForm::form("");
    form.set_field(MealField::Name, &RawInput::text(name))?;

    let mut saved = None;
    let slot = &mut saved;
    let outcome = form
        .submit(|values| async move {
            let draft = values.draft();
            let meal = match id {
                Some(id) => api.meals().update(id, &draft).await?,
                None => api.meals().create(&draft).await?,
            };
            *slot = Some(meal);
            Ok::<_, ApiError>(())
        })
        .await;
    settle::<MealForm>(outcome)?;
    saved.ok_or_else(|| CliError::Invalid("meal was not saved".to_string()))
}

async fn ingredients<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    command: IngredientsCommand,
    out: &mut W,
) -> CliResult {
    match command {
        IngredientsCommand::List {
            search,
            mine_only,
            page,
        } => {
            let query = IngredientQuery {
                search,
                include_public: !mine_only,
                page: page_of(page, Page::INGREDIENT_LIMIT),
            };
            let ingredients = api.ingredients().list(&query).await?;
            if ingredients.is_empty() {
                writeln!(out, "No ingredients found.")?;
            }
            for ingredient in &ingredients {
                writeln!(out, "{}", describe_ingredient(ingredient))?;
            }
        }
        IngredientsCommand::Add { name, public } => {
            let form = IngredientForm::form();
            form.set_field(IngredientField::Name, &RawInput::text(name))?;
            form.set_field(IngredientField::IsPublic, &RawInput::checkbox(public))?;

            let mut created = None;
            let slot = &mut created;
            let outcome = form
                .submit(|values| async move {
                    *slot = Some(api.ingredients().create(&values.draft()).await?);
                    Ok::<_, ApiError>(())
                })
                .await;
            settle::<IngredientForm>(outcome)?;
            if let Some(ingredient) = created {
                writeln!(out, "Created {}", describe_ingredient(&ingredient))?;
            }
        }
        IngredientsCommand::Delete { id } => {
            api.ingredients().delete(id).await?;
            writeln!(out, "Deleted ingredient {id}.")?;
        }
    }
    Ok(())
}

async fn recipes<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    command: RecipesCommand,
    out: &mut W,
) -> CliResult {
    match command {
        RecipesCommand::List {
            meal_id,
            sort,
            page,
        } => {
            let recipes = api
                .recipes()
                .list_by_meal(meal_id, sort, page_of(page, Page::DEFAULT_LIMIT))
                .await?;
            if recipes.is_empty() {
                writeln!(out, "No recipes recorded for meal {meal_id}.")?;
            }
            for recipe in &recipes {
                writeln!(out, "{}", describe_recipe(recipe))?;
            }
        }
        RecipesCommand::Show { id } => {
            let recipe = api.recipes().get(id).await?;
            write!(out, "{}", describe_recipe_lines(&recipe))?;
        }
        RecipesCommand::Add {
            meal_id,
            rating,
            notes,
            ingredients,
        } => {
            let recipe = submit_recipe(api, meal_id, &rating, notes, ingredients).await?;
            writeln!(out, "Recorded {}", describe_recipe(&recipe))?;
        }
        RecipesCommand::Edit {
            id,
            rating,
            notes,
            ingredients,
        } => {
            let recipe = edit_recipe(api, id, rating, notes, ingredients).await?;
            writeln!(out, "Updated {}", describe_recipe(&recipe))?;
        }
        RecipesCommand::Rate { id, rating } => {
            let recipe = api.recipes().rate(id, rating).await?;
            writeln!(out, "Rated {}", describe_recipe(&recipe))?;
        }
        RecipesCommand::Delete { id } => {
            api.recipes().delete(id).await?;
            writeln!(out, "Deleted recipe {id}.")?;
        }
    }
    Ok(())
}

async fn submit_recipe<T: HttpTransport>(
    api: &LarderApi<T>,
    meal_id: i64,
    rating: &str,
    notes: String,
    lines: Vec<RecipeLine>,
) -> CliResult<Recipe> {
    let form = RecipeForm::form(meal_id);
    form.set_field(RecipeField::Rating, &RawInput::text(rating))?;
    form.set_field(RecipeField::Notes, &RawInput::text(notes))?;
    let mut values = form.values();
    values.ingredients = lines;
    form.set_values(values);

    let mut created = None;
    let slot = &mut created;
    let outcome = form
        .submit(|values| async move {
            *slot = Some(api.recipes().create(&values.draft()).await?);
            Ok::<_, ApiError>(())
        })
        .await;
    settle::<RecipeForm>(outcome)?;
    created.ok_or_else(|| CliError::Invalid("recipe was not saved".to_string()))
}

async fn edit_recipe<T: HttpTransport>(
    api: &LarderApi<T>,
    id: i64,
    rating: Option<String>,
    notes: Option<String>,
    lines: Vec<RecipeLine>,
) -> CliResult<Recipe> {
    let current = api.recipes().get(id).await?;
    let form = RecipeForm::edit(&current);
    if let Some(rating) = rating {
        form.set_field(RecipeField::Rating, &RawInput::text(rating))?;
    }
    if let Some(notes) = notes {
        form.set_field(RecipeField::Notes, &RawInput::text(notes))?;
    }
    if !lines.is_empty() {
        let mut values = form.values();
        values.ingredients = lines;
        form.set_values(values);
    }

    let mut updated = None;
    let slot = &mut updated;
    let outcome = form
        .submit(|values| async move {
            *slot = Some(api.recipes().update(id, &values.update()).await?);
            Ok::<_, ApiError>(())
        })
        .await;
    settle::<RecipeForm>(outcome)?;
    updated.ok_or_else(|| CliError::Invalid("recipe was not saved".to_string()))
}

async fn optimize<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    recipe_id: i64,
    model: Option<ModelType>,
    save: bool,
    out: &mut W,
) -> CliResult {
    let proposal = api.ml().optimize_recipe(recipe_id, model).await?;
    writeln!(
        out,
        "Predicted rating {:.1} (confidence {:.0}%)",
        proposal.predicted_rating,
        proposal.confidence * 100.0
    )?;
    for line in &proposal.optimized_ingredients {
        writeln!(
            out,
            "  {} {} {}",
            line.quantity,
            line.unit,
            display_name(&line.ingredient_name, line.ingredient_id)
        )?;
    }

    if save {
        let original = api.recipes().get(recipe_id).await?;
        let draft = RecipeDraft {
            meal_id: original.meal_id,
            ingredients: proposal
                .optimized_ingredients
                .iter()
                .map(|line| line.to_draft())
                .collect(),
            rating: proposal.predicted_rating,
            notes: Some(format!("Optimized from recipe {recipe_id}")),
        };
        let saved = api.ml().save_optimized_recipe(&draft).await?;
        writeln!(out, "Saved as recipe {}.", saved.recipe_id)?;
    }
    Ok(())
}

async fn share<T: HttpTransport, W: Write>(
    api: &LarderApi<T>,
    command: ShareCommand,
    out: &mut W,
) -> CliResult {
    match command {
        ShareCommand::Create { recipe_id } => {
            let link = api.social().create_share_link(recipe_id).await?;
            writeln!(out, "Share token: {}", link.share_token)?;
        }
        ShareCommand::Show { token } => {
            let shared = api.social().shared_recipe(&token).await?;
            writeln!(out, "{} shared by {}", shared.meal_name, shared.shared_by)?;
            write!(out, "{}", describe_recipe_lines(&shared.recipe))?;
        }
        ShareCommand::Revoke { share_id } => {
            api.social().delete_share_link(share_id).await?;
            writeln!(out, "Revoked share {share_id}.")?;
        }
    }
    Ok(())
}

async fn require_session<T: HttpTransport>(api: &LarderApi<T>) -> CliResult {
    if api.session().is_authenticated().await {
        Ok(())
    } else {
        Err(ApplicationError::NotSignedIn.into())
    }
}

/// Maps a submit outcome onto the command result.
fn settle<M: FormModel>(outcome: SubmitOutcome<M::Field, ApiError>) -> CliResult {
    match outcome {
        SubmitOutcome::Submitted => Ok(()),
        SubmitOutcome::Invalid(errors) => Err(CliError::Invalid(describe_errors::<M>(&errors))),
        SubmitOutcome::Failed(error) => Err(error.into()),
        SubmitOutcome::Busy => Err(CliError::Invalid(
            "a submission is already in progress".to_string(),
        )),
    }
}

/// Renders errors as `field: message` pairs in field order.
fn describe_errors<M: FormModel>(errors: &FormErrors<M::Field>) -> String {
    let mut text = String::new();
    for (field, message) in errors.iter() {
        if !text.is_empty() {
            text.push_str("; ");
        }
        let _ = write!(text, "{}: {message}", M::field_name(field));
    }
    text
}

fn page_of(args: PageArgs, default_limit: u32) -> Page {
    Page::new(args.page, args.limit.unwrap_or(default_limit))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned())
}

fn display_name(name: &str, id: i64) -> String {
    if name.is_empty() {
        format!("ingredient #{id}")
    } else {
        name.to_string()
    }
}

fn describe_meal(meal: &Meal) -> String {
    let rating = meal
        .average_rating
        .map_or_else(|| "unrated".to_string(), |r| format!("avg {r:.1}"));
    format!(
        "#{} {} ({} recipes, {rating})",
        meal.id, meal.name, meal.recipe_count
    )
}

fn describe_ingredient(ingredient: &Ingredient) -> String {
    let visibility = if ingredient.is_public { "public" } else { "private" };
    format!("#{} {} [{visibility}]", ingredient.id, ingredient.name)
}

fn describe_recipe(recipe: &Recipe) -> String {
    let origin = if recipe.is_ai_generated { ", optimized" } else { "" };
    format!(
        "#{} meal {} rated {:.1} ({} ingredients{origin})",
        recipe.id,
        recipe.meal_id,
        recipe.rating,
        recipe.ingredients.len()
    )
}

fn describe_recipe_lines(recipe: &Recipe) -> String {
    let mut text = format!("{}\n", describe_recipe(recipe));
    for line in &recipe.ingredients {
        let _ = writeln!(
            text,
            "  {} {} {}",
            line.quantity,
            line.unit,
            display_name(&line.ingredient_name, line.ingredient_id)
        );
    }
    if let Some(notes) = recipe.notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(text, "  notes: {notes}");
    }
    text
}
