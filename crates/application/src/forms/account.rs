//! Sign-in, registration and profile forms.

use std::sync::LazyLock;

use regex::Regex;

use larder_domain::{LoginCredentials, NewUser, UserUpdate};

use crate::form::{FieldKind, FieldValue, Form, FormError, FormErrors, FormModel};

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

fn looks_like_email(value: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(value))
}

/// Values of the sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Sign-in email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Fields of [`LoginForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    /// `email`
    Email,
    /// `password`
    Password,
}

impl FormModel for LoginForm {
    type Field = LoginField;
    const FIELDS: &'static [LoginField] = &[LoginField::Email, LoginField::Password];

    fn field_name(field: LoginField) -> &'static str {
        match field {
            LoginField::Email => "email",
            LoginField::Password => "password",
        }
    }

    fn field_kind(field: LoginField) -> FieldKind {
        match field {
            LoginField::Email => FieldKind::Email,
            LoginField::Password => FieldKind::Password,
        }
    }

    fn field_value(&self, field: LoginField) -> FieldValue {
        match field {
            LoginField::Email => FieldValue::Text(self.email.clone()),
            LoginField::Password => FieldValue::Text(self.password.clone()),
        }
    }

    fn apply(&mut self, field: LoginField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(Self::field_name(field))?;
        match field {
            LoginField::Email => self.email = text,
            LoginField::Password => self.password = text,
        }
        Ok(())
    }
}

impl LoginForm {
    /// Creates the sign-in form with its validator.
    #[must_use]
    pub fn form() -> Form<Self> {
        Form::with_validator(Self::default(), Self::validate)
    }

    /// Both fields are required.
    #[must_use]
    pub fn validate(&self) -> FormErrors<LoginField> {
        let mut errors = FormErrors::new();
        if self.email.trim().is_empty() {
            errors.insert(LoginField::Email, "Email is required");
        }
        if self.password.is_empty() {
            errors.insert(LoginField::Password, "Password is required");
        }
        errors
    }

    /// Returns the credentials to send to the token endpoint.
    #[must_use]
    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(self.email.trim(), self.password.clone())
    }
}

/// Values of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Display name.
    pub username: String,
    /// Sign-in email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Repeated password.
    pub confirm_password: String,
}

/// Fields of [`RegisterForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterField {
    /// `username`
    Username,
    /// `email`
    Email,
    /// `password`
    Password,
    /// `confirm_password`
    ConfirmPassword,
}

impl FormModel for RegisterForm {
    type Field = RegisterField;
    const FIELDS: &'static [RegisterField] = &[
        RegisterField::Username,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
    ];

    fn field_name(field: RegisterField) -> &'static str {
        match field {
            RegisterField::Username => "username",
            RegisterField::Email => "email",
            RegisterField::Password => "password",
            RegisterField::ConfirmPassword => "confirm_password",
        }
    }

    fn field_kind(field: RegisterField) -> FieldKind {
        match field {
            RegisterField::Username => FieldKind::Text,
            RegisterField::Email => FieldKind::Email,
            RegisterField::Password | RegisterField::ConfirmPassword => FieldKind::Password,
        }
    }

    fn field_value(&self, field: RegisterField) -> FieldValue {
        let text = match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        };
        FieldValue::Text(text.clone())
    }

    fn apply(&mut self, field: RegisterField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(Self::field_name(field))?;
        match field {
            RegisterField::Username => self.username = text,
            RegisterField::Email => self.email = text,
            RegisterField::Password => self.password = text,
            RegisterField::ConfirmPassword => self.confirm_password = text,
        }
        Ok(())
    }
}

impl RegisterForm {
    /// Creates the registration form with its validator.
    #[must_use]
    pub fn form() -> Form<Self> {
        Form::with_validator(Self::default(), Self::validate)
    }

    /// Checks lengths, the email shape and the password confirmation.
    #[must_use]
    pub fn validate(&self) -> FormErrors<RegisterField> {
        let mut errors = FormErrors::new();

        if self.username.is_empty() {
            errors.insert(RegisterField::Username, "Username is required");
        } else if self.username.chars().count() < 3 {
            errors.insert(RegisterField::Username, "Username must be at least 3 characters");
        }

        if self.email.is_empty() {
            errors.insert(RegisterField::Email, "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.insert(RegisterField::Email, "Email address is invalid");
        }

        if self.password.is_empty() {
            errors.insert(RegisterField::Password, "Password is required");
        } else if self.password.chars().count() < 6 {
            errors.insert(RegisterField::Password, "Password must be at least 6 characters");
        }

        if self.password != self.confirm_password {
            errors.insert(RegisterField::ConfirmPassword, "Passwords do not match");
        }

        errors
    }

    /// Returns the registration payload.
    #[must_use]
    pub fn new_user(&self) -> NewUser {
        NewUser {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Values of the profile editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
}

/// Fields of [`ProfileForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    /// `username`
    Username,
    /// `email`
    Email,
}

impl FormModel for ProfileForm {
    type Field = ProfileField;
    const FIELDS: &'static [ProfileField] = &[ProfileField::Username, ProfileField::Email];

    fn field_name(field: ProfileField) -> &'static str {
        match field {
            ProfileField::Username => "username",
            ProfileField::Email => "email",
        }
    }

    fn field_kind(field: ProfileField) -> FieldKind {
        match field {
            ProfileField::Username => FieldKind::Text,
            ProfileField::Email => FieldKind::Email,
        }
    }

    fn field_value(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::Username => FieldValue::Text(self.username.clone()),
            ProfileField::Email => FieldValue::Text(self.email.clone()),
        }
    }

    fn apply(&mut self, field: ProfileField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(Self::field_name(field))?;
        match field {
            ProfileField::Username => self.username = text,
            ProfileField::Email => self.email = text,
        }
        Ok(())
    }
}

impl ProfileForm {
    /// Creates the profile editor prefilled from the current user; it has no validator.
    #[must_use]
    pub fn form(username: impl Into<String>, email: impl Into<String>) -> Form<Self> {
        Form::new(Self {
            username: username.into(),
            email: email.into(),
        })
    }

    /// Returns the update payload; blank fields are left unchanged.
    #[must_use]
    pub fn update(&self) -> UserUpdate {
        let present = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        UserUpdate {
            username: present(&self.username),
            email: present(&self.email),
            password: None,
        }
    }
}
