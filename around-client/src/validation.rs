//! Проверка данных форм до отправки на сервер.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::{AroundClientError, AroundClientResult};
use crate::models::{AvatarPatch, Credentials, NewCard, ProfilePatch};

impl Credentials {
    /// Нормализует email (trim + lowercase) и проверяет, что пароль не пуст.
    pub fn validate(self) -> AroundClientResult<Self> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AroundClientError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

impl ProfilePatch {
    /// Имя 2..40 символов, описание 2..200 символов.
    pub fn validate(self) -> AroundClientResult<Self> {
        let name = text_in_range(&self.name, "name", 2, 40, "must be 2..40 chars")?;
        let about = text_in_range(&self.about, "about", 2, 200, "must be 2..200 chars")?;
        Ok(Self { name, about })
    }
}

impl AvatarPatch {
    /// Аватар должен быть корректным URL.
    pub fn validate(self) -> AroundClientResult<Self> {
        let avatar = normalize_url(&self.avatar, "avatar")?;
        Ok(Self { avatar })
    }
}

impl NewCard {
    /// Подпись 2..30 символов, ссылка на изображение — корректный URL.
    pub fn validate(self) -> AroundClientResult<Self> {
        let name = text_in_range(&self.name, "name", 2, 30, "must be 2..30 chars")?;
        let link = normalize_url(&self.link, "link")?;
        Ok(Self { name, link })
    }
}

fn normalize_email(email: &str) -> AroundClientResult<String> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(AroundClientError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn text_in_range(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
    message: &'static str,
) -> AroundClientResult<String> {
    let value = value.trim();
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AroundClientError::Validation { field, message });
    }
    Ok(value.to_string())
}

fn normalize_url(value: &str, field: &'static str) -> AroundClientResult<String> {
    let value = value.trim().to_string();
    if !value.validate_url() {
        return Err(AroundClientError::Validation {
            field,
            message: "must be a valid url",
        });
    }
    Ok(value)
}
