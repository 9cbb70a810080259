use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Профиль текущего пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: String,
    /// Имя.
    pub name: String,
    /// Описание ("о себе").
    pub about: String,
    /// URL аватара.
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Карточка с фотографией.
pub struct Card {
    /// Идентификатор карточки.
    pub id: String,
    /// Подпись.
    pub name: String,
    /// URL изображения.
    pub image_url: String,
    /// Идентификатор автора.
    pub owner_id: String,
    /// Идентификаторы пользователей, поставивших лайк.
    pub likes: BTreeSet<String>,
    /// Время создания (UTC), если сервер его вернул.
    pub created_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Проверяет, стоит ли лайк пользователя `user_id`.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.contains(user_id)
    }

    /// Количество лайков.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Принадлежит ли карточка пользователю `user_id`.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Учётная запись, которую подтверждает сервис авторизации.
pub struct Identity {
    /// Идентификатор пользователя.
    pub id: String,
    /// Email.
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Учётные данные для входа и регистрации.
pub struct Credentials {
    /// Email.
    pub email: String,
    /// Пароль.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Новые имя и описание профиля.
pub struct ProfilePatch {
    /// Имя.
    pub name: String,
    /// Описание.
    pub about: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Новый аватар.
pub struct AvatarPatch {
    /// URL изображения.
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Данные новой карточки.
pub struct NewCard {
    /// Подпись.
    pub name: String,
    /// URL изображения.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Запрос на переключение лайка.
///
/// `is_liked` описывает текущее состояние: `true` означает снятие лайка,
/// `false` — постановку.
pub struct LikeRequest {
    /// Идентификатор карточки.
    pub card_id: String,
    /// Стоит ли сейчас лайк текущего пользователя.
    pub is_liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_likes(likes: &[&str]) -> Card {
        Card {
            id: "c1".to_string(),
            name: "Peaks".to_string(),
            image_url: "https://example.com/peaks.jpg".to_string(),
            owner_id: "owner".to_string(),
            likes: likes.iter().map(|id| id.to_string()).collect(),
            created_at: None,
        }
    }

    #[test]
    fn is_liked_by_scans_like_set() {
        let card = card_with_likes(&["a", "b"]);
        assert!(card.is_liked_by("a"));
        assert!(!card.is_liked_by("c"));
        assert_eq!(card.like_count(), 2);
    }

    #[test]
    fn is_owned_by_compares_owner_id() {
        let card = card_with_likes(&[]);
        assert!(card.is_owned_by("owner"));
        assert!(!card.is_owned_by("someone-else"));
    }
}
