//! JSON-представление ответов сервисов.
//!
//! Общие для HTTP-клиента на `reqwest` и браузерного клиента на `fetch`.

use serde::Deserialize;

use crate::models::{Card, Identity, User};

#[derive(Debug, Deserialize)]
/// Тело ответа с ошибкой.
pub struct ErrorResponseDto {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorResponseDto {
    /// Текст ошибки, если сервер его прислал.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[derive(Debug, Deserialize)]
/// Ответ на вход.
pub struct TokenDto {
    token: String,
}

impl TokenDto {
    /// Выданный токен.
    pub fn into_token(self) -> String {
        self.token
    }
}

#[derive(Debug, Deserialize)]
/// Профиль пользователя.
pub struct UserDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    about: String,
    avatar: String,
}

#[derive(Debug, Deserialize)]
/// Учётная запись из сервиса авторизации.
pub struct IdentityDto {
    #[serde(rename = "_id")]
    id: String,
    email: String,
}

/// Ссылка на пользователя: сервер отдаёт либо строку id, либо объект с `_id`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdRefDto {
    Id(String),
    Object {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl IdRefDto {
    fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
/// Карточка.
pub struct CardDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    link: String,
    owner: IdRefDto,
    #[serde(default)]
    likes: Vec<IdRefDto>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Сервис авторизации иногда заворачивает ответ в `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeDto<T> {
    /// `{"data": ...}`
    Wrapped {
        /// Полезная нагрузка.
        data: T,
    },
    /// Ответ без обёртки.
    Bare(T),
}

impl<T> EnvelopeDto<T> {
    /// Содержимое независимо от обёртки.
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            about: value.about,
            avatar_url: value.avatar,
        }
    }
}

impl From<IdentityDto> for Identity {
    fn from(value: IdentityDto) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

impl From<CardDto> for Card {
    fn from(value: CardDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image_url: value.link,
            owner_id: value.owner.into_id(),
            likes: value.likes.into_iter().map(IdRefDto::into_id).collect(),
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_dto_accepts_populated_and_plain_references() {
        let raw = r#"{
            "_id": "c1",
            "name": "Peaks",
            "link": "https://example.com/peaks.jpg",
            "owner": {"_id": "u1", "name": "Jacques"},
            "likes": ["u2", {"_id": "u3", "name": "Anna"}],
            "createdAt": "2026-01-01T00:00:00.000Z"
        }"#;
        let dto: CardDto = serde_json::from_str(raw).expect("card must parse");
        let card = Card::from(dto);

        assert_eq!(card.id, "c1");
        assert_eq!(card.image_url, "https://example.com/peaks.jpg");
        assert_eq!(card.owner_id, "u1");
        assert!(card.is_liked_by("u2"));
        assert!(card.is_liked_by("u3"));
        assert!(card.created_at.is_some());
    }

    #[test]
    fn card_dto_defaults_missing_likes() {
        let raw = r#"{"_id":"c2","name":"Lake","link":"http://x","owner":"u1"}"#;
        let card = Card::from(serde_json::from_str::<CardDto>(raw).expect("card must parse"));
        assert!(card.likes.is_empty());
        assert!(card.created_at.is_none());
    }

    #[test]
    fn identity_envelope_accepts_wrapped_and_bare() {
        let wrapped: EnvelopeDto<IdentityDto> =
            serde_json::from_str(r#"{"data":{"_id":"u1","email":"a@b.c"}}"#)
                .expect("wrapped must parse");
        let bare: EnvelopeDto<IdentityDto> =
            serde_json::from_str(r#"{"_id":"u1","email":"a@b.c"}"#).expect("bare must parse");

        let wrapped = Identity::from(wrapped.into_inner());
        let bare = Identity::from(bare.into_inner());
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.email, "a@b.c");
    }

    #[test]
    fn user_dto_maps_avatar_url() {
        let raw = r#"{"_id":"u1","name":"Jacques","about":"Explorer","avatar":"https://example.com/a.png","cohort":"x"}"#;
        let user = User::from(serde_json::from_str::<UserDto>(raw).expect("user must parse"));
        assert_eq!(user.avatar_url, "https://example.com/a.png");
    }

    #[test]
    fn error_body_prefers_message_field() {
        let body: ErrorResponseDto =
            serde_json::from_str(r#"{"message":"bad link","error":"Bad Request"}"#)
                .expect("error must parse");
        assert_eq!(body.into_message().as_deref(), Some("bad link"));
    }
}
