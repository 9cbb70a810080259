//! Порты, через которые состояние клиента общается с внешним миром.
//!
//! Трейты объявлены как `?Send`: в браузере futures от `fetch` не `Send`,
//! а вся работа клиента идёт в одном логическом потоке.

use async_trait::async_trait;

use crate::error::AroundClientResult;
use crate::models::{
    AvatarPatch, Card, Credentials, Identity, LikeRequest, NewCard, ProfilePatch, User,
};

#[async_trait(?Send)]
/// Сервис профиля и карточек. Все вызовы требуют bearer-токен.
pub trait ProfileApi {
    /// Профиль текущего пользователя.
    async fn get_user_info(&self, token: &str) -> AroundClientResult<User>;
    /// Обновляет имя и описание, возвращает профиль целиком.
    async fn update_user(&self, token: &str, patch: &ProfilePatch) -> AroundClientResult<User>;
    /// Обновляет аватар, возвращает профиль целиком.
    async fn update_avatar(&self, token: &str, patch: &AvatarPatch) -> AroundClientResult<User>;
    /// Начальный список карточек.
    async fn get_initial_cards(&self, token: &str) -> AroundClientResult<Vec<Card>>;
    /// Создаёт карточку.
    async fn add_card(&self, token: &str, card: &NewCard) -> AroundClientResult<Card>;
    /// Удаляет карточку.
    async fn delete_card(&self, token: &str, card_id: &str) -> AroundClientResult<()>;
    /// Ставит лайк, если `is_liked == false`, иначе снимает. Возвращает карточку
    /// в представлении сервера.
    async fn like_card(&self, token: &str, request: &LikeRequest) -> AroundClientResult<Card>;
}

#[async_trait(?Send)]
/// Сервис авторизации.
pub trait AuthApi {
    /// Обменивает учётные данные на токен.
    async fn login(&self, credentials: &Credentials) -> AroundClientResult<String>;
    /// Регистрирует пользователя.
    async fn register(&self, credentials: &Credentials) -> AroundClientResult<Identity>;
    /// Проверяет токен и возвращает его владельца.
    async fn get_user_token(&self, token: &str) -> AroundClientResult<Identity>;
}

/// Долговременное хранилище bearer-токена (один ключ).
pub trait TokenStore {
    /// Читает токен; пустое значение считается отсутствующим.
    fn load(&self) -> AroundClientResult<Option<String>>;
    /// Сохраняет токен.
    fn save(&self, token: &str) -> AroundClientResult<()>;
    /// Удаляет токен.
    fn clear(&self) -> AroundClientResult<()>;
}
