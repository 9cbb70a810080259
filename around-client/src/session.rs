use crate::models::{Identity, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Состояние сессии: токен, флаг входа, email и профиль.
///
/// Между запусками сохраняется только токен; остальное заново
/// запрашивается после проверки токена.
pub struct Session {
    token: Option<String>,
    is_logged: bool,
    email: String,
    user: Option<User>,
}

impl Session {
    /// Анонимная сессия.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Токен, прочитанный из хранилища или полученный при входе.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Подтверждена ли сессия сервисом авторизации.
    pub fn is_logged(&self) -> bool {
        self.is_logged
    }

    /// Email вошедшего пользователя (пустая строка у анонима).
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Профиль текущего пользователя, если уже загружен.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Идентификатор текущего пользователя, если профиль загружен.
    pub fn current_user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    /// Запоминает токен без признания сессии действительной.
    pub fn restore(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Отмечает сессию подтверждённой. Профиль другого токена или другой
    /// учётной записи сбрасывается.
    pub fn establish(&mut self, token: impl Into<String>, identity: &Identity) {
        let token = token.into();
        let same_token = self.token.as_deref() == Some(token.as_str());
        let same_account = self.current_user_id() == Some(identity.id.as_str());
        if !(same_token && same_account) {
            self.user = None;
        }
        self.token = Some(token);
        self.is_logged = true;
        self.email = identity.email.clone();
    }

    /// Заменяет профиль целиком.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Сбрасывает сессию в анонимное состояние.
    pub fn reset(&mut self) {
        *self = Self::anonymous();
    }
}
