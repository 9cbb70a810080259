//! Канал отказов: каждая неудачная операция попадает сюда и в лог.

use std::fmt::Display;

use crate::error::{AroundClientError, FailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Операция клиента, в которой произошёл отказ.
pub enum Operation {
    /// Проверка токена.
    CheckToken,
    /// Вход.
    Login,
    /// Регистрация.
    Register,
    /// Выход.
    Logout,
    /// Загрузка профиля.
    LoadUser,
    /// Загрузка карточек.
    LoadCards,
    /// Обновление профиля.
    UpdateProfile,
    /// Обновление аватара.
    UpdateAvatar,
    /// Добавление карточки.
    AddCard,
    /// Удаление карточки.
    DeleteCard,
    /// Переключение лайка.
    ToggleLike,
}

impl Operation {
    /// Короткое имя для логов.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckToken => "check_token",
            Self::Login => "login",
            Self::Register => "register",
            Self::Logout => "logout",
            Self::LoadUser => "load_user",
            Self::LoadCards => "load_cards",
            Self::UpdateProfile => "update_profile",
            Self::UpdateAvatar => "update_avatar",
            Self::AddCard => "add_card",
            Self::DeleteCard => "delete_card",
            Self::ToggleLike => "toggle_like",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Запись об отказе.
pub struct Failure {
    /// Операция.
    pub operation: Operation,
    /// Категория ошибки.
    pub kind: FailureKind,
    /// Текст ошибки.
    pub message: String,
}

/// Сколько последних отказов хранит журнал по умолчанию.
pub const FAILURE_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
/// Накопитель отказов. Хост сам решает, показывать ли их пользователю.
///
/// Хранит не больше `capacity` последних записей, более старые вытесняются.
pub struct FailureLog {
    entries: Vec<Failure>,
    capacity: usize,
}

impl Default for FailureLog {
    fn default() -> Self {
        Self::with_capacity(FAILURE_LOG_CAPACITY)
    }
}

impl FailureLog {
    /// Пустой журнал на [`FAILURE_LOG_CAPACITY`] записей.
    pub fn new() -> Self {
        Self::default()
    }

    /// Пустой журнал на `capacity` записей (не меньше одной).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Записывает отказ и пишет предупреждение в лог.
    pub fn record(&mut self, operation: Operation, err: &AroundClientError) -> &Failure {
        let kind = err.kind();
        tracing::warn!(operation = %operation, kind = ?kind, error = %err, "operation failed");
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(Failure {
            operation,
            kind,
            message: err.to_string(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Последний отказ.
    pub fn last(&self) -> Option<&Failure> {
        self.entries.last()
    }

    /// Все накопленные отказы в порядке появления.
    pub fn entries(&self) -> &[Failure] {
        &self.entries
    }

    /// Забирает накопленные отказы, оставляя журнал пустым.
    pub fn drain(&mut self) -> Vec<Failure> {
        std::mem::take(&mut self.entries)
    }
}
