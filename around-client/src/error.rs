use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `around-client`.
pub enum AroundClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрос не дошёл до сервера или соединение оборвалось.
    #[error("network error: {0}")]
    Network(String),

    /// Ответ сервера не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),

    /// Требуется авторизация (отсутствует/некорректен токен или неверные учётные данные).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос или бизнес-ошибка сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Данные формы не прошли проверку.
    #[error("validation failed for '{field}': {message}")]
    Validation {
        /// Поле формы.
        field: &'static str,
        /// Описание нарушения.
        message: &'static str,
    },

    /// Не удалось прочитать или записать сохранённый токен.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Результат операций `around-client`.
pub type AroundClientResult<T> = Result<T, AroundClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Укрупнённая категория ошибки для канала отказов.
pub enum FailureKind {
    /// Сеть, транспорт, неожиданный ответ сервера.
    Network,
    /// Невалидный/просроченный токен или неверные учётные данные.
    Auth,
    /// Некорректные входные данные.
    Validation,
    /// Локальное хранилище токена.
    Storage,
}

impl AroundClientError {
    /// Относит ошибку к одной из категорий [`FailureKind`].
    pub fn kind(&self) -> FailureKind {
        match self {
            #[cfg(feature = "http")]
            Self::Http(_) => FailureKind::Network,
            Self::Network(_) | Self::Decode(_) | Self::NotFound => FailureKind::Network,
            Self::Unauthorized => FailureKind::Auth,
            Self::InvalidRequest(_) | Self::Validation { .. } => FailureKind::Validation,
            Self::Storage(_) => FailureKind::Storage,
        }
    }

    /// Сопоставляет неуспешный HTTP-статус с вариантом ошибки.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            500..=599 => {
                Self::Network(message.unwrap_or_else(|| format!("http status {status}")))
            }
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    #[cfg(feature = "http")]
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        assert!(matches!(
            AroundClientError::from_status(401, None),
            AroundClientError::Unauthorized
        ));
        assert!(matches!(
            AroundClientError::from_status(403, Some("forbidden".to_string())),
            AroundClientError::Unauthorized
        ));
    }

    #[test]
    fn bad_request_keeps_server_message() {
        let err = AroundClientError::from_status(400, Some("bad link".to_string()));
        match err {
            AroundClientError::InvalidRequest(message) => assert_eq!(message, "bad link"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn server_errors_are_network_failures() {
        let err = AroundClientError::from_status(502, None);
        assert_eq!(err.kind(), FailureKind::Network);
        assert_eq!(err.to_string(), "network error: http status 502");
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(AroundClientError::Unauthorized.kind(), FailureKind::Auth);
        assert_eq!(AroundClientError::NotFound.kind(), FailureKind::Network);
        assert_eq!(
            AroundClientError::Validation {
                field: "email",
                message: "must be a valid email",
            }
            .kind(),
            FailureKind::Validation
        );
        assert_eq!(
            AroundClientError::Storage("disk full".to_string()).kind(),
            FailureKind::Storage
        );
    }
}
