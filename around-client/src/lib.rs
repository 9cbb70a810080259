//! Клиентская библиотека сервиса фотокарточек "Around".
//!
//! Состав:
//! - модели и ошибки;
//! - порты (`ProfileApi`, `AuthApi`, `TokenStore`) и их HTTP-реализация
//!   поверх `reqwest` (feature `http`);
//! - состояние клиента ([`ClientState`]): сессия, лента карточек, попапы,
//!   журнал отказов; проверки до запроса и применение ответа общие для
//!   всех хостов;
//! - оркестратор [`App`], который проводит операции пользователя через порты
//!   и складывает отказы в единый журнал.
//!
//! Браузерный клиент подключает библиотеку без feature `http` и реализует
//! порты сам.
#![warn(missing_docs)]

mod app;
mod cards;
mod error;
mod events;
#[cfg(feature = "http")]
mod http_client;
mod models;
mod popup;
mod ports;
mod router;
mod session;
mod state;
mod storage;
mod validation;
pub mod wire;

pub use app::App;
pub use cards::CardCollection;
pub use error::{AroundClientError, AroundClientResult, FailureKind};
pub use events::{FAILURE_LOG_CAPACITY, Failure, FailureLog, Operation};
#[cfg(feature = "http")]
pub use http_client::HttpClient;
pub use models::{
    AvatarPatch, Card, Credentials, Identity, LikeRequest, NewCard, ProfilePatch, User,
};
pub use popup::PopupState;
pub use ports::{AuthApi, ProfileApi, TokenStore};
pub use router::{Navigation, Route, resolve, resolve_route};
pub use session::Session;
pub use state::ClientState;
pub use storage::{FileTokenStore, MemoryTokenStore, parse_token};

#[cfg(feature = "http")]
/// Клиент, работающий с сервисами по HTTP.
pub type HttpApp<S> = App<HttpClient, HttpClient, S>;

#[cfg(feature = "http")]
impl<S: TokenStore> App<HttpClient, HttpClient, S> {
    /// Собирает клиент из адресов сервиса профилей и сервиса авторизации.
    pub fn over_http(api_url: &str, auth_url: &str, store: S) -> AroundClientResult<Self> {
        Ok(Self::new(
            HttpClient::new(api_url)?,
            HttpClient::new(auth_url)?,
            store,
        ))
    }
}
