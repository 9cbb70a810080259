//! Оркестратор клиента: связывает [`ClientState`] и маршрут с портами.
//!
//! Каждая операция берёт `&mut self`, поэтому операции одного `App`
//! выполняются строго по очереди. Состояние меняется только после ответа
//! сервера; лайки не применяются оптимистично.

use tracing::debug;

use crate::cards::CardCollection;
use crate::error::AroundClientResult;
use crate::events::{Failure, Operation};
use crate::models::{AvatarPatch, Card, Credentials, Identity, NewCard, ProfilePatch, User};
use crate::popup::PopupState;
use crate::ports::{AuthApi, ProfileApi, TokenStore};
use crate::router::{Navigation, Route, resolve, resolve_route};
use crate::session::Session;
use crate::state::ClientState;

/// Состояние клиента и его связь с сервисами.
pub struct App<P, A, S> {
    profile: P,
    auth: A,
    store: S,
    state: ClientState,
    route: Route,
}

impl<P, A, S> App<P, A, S>
where
    P: ProfileApi,
    A: AuthApi,
    S: TokenStore,
{
    /// Создаёт клиент в анонимном состоянии с пустой лентой.
    pub fn new(profile: P, auth: A, store: S) -> Self {
        Self {
            profile,
            auth,
            store,
            state: ClientState::new(),
            route: Route::Root,
        }
    }

    /// Состояние клиента целиком.
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Текущая сессия.
    pub fn session(&self) -> &Session {
        self.state.session()
    }

    /// Лента карточек.
    pub fn cards(&self) -> &CardCollection {
        self.state.cards()
    }

    /// Открытый попап.
    pub fn popup(&self) -> &PopupState {
        self.state.popup()
    }

    /// Маршрут на экране.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Накопленные отказы.
    pub fn failures(&self) -> &[Failure] {
        self.state.failures().entries()
    }

    /// Забирает накопленные отказы.
    pub fn take_failures(&mut self) -> Vec<Failure> {
        self.state.take_failures()
    }

    /// Переходит по пути с учётом охраны ленты.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let navigation = resolve(path, self.session().is_logged());
        self.route = navigation.target();
        debug!(path, route = %self.route, "navigated");
        navigation
    }

    fn go(&mut self, route: Route) {
        self.route = resolve_route(route, self.session().is_logged()).target();
    }

    /// Восстанавливает сессию из сохранённого токена.
    ///
    /// Возвращает `true`, если токен принят. Отвергнутый токен остаётся в
    /// хранилище, отказ попадает только в журнал.
    pub async fn start(&mut self) -> bool {
        let stored = self.store.load();
        let Some(token) = self.state.restore(stored) else {
            return false;
        };
        self.check_token(&token).await.is_ok()
    }

    /// Проверяет токен. При успехе открывает ленту и загружает сначала
    /// профиль, затем карточки.
    pub async fn check_token(&mut self, token: &str) -> AroundClientResult<Identity> {
        let result = self.auth.get_user_token(token).await;
        let identity = self.state.finish_check_token(token, result)?;
        self.go(Route::Home);
        self.load_feed().await;
        Ok(identity)
    }

    /// Вход по email и паролю. Токен сохраняется в хранилище.
    pub async fn login(&mut self, credentials: Credentials) -> AroundClientResult<()> {
        let credentials = self.state.prepare_credentials(Operation::Login, credentials)?;
        let result = self.auth.login(&credentials).await;
        let token = self.state.record(Operation::Login, result)?;
        let saved = self.store.save(&token);
        self.state.record(Operation::Login, saved)?;

        self.check_token(&token).await?;
        Ok(())
    }

    /// Регистрация. После успеха открывается страница входа.
    pub async fn register(&mut self, credentials: Credentials) -> AroundClientResult<Identity> {
        let credentials = self
            .state
            .prepare_credentials(Operation::Register, credentials)?;
        let result = self.auth.register(&credentials).await;
        let identity = self.state.finish_register(result)?;
        self.go(Route::Login);
        Ok(identity)
    }

    /// Выход: токен удаляется из хранилища, сессия, лента и попапы
    /// сбрасываются. На сервере токен не отзывается.
    pub fn logout(&mut self) {
        let cleared = self.store.clear();
        self.state.logout(cleared);
        self.route = Route::Login;
    }

    /// Загружает профиль, затем карточки. Отказы только журналируются;
    /// без профиля карточки не запрашиваются.
    pub async fn load_feed(&mut self) {
        let Ok(token) = self.state.authorized_token(Operation::LoadUser) else {
            return;
        };
        let result = self.profile.get_user_info(&token).await;
        if self.state.finish_load_user(result).is_err() {
            return;
        }

        // отказ уже в журнале, лента остаётся прежней
        let _ = self.load_cards().await;
    }

    /// Перезагружает ленту целиком.
    pub async fn load_cards(&mut self) -> AroundClientResult<&[Card]> {
        let token = self.state.authorized_token(Operation::LoadCards)?;
        let result = self.profile.get_initial_cards(&token).await;
        self.state.finish_load_cards(result)
    }

    /// Ставит или снимает лайк текущего пользователя. Карточка в ленте
    /// заменяется ответом сервера.
    pub async fn toggle_like(&mut self, card_id: &str) -> AroundClientResult<Card> {
        let (token, request) = self.state.prepare_like(card_id)?;
        let result = self.profile.like_card(&token, &request).await;
        self.state.finish_like(result)
    }

    /// Создаёт карточку и ставит её первой в ленте.
    pub async fn add_card(&mut self, input: NewCard) -> AroundClientResult<Card> {
        let (token, input) = self.state.prepare_add(input)?;
        let result = self.profile.add_card(&token, &input).await;
        self.state.finish_add(result)
    }

    /// Первая фаза удаления: карточка ставится на подтверждение.
    pub fn request_delete(&mut self, card_id: &str) -> AroundClientResult<()> {
        self.state.request_delete(card_id)
    }

    /// Вторая фаза удаления. Карточка убирается из ленты только после
    /// ответа сервера; при отказе попап остаётся открытым.
    pub async fn confirm_delete(&mut self) -> AroundClientResult<()> {
        let (token, card_id) = self.state.prepare_delete()?;
        let result = self.profile.delete_card(&token, &card_id).await;
        self.state.finish_delete(&card_id, result)
    }

    /// Обновляет имя и описание.
    pub async fn update_profile(&mut self, patch: ProfilePatch) -> AroundClientResult<User> {
        let (token, patch) = self.state.prepare_profile(patch)?;
        let result = self.profile.update_user(&token, &patch).await;
        self.state.finish_user_update(Operation::UpdateProfile, result)
    }

    /// Обновляет аватар.
    pub async fn update_avatar(&mut self, patch: AvatarPatch) -> AroundClientResult<User> {
        let (token, patch) = self.state.prepare_avatar(patch)?;
        let result = self.profile.update_avatar(&token, &patch).await;
        self.state.finish_user_update(Operation::UpdateAvatar, result)
    }

    /// Открывает форму профиля.
    pub fn open_edit_profile(&mut self) {
        self.state.popup_mut().open_edit_profile();
    }

    /// Открывает форму аватара.
    pub fn open_edit_avatar(&mut self) {
        self.state.popup_mut().open_edit_avatar();
    }

    /// Открывает форму новой карточки.
    pub fn open_add_place(&mut self) {
        self.state.popup_mut().open_add_place();
    }

    /// Открывает просмотр изображения. `false`, если карточки нет в ленте.
    pub fn view_card(&mut self, card_id: &str) -> bool {
        self.state.view_card(card_id)
    }

    /// Закрывает любой попап.
    pub fn close_popup(&mut self) {
        self.state.popup_mut().close();
    }
}
