//! Состояние клиента без портов.
//!
//! Операция делится на две половины: `prepare_*` проверяет сессию и данные
//! формы до запроса, `finish_*` применяет результат запроса. Между ними
//! хост сам вызывает сервис: [`App`](crate::App) через порты, браузерный
//! клиент через `fetch` в отдельной задаче. Любой отказ попадает в журнал
//! до возврата `Err`.

use tracing::{debug, info};

use crate::cards::CardCollection;
use crate::error::{AroundClientError, AroundClientResult};
use crate::events::{Failure, FailureLog, Operation};
use crate::models::{
    AvatarPatch, Card, Credentials, Identity, LikeRequest, NewCard, ProfilePatch, User,
};
use crate::popup::PopupState;
use crate::session::Session;

#[derive(Debug, Clone, Default)]
/// Сессия, лента, попап и журнал отказов одного клиента.
pub struct ClientState {
    session: Session,
    cards: CardCollection,
    popup: PopupState,
    failures: FailureLog,
}

impl ClientState {
    /// Анонимное состояние с пустой лентой.
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущая сессия.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Лента карточек.
    pub fn cards(&self) -> &CardCollection {
        &self.cards
    }

    /// Открытый попап.
    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    /// Попап для открытия и закрытия форм.
    pub fn popup_mut(&mut self) -> &mut PopupState {
        &mut self.popup
    }

    /// Журнал отказов.
    pub fn failures(&self) -> &FailureLog {
        &self.failures
    }

    /// Забирает накопленные отказы.
    pub fn take_failures(&mut self) -> Vec<Failure> {
        self.failures.drain()
    }

    /// Записывает отказ и возвращает ту же ошибку.
    pub fn fail(&mut self, operation: Operation, err: AroundClientError) -> AroundClientError {
        self.failures.record(operation, &err);
        err
    }

    /// Пропускает результат, записывая отказ в журнал.
    pub fn record<T>(
        &mut self,
        operation: Operation,
        result: AroundClientResult<T>,
    ) -> AroundClientResult<T> {
        result.map_err(|err| self.fail(operation, err))
    }

    /// Токен подтверждённой сессии; без неё `Unauthorized`.
    pub fn authorized_token(&mut self, operation: Operation) -> AroundClientResult<String> {
        let token = self
            .session
            .token()
            .filter(|_| self.session.is_logged())
            .map(str::to_string);
        token.ok_or_else(|| self.fail(operation, AroundClientError::Unauthorized))
    }

    /// Принимает результат чтения хранилища. Найденный токен запоминается
    /// до проверки и возвращается для неё.
    pub fn restore(&mut self, stored: AroundClientResult<Option<String>>) -> Option<String> {
        match self.record(Operation::CheckToken, stored) {
            Ok(Some(token)) => {
                self.session.restore(token.clone());
                Some(token)
            }
            Ok(None) => {
                debug!("no stored token, staying anonymous");
                None
            }
            Err(_) => None,
        }
    }

    /// Ответ сервиса авторизации на проверку токена.
    pub fn finish_check_token(
        &mut self,
        token: &str,
        result: AroundClientResult<Identity>,
    ) -> AroundClientResult<Identity> {
        let identity = self.record(Operation::CheckToken, result)?;
        self.session.establish(token, &identity);
        info!(email = %identity.email, "session established");
        Ok(identity)
    }

    /// Профиль из цепочки загрузки.
    pub fn finish_load_user(&mut self, result: AroundClientResult<User>) -> AroundClientResult<()> {
        let user = self.record(Operation::LoadUser, result)?;
        self.session.set_user(user);
        Ok(())
    }

    /// Лента целиком.
    pub fn finish_load_cards(
        &mut self,
        result: AroundClientResult<Vec<Card>>,
    ) -> AroundClientResult<&[Card]> {
        let cards = self.record(Operation::LoadCards, result)?;
        debug!(count = cards.len(), "cards loaded");
        self.cards.replace_all(cards);
        Ok(self.cards.as_slice())
    }

    /// Проверка формы входа или регистрации.
    pub fn prepare_credentials(
        &mut self,
        operation: Operation,
        credentials: Credentials,
    ) -> AroundClientResult<Credentials> {
        self.record(operation, credentials.validate())
    }

    /// Ответ на регистрацию. Сессия не меняется.
    pub fn finish_register(
        &mut self,
        result: AroundClientResult<Identity>,
    ) -> AroundClientResult<Identity> {
        let identity = self.record(Operation::Register, result)?;
        info!(email = %identity.email, "registered");
        Ok(identity)
    }

    /// Выход. `cleared` — результат удаления токена из хранилища: ошибка
    /// записывается, но сброс выполняется всё равно.
    pub fn logout(&mut self, cleared: AroundClientResult<()>) {
        if let Err(err) = cleared {
            self.fail(Operation::Logout, err);
        }
        self.session.reset();
        self.cards.clear();
        self.popup.close();
        info!("logged out");
    }

    /// Токен и запрос на переключение лайка текущего пользователя.
    pub fn prepare_like(&mut self, card_id: &str) -> AroundClientResult<(String, LikeRequest)> {
        let token = self.authorized_token(Operation::ToggleLike)?;
        let Some(user_id) = self.session.current_user_id().map(str::to_string) else {
            return Err(self.fail(Operation::ToggleLike, AroundClientError::Unauthorized));
        };
        let Some(request) = self.cards.like_request(card_id, &user_id) else {
            return Err(self.fail(Operation::ToggleLike, AroundClientError::NotFound));
        };
        Ok((token, request))
    }

    /// Карточка от сервера заменяет свою копию в ленте.
    pub fn finish_like(&mut self, result: AroundClientResult<Card>) -> AroundClientResult<Card> {
        let card = self.record(Operation::ToggleLike, result)?;
        self.cards.replace(card.clone());
        Ok(card)
    }

    /// Проверенная форма новой карточки и токен.
    pub fn prepare_add(&mut self, input: NewCard) -> AroundClientResult<(String, NewCard)> {
        let input = self.record(Operation::AddCard, input.validate())?;
        let token = self.authorized_token(Operation::AddCard)?;
        Ok((token, input))
    }

    /// Созданная карточка встаёт первой, попап закрывается.
    pub fn finish_add(&mut self, result: AroundClientResult<Card>) -> AroundClientResult<Card> {
        let card = self.record(Operation::AddCard, result)?;
        self.cards.prepend(card.clone());
        self.popup.close();
        Ok(card)
    }

    /// Первая фаза удаления: карточка ставится на подтверждение.
    pub fn request_delete(&mut self, card_id: &str) -> AroundClientResult<()> {
        let Some(card) = self.cards.get(card_id).cloned() else {
            return Err(self.fail(Operation::DeleteCard, AroundClientError::NotFound));
        };
        self.popup.confirm_delete(card);
        Ok(())
    }

    /// Токен и `id` карточки, ожидающей подтверждения.
    pub fn prepare_delete(&mut self) -> AroundClientResult<(String, String)> {
        let Some(card_id) = self.popup.staged_for_delete().map(|card| card.id.clone()) else {
            return Err(self.fail(
                Operation::DeleteCard,
                AroundClientError::InvalidRequest("no card is staged for deletion".to_string()),
            ));
        };
        let token = self.authorized_token(Operation::DeleteCard)?;
        Ok((token, card_id))
    }

    /// Карточка убирается только после ответа сервера; при отказе попап
    /// остаётся открытым.
    pub fn finish_delete(
        &mut self,
        card_id: &str,
        result: AroundClientResult<()>,
    ) -> AroundClientResult<()> {
        self.record(Operation::DeleteCard, result)?;
        self.cards.remove(card_id);
        self.popup.close();
        Ok(())
    }

    /// Проверенная форма профиля и токен.
    pub fn prepare_profile(
        &mut self,
        patch: ProfilePatch,
    ) -> AroundClientResult<(String, ProfilePatch)> {
        let patch = self.record(Operation::UpdateProfile, patch.validate())?;
        let token = self.authorized_token(Operation::UpdateProfile)?;
        Ok((token, patch))
    }

    /// Проверенная форма аватара и токен.
    pub fn prepare_avatar(&mut self, patch: AvatarPatch) -> AroundClientResult<(String, AvatarPatch)> {
        let patch = self.record(Operation::UpdateAvatar, patch.validate())?;
        let token = self.authorized_token(Operation::UpdateAvatar)?;
        Ok((token, patch))
    }

    /// Профиль от сервера заменяет текущий целиком, попап закрывается.
    pub fn finish_user_update(
        &mut self,
        operation: Operation,
        result: AroundClientResult<User>,
    ) -> AroundClientResult<User> {
        let user = self.record(operation, result)?;
        self.session.set_user(user.clone());
        self.popup.close();
        Ok(user)
    }

    /// Открывает просмотр изображения. `false`, если карточки нет в ленте.
    pub fn view_card(&mut self, card_id: &str) -> bool {
        match self.cards.get(card_id).cloned() {
            Some(card) => {
                self.popup.view(card);
                true
            }
            None => false,
        }
    }
}
