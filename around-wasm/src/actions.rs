//! Операции пользователя в браузере.
//!
//! Проверки до запроса и применение ответа берутся из
//! [`ClientState`](around_client::ClientState), здесь только запросы через
//! `fetch` в задачах `spawn_local`. Ответы не упорядочиваются: какой пришёл
//! последним, тот и остаётся на экране.

use around_client::{
    AuthApi, AvatarPatch, Credentials, NewCard, Operation, ProfileApi, ProfilePatch, Route,
    TokenStore,
};
use leptos::task::spawn_local;

use crate::api::FetchApi;
use crate::router::Router;
use crate::state::AppState;
use crate::storage::LocalStorageTokenStore;

/// Запуск страницы: сохранённый токен проверяется у сервиса авторизации.
pub(crate) fn start(state: AppState, router: Router) {
    let stored = LocalStorageTokenStore.load();
    let Some(token) = state.run(|client| client.restore(stored)).flatten() else {
        return;
    };

    spawn_local(async move {
        check_token(state, router, token).await;
    });
}

async fn check_token(state: AppState, router: Router, token: String) {
    let result = FetchApi::auth().get_user_token(&token).await;
    if state
        .attempt(|client| client.finish_check_token(&token, result))
        .is_none()
    {
        return;
    }
    router.go(Route::Home);
    load_feed(state).await;
}

async fn load_feed(state: AppState) {
    let api = FetchApi::profile();
    let Some(token) = state.attempt(|client| client.authorized_token(Operation::LoadUser)) else {
        return;
    };
    let user = api.get_user_info(&token).await;
    if state
        .attempt(|client| client.finish_load_user(user))
        .is_none()
    {
        return;
    }

    let Some(token) = state.attempt(|client| client.authorized_token(Operation::LoadCards)) else {
        return;
    };
    let cards = api.get_initial_cards(&token).await;
    state.attempt(|client| client.finish_load_cards(cards).map(|_| ()));
}

pub(crate) fn login(state: AppState, router: Router, credentials: Credentials) {
    let Some(credentials) =
        state.attempt(|client| client.prepare_credentials(Operation::Login, credentials))
    else {
        return;
    };

    state.begin();
    spawn_local(async move {
        let result = FetchApi::auth().login(&credentials).await;
        let saved = state.attempt(|client| {
            let token = client.record(Operation::Login, result)?;
            let saved = LocalStorageTokenStore.save(&token);
            client.record(Operation::Login, saved)?;
            Ok(token)
        });
        if let Some(token) = saved {
            check_token(state, router, token).await;
        }
        state.finish();
    });
}

pub(crate) fn register(state: AppState, router: Router, credentials: Credentials) {
    let Some(credentials) =
        state.attempt(|client| client.prepare_credentials(Operation::Register, credentials))
    else {
        return;
    };

    state.begin();
    spawn_local(async move {
        let result = FetchApi::auth().register(&credentials).await;
        if state
            .attempt(|client| client.finish_register(result))
            .is_some()
        {
            router.go(Route::Login);
        }
        state.finish();
    });
}

pub(crate) fn logout(state: AppState, router: Router) {
    let cleared = LocalStorageTokenStore.clear();
    state.run(|client| client.logout(cleared));
    router.go(Route::Login);
}

pub(crate) fn toggle_like(state: AppState, card_id: String) {
    let Some((token, request)) = state.attempt(|client| client.prepare_like(&card_id)) else {
        return;
    };

    spawn_local(async move {
        let result = FetchApi::profile().like_card(&token, &request).await;
        state.attempt(|client| client.finish_like(result));
    });
}

pub(crate) fn add_card(state: AppState, input: NewCard) {
    let Some((token, input)) = state.attempt(|client| client.prepare_add(input)) else {
        return;
    };

    state.begin();
    spawn_local(async move {
        let result = FetchApi::profile().add_card(&token, &input).await;
        state.attempt(|client| client.finish_add(result));
        state.finish();
    });
}

pub(crate) fn request_delete(state: AppState, card_id: &str) {
    state.attempt(|client| client.request_delete(card_id));
}

pub(crate) fn confirm_delete(state: AppState) {
    let Some((token, card_id)) = state.attempt(|client| client.prepare_delete()) else {
        return;
    };

    state.begin();
    spawn_local(async move {
        let result = FetchApi::profile().delete_card(&token, &card_id).await;
        state.attempt(|client| client.finish_delete(&card_id, result));
        state.finish();
    });
}

pub(crate) fn update_profile(state: AppState, patch: ProfilePatch) {
    let Some((token, patch)) = state.attempt(|client| client.prepare_profile(patch)) else {
        return;
    };

    state.begin();
    spawn_local(async move {
        let result = FetchApi::profile().update_user(&token, &patch).await;
        state.attempt(|client| client.finish_user_update(Operation::UpdateProfile, result));
        state.finish();
    });
}

pub(crate) fn update_avatar(state: AppState, patch: AvatarPatch) {
    let Some((token, patch)) = state.attempt(|client| client.prepare_avatar(patch)) else {
        return;
    };

    state.begin();
    spawn_local(async move {
        let result = FetchApi::profile().update_avatar(&token, &patch).await;
        state.attempt(|client| client.finish_user_update(Operation::UpdateAvatar, result));
        state.finish();
    });
}
