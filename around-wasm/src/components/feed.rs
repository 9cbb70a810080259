use std::collections::BTreeSet;

use around_client::{Card, User};
use leptos::prelude::*;

use crate::actions;
use crate::router::Router;
use crate::state::AppState;

#[component]
pub(crate) fn Header(state: AppState, router: Router) -> impl IntoView {
    let email = move || {
        state
            .client
            .with(|client| client.session().email().to_string())
    };

    view! {
        <header class="header">
            <span class="header__logo">"Around"</span>
            <span class="header__email">{email}</span>
            <button class="header__logout" on:click=move |_| actions::logout(state, router)>
                "Выйти"
            </button>
        </header>
    }
}

/// Ключ строки ленты. Состав лайков входит целиком: при равном числе
/// лайков смена лайкнувших тоже перерисовывает карточку.
fn card_key(card: &Card) -> (String, BTreeSet<String>) {
    (card.id.clone(), card.likes.clone())
}

#[component]
pub(crate) fn Feed(state: AppState) -> impl IntoView {
    let user_field = move |field: fn(&User) -> String| {
        state
            .client
            .with(|client| client.session().user().map(field).unwrap_or_default())
    };

    view! {
        <section class="profile">
            <img
                class="profile__avatar"
                alt="Аватар"
                src=move || user_field(|user| user.avatar_url.clone())
                on:click=move |_| state.client.update(|client| client.popup_mut().open_edit_avatar())
            />
            <div class="profile__info">
                <h1>{move || user_field(|user| user.name.clone())}</h1>
                <button on:click=move |_| state.client.update(|client| client.popup_mut().open_edit_profile())>
                    "Редактировать"
                </button>
                <p>{move || user_field(|user| user.about.clone())}</p>
            </div>
            <button
                class="profile__add"
                on:click=move |_| state.client.update(|client| client.popup_mut().open_add_place())
            >
                "+"
            </button>
        </section>

        <Show
            when=move || !state.client.with(|client| client.cards().is_empty())
            fallback=|| view! { <p class="cards__empty">"Карточек пока нет"</p> }
        >
            <ul class="cards">
                <For
                    each=move || state.client.with(|client| client.cards().as_slice().to_vec())
                    key=card_key
                    children=move |card| view! { <CardItem state=state card=card /> }
                />
            </ul>
        </Show>
    }
}

#[component]
fn CardItem(state: AppState, card: Card) -> impl IntoView {
    let current_user = state
        .client
        .with_untracked(|client| client.session().current_user_id().map(str::to_string));
    let is_liked = current_user
        .as_deref()
        .is_some_and(|user_id| card.is_liked_by(user_id));
    let is_owner = current_user
        .as_deref()
        .is_some_and(|user_id| card.is_owned_by(user_id));

    let like_class = if is_liked {
        "card__like card__like_active"
    } else {
        "card__like"
    };

    let view_card = card.clone();
    let delete_id = card.id.clone();
    let like_id = card.id.clone();

    view! {
        <li class="card">
            <img
                class="card__image"
                src=card.image_url.clone()
                alt=card.name.clone()
                on:click=move |_| {
                    let card = view_card.clone();
                    state.client.update(|client| client.popup_mut().view(card));
                }
            />
            {is_owner
                .then(|| {
                    view! {
                        <button
                            class="card__delete"
                            on:click=move |_| actions::request_delete(state, &delete_id)
                        >
                            "Удалить"
                        </button>
                    }
                })}
            <div class="card__caption">
                <h2>{card.name.clone()}</h2>
                <button
                    class=like_class
                    on:click=move |_| actions::toggle_like(state, like_id.clone())
                >
                    "♥"
                </button>
                <span class="card__like-count">{card.like_count()}</span>
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::card_key;
    use around_client::Card;

    fn card(likes: &[&str]) -> Card {
        Card {
            id: "1".to_string(),
            name: "Peaks".to_string(),
            image_url: "https://example.com/1.jpg".to_string(),
            owner_id: "U".to_string(),
            likes: likes.iter().map(|id| id.to_string()).collect(),
            created_at: None,
        }
    }

    #[test]
    fn card_key_changes_when_likers_swap_at_same_count() {
        let before = card(&["a"]);
        let after = card(&["b"]);
        assert_eq!(before.like_count(), after.like_count());
        assert_ne!(card_key(&before), card_key(&after));
    }

    #[test]
    fn card_key_is_stable_for_same_card() {
        assert_eq!(card_key(&card(&["a", "b"])), card_key(&card(&["b", "a"])));
    }
}
