use around_client::{AvatarPatch, Card, NewCard, PopupState, ProfilePatch};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::actions;
use crate::state::AppState;

#[component]
pub(crate) fn Popups(state: AppState) -> impl IntoView {
    // формы перерисовываются только при смене попапа, не при каждом ответе
    let popup = Memo::new(move |_| state.client.with(|client| client.popup().clone()));

    move || match popup.get() {
        PopupState::Closed => ().into_any(),
        PopupState::EditingProfile => view! { <EditProfilePopup state=state /> }.into_any(),
        PopupState::EditingAvatar => view! { <EditAvatarPopup state=state /> }.into_any(),
        PopupState::AddingPlace => view! { <AddPlacePopup state=state /> }.into_any(),
        PopupState::ConfirmingDelete(card) => {
            view! { <ConfirmDeletePopup state=state card=card /> }.into_any()
        }
        PopupState::Viewing(card) => view! { <ImagePopup state=state card=card /> }.into_any(),
    }
}

#[component]
fn PopupFrame(state: AppState, title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="popup popup_opened">
            <div class="popup__container">
                <button
                    class="popup__close"
                    on:click=move |_| state.client.update(|client| client.popup_mut().close())
                >
                    "×"
                </button>
                <h3 class="popup__title">{title}</h3>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn EditProfilePopup(state: AppState) -> impl IntoView {
    let (name, about) = state.client.with_untracked(|client| {
        client
            .session()
            .user()
            .map(|user| (user.name.clone(), user.about.clone()))
            .unwrap_or_default()
    });
    let name = RwSignal::new(name);
    let about = RwSignal::new(about);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();
        actions::update_profile(
            state,
            ProfilePatch {
                name: name.get().trim().to_string(),
                about: about.get().trim().to_string(),
            },
        );
    };

    view! {
        <PopupFrame state=state title="Редактировать профиль">
            <form on:submit=on_submit>
                <input
                    placeholder="Имя"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    placeholder="О себе"
                    prop:value=move || about.get()
                    on:input=move |ev| about.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.is_busy()>"Сохранить"</button>
            </form>
        </PopupFrame>
    }
}

#[component]
fn EditAvatarPopup(state: AppState) -> impl IntoView {
    let avatar = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();
        actions::update_avatar(
            state,
            AvatarPatch {
                avatar: avatar.get().trim().to_string(),
            },
        );
    };

    view! {
        <PopupFrame state=state title="Обновить аватар">
            <form on:submit=on_submit>
                <input
                    placeholder="Ссылка на картинку"
                    type="url"
                    on:input=move |ev| avatar.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.is_busy()>"Сохранить"</button>
            </form>
        </PopupFrame>
    }
}

#[component]
fn AddPlacePopup(state: AppState) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let link = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();
        actions::add_card(
            state,
            NewCard {
                name: name.get().trim().to_string(),
                link: link.get().trim().to_string(),
            },
        );
    };

    view! {
        <PopupFrame state=state title="Новое место">
            <form on:submit=on_submit>
                <input
                    placeholder="Название"
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    placeholder="Ссылка на картинку"
                    type="url"
                    on:input=move |ev| link.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.is_busy()>"Создать"</button>
            </form>
        </PopupFrame>
    }
}

#[component]
fn ConfirmDeletePopup(state: AppState, card: Card) -> impl IntoView {
    view! {
        <PopupFrame state=state title="Вы уверены?">
            <p>{card.name.clone()}</p>
            <button
                disabled=move || state.is_busy()
                on:click=move |_| actions::confirm_delete(state)
            >
                "Да"
            </button>
        </PopupFrame>
    }
}

#[component]
fn ImagePopup(state: AppState, card: Card) -> impl IntoView {
    view! {
        <div class="popup popup_type_image popup_opened">
            <figure class="popup__figure">
                <button
                    class="popup__close"
                    on:click=move |_| state.client.update(|client| client.popup_mut().close())
                >
                    "×"
                </button>
                <img class="popup__image" src=card.image_url.clone() alt=card.name.clone() />
                <figcaption>{card.name.clone()}</figcaption>
            </figure>
        </div>
    }
}
