use around_client::Route;
use leptos::prelude::*;

use crate::actions;
use crate::components::auth_panel::{LoginPage, RegisterPage};
use crate::components::feed::{Feed, Header};
use crate::components::popups::Popups;
use crate::router::Router;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    let router = Router::new(Signal::derive(move || state.is_logged()));

    actions::start(state, router);

    let error_text = move || state.error_text().unwrap_or_default();

    let page = move || match router.route() {
        Route::Login => view! { <LoginPage state=state router=router /> }.into_any(),
        Route::Register => view! { <RegisterPage state=state router=router /> }.into_any(),
        Route::Home => view! {
            <Header state=state router=router />
            <Feed state=state />
            <Popups state=state />
        }
        .into_any(),
        Route::Root => ().into_any(),
    };

    view! {
        <main class="page">
            <Show when=move || state.error_text().is_some()>
                <div class="error-banner">
                    <strong>"Ошибка: "</strong>
                    {error_text}
                    <button on:click=move |_| state.clear_error()>"×"</button>
                </div>
            </Show>

            {page}
        </main>
    }
}
