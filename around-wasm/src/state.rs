use around_client::{AroundClientResult, ClientState};
use leptos::prelude::*;

/// Число запросов в полёте. Кнопки форм заблокированы, пока не вернулись все.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Pending(usize);

impl Pending {
    pub(crate) fn begin(&mut self) {
        self.0 += 1;
    }

    pub(crate) fn finish(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.0 > 0
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) client: RwSignal<ClientState>,
    pub(crate) pending: RwSignal<Pending>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            client: RwSignal::new(ClientState::new()),
            pending: RwSignal::new(Pending::default()),
        }
    }

    /// Шаг над общим состоянием клиента. `None`, если сигнал уже удалён.
    pub(crate) fn run<U>(&self, step: impl FnOnce(&mut ClientState) -> U) -> Option<U> {
        self.client.try_update(step)
    }

    /// Шаг, который может отказать: отказ уже записан в журнал.
    pub(crate) fn attempt<U>(
        &self,
        step: impl FnOnce(&mut ClientState) -> AroundClientResult<U>,
    ) -> Option<U> {
        self.run(step).and_then(Result::ok)
    }

    pub(crate) fn begin(&self) {
        self.pending.update(Pending::begin);
    }

    pub(crate) fn finish(&self) {
        let _ = self.pending.try_update(Pending::finish);
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.pending.with(Pending::is_busy)
    }

    pub(crate) fn clear_error(&self) {
        self.client.update(|client| {
            client.take_failures();
        });
    }

    pub(crate) fn error_text(&self) -> Option<String> {
        self.client.with(|client| {
            client
                .failures()
                .last()
                .map(|failure| failure.message.clone())
        })
    }

    pub(crate) fn is_logged(&self) -> bool {
        self.client.with(|client| client.session().is_logged())
    }
}
