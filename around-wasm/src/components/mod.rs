pub(crate) mod auth_panel;
pub(crate) mod feed;
pub(crate) mod popups;
