use crate::models::Card;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Открытый попап. Одновременно может быть открыт только один.
pub enum PopupState {
    /// Ни один попап не открыт.
    #[default]
    Closed,
    /// Редактирование имени и описания.
    EditingProfile,
    /// Смена аватара.
    EditingAvatar,
    /// Добавление карточки.
    AddingPlace,
    /// Подтверждение удаления карточки.
    ConfirmingDelete(Card),
    /// Просмотр изображения.
    Viewing(Card),
}

impl PopupState {
    /// Открывает форму профиля.
    pub fn open_edit_profile(&mut self) {
        *self = Self::EditingProfile;
    }

    /// Открывает форму аватара.
    pub fn open_edit_avatar(&mut self) {
        *self = Self::EditingAvatar;
    }

    /// Открывает форму новой карточки.
    pub fn open_add_place(&mut self) {
        *self = Self::AddingPlace;
    }

    /// Открывает просмотр изображения.
    pub fn view(&mut self, card: Card) {
        *self = Self::Viewing(card);
    }

    /// Ставит карточку на удаление и открывает подтверждение.
    pub fn confirm_delete(&mut self, card: Card) {
        *self = Self::ConfirmingDelete(card);
    }

    /// Закрывает любой открытый попап.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Открыт ли какой-нибудь попап.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Карточка, ожидающая подтверждения удаления.
    pub fn staged_for_delete(&self) -> Option<&Card> {
        match self {
            Self::ConfirmingDelete(card) => Some(card),
            _ => None,
        }
    }

    /// Карточка, открытая в просмотрщике.
    pub fn viewed_card(&self) -> Option<&Card> {
        match self {
            Self::Viewing(card) => Some(card),
            _ => None,
        }
    }
}
