use std::collections::HashSet;

use crate::models::{Card, LikeRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Упорядоченная коллекция карточек ленты.
///
/// Порядок хранения совпадает с порядком отображения. Каждый `id`
/// встречается не более одного раза.
pub struct CardCollection {
    cards: Vec<Card>,
}

impl CardCollection {
    /// Пустая коллекция.
    pub fn new() -> Self {
        Self::default()
    }

    /// Заменяет содержимое списком от сервера в его порядке.
    /// При повторе `id` остаётся первое вхождение.
    pub fn replace_all(&mut self, cards: Vec<Card>) {
        let mut seen = HashSet::with_capacity(cards.len());
        self.cards = cards
            .into_iter()
            .filter(|card| seen.insert(card.id.clone()))
            .collect();
    }

    /// Добавляет карточку в начало.
    pub fn prepend(&mut self, card: Card) {
        self.cards.retain(|existing| existing.id != card.id);
        self.cards.insert(0, card);
    }

    /// Заменяет карточку с тем же `id`. Возвращает `false`, если такой нет.
    pub fn replace(&mut self, card: Card) -> bool {
        match self.cards.iter_mut().find(|existing| existing.id == card.id) {
            Some(existing) => {
                *existing = card;
                true
            }
            None => false,
        }
    }

    /// Удаляет карточку по `id`.
    pub fn remove(&mut self, card_id: &str) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == card_id)?;
        Some(self.cards.remove(index))
    }

    /// Очищает коллекцию.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Карточка по `id`.
    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    /// Первая (самая новая) карточка.
    pub fn first(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Карточки в порядке отображения.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Количество карточек.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Пуста ли коллекция.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Запрос на переключение лайка `user_id` для карточки `card_id`.
    pub fn like_request(&self, card_id: &str, user_id: &str) -> Option<LikeRequest> {
        let card = self.get(card_id)?;
        Some(LikeRequest {
            card_id: card.id.clone(),
            is_liked: card.is_liked_by(user_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, likes: &[&str]) -> Card {
        Card {
            id: id.to_string(),
            name: format!("card {id}"),
            image_url: format!("https://example.com/{id}.jpg"),
            owner_id: "owner".to_string(),
            likes: likes.iter().map(|id| id.to_string()).collect(),
            created_at: None,
        }
    }

    fn ids(cards: &CardCollection) -> Vec<&str> {
        cards.as_slice().iter().map(|card| card.id.as_str()).collect()
    }

    #[test]
    fn replace_all_keeps_server_order_and_drops_duplicates() {
        let mut cards = CardCollection::new();
        cards.replace_all(vec![card("3", &[]), card("1", &[]), card("3", &["u"])]);
        assert_eq!(ids(&cards), vec!["3", "1"]);
        assert!(cards.get("3").expect("card 3").likes.is_empty());
    }

    #[test]
    fn prepend_puts_new_card_first() {
        let mut cards = CardCollection::new();
        cards.replace_all(vec![card("1", &[]), card("2", &[])]);
        cards.prepend(card("9", &[]));
        assert_eq!(ids(&cards), vec!["9", "1", "2"]);

        cards.prepend(card("2", &["u"]));
        assert_eq!(ids(&cards), vec!["2", "9", "1"]);
    }

    #[test]
    fn replace_touches_only_matching_card() {
        let mut cards = CardCollection::new();
        cards.replace_all(vec![card("1", &[]), card("2", &[])]);

        assert!(cards.replace(card("2", &["u"])));
        assert!(cards.get("2").expect("card 2").is_liked_by("u"));
        assert!(cards.get("1").expect("card 1").likes.is_empty());
        assert!(!cards.replace(card("7", &[])));
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn remove_returns_removed_card() {
        let mut cards = CardCollection::new();
        cards.replace_all(vec![card("1", &[]), card("2", &[])]);
        let removed = cards.remove("1").expect("card 1 must be removed");
        assert_eq!(removed.id, "1");
        assert_eq!(ids(&cards), vec!["2"]);
        assert!(cards.remove("1").is_none());
    }

    #[test]
    fn like_request_reflects_current_state() {
        let mut cards = CardCollection::new();
        cards.replace_all(vec![card("1", &[]), card("2", &["u"])]);

        let like = cards.like_request("1", "u").expect("card 1 exists");
        assert!(!like.is_liked);
        let unlike = cards.like_request("2", "u").expect("card 2 exists");
        assert!(unlike.is_liked);
        assert!(cards.like_request("missing", "u").is_none());
    }
}
