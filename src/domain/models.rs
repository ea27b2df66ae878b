use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of a shopping item.
///
/// Ids are minted once when an item is created and never change or get
/// reused after the item is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Mints a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry on the shopping list.
///
/// Field order here is the field order of the persisted JSON.
///
/// # Examples
///
/// ```
/// use shoplist::domain::ShoppingItem;
///
/// let item = ShoppingItem::new("Milk", 2);
/// assert_eq!(item.name, "Milk");
/// assert_eq!(item.quantity, 2);
/// assert!(!item.purchased);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub purchased: bool,
}

impl ShoppingItem {
    pub const DEFAULT_QUANTITY: i64 = 1;

    /// Creates an unpurchased item with a freshly minted id.
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self::with_id(ItemId::generate(), name, quantity)
    }

    pub fn with_id(id: impl Into<ItemId>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            purchased: false,
        }
    }
}

/// Three-way selector for which items the list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFilter {
    #[default]
    All,
    Purchased,
    Unpurchased,
}

impl ItemFilter {
    pub fn matches(self, item: &ShoppingItem) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::Purchased => item.purchased,
            ItemFilter::Unpurchased => !item.purchased,
        }
    }

    /// The filter the selector moves to next, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ItemFilter::All => ItemFilter::Purchased,
            ItemFilter::Purchased => ItemFilter::Unpurchased,
            ItemFilter::Unpurchased => ItemFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemFilter::All => "All",
            ItemFilter::Purchased => "Purchased",
            ItemFilter::Unpurchased => "Unpurchased",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_new_item_defaults() {
        let item = ShoppingItem::with_id("a", "Milk", 2);
        assert_eq!(item.id.as_str(), "a");
        assert!(!item.purchased);
    }

    #[test]
    fn test_item_json_shape() {
        let item = ShoppingItem::with_id("a", "Milk", 2);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":"a","name":"Milk","quantity":2,"purchased":false}"#);
    }

    #[test]
    fn test_filter_matches() {
        let mut item = ShoppingItem::with_id("a", "Milk", 1);
        assert!(ItemFilter::All.matches(&item));
        assert!(ItemFilter::Unpurchased.matches(&item));
        assert!(!ItemFilter::Purchased.matches(&item));

        item.purchased = true;
        assert!(ItemFilter::Purchased.matches(&item));
        assert!(!ItemFilter::Unpurchased.matches(&item));
    }

    #[test]
    fn test_filter_cycle_wraps() {
        let filter = ItemFilter::default();
        assert_eq!(filter, ItemFilter::All);
        assert_eq!(filter.next().next().next(), ItemFilter::All);
        assert_eq!(filter.next().label(), "Purchased");
    }
}
