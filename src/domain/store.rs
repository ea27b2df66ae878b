//! The in-memory shopping list and its state transitions.
//!
//! Every transition consumes the current snapshot and returns the next one.
//! Transitions keyed by id are silent no-ops when the id is not present,
//! since ids only ever come from a snapshot the user was just looking at.

use super::models::{ItemId, ShoppingItem};

/// A command that moves the list from one snapshot to the next.
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    Add(ShoppingItem),
    Delete(ItemId),
    TogglePurchased(ItemId),
    Edit {
        id: ItemId,
        name: String,
        quantity: i64,
    },
    SetItems(Vec<ShoppingItem>),
}

/// Ordered collection of shopping items.
///
/// # Examples
///
/// ```
/// use shoplist::domain::{ShoppingItem, ShoppingList};
///
/// let list = ShoppingList::default()
///     .add_item(ShoppingItem::with_id("a", "Milk", 2))
///     .toggle_purchased(&"a".into());
///
/// assert_eq!(list.len(), 1);
/// assert!(list.items()[0].purchased);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new(items: Vec<ShoppingItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ShoppingItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Applies a single action and returns the resulting snapshot.
    #[must_use]
    pub fn apply(self, action: ListAction) -> Self {
        match action {
            ListAction::Add(item) => self.add_item(item),
            ListAction::Delete(id) => self.delete_item(&id),
            ListAction::TogglePurchased(id) => self.toggle_purchased(&id),
            ListAction::Edit { id, name, quantity } => self.edit_item(&id, name, quantity),
            ListAction::SetItems(items) => self.set_items(items),
        }
    }

    /// Appends an item to the end of the list.
    ///
    /// The item is taken as-is: name validation and id minting are the
    /// caller's job, and duplicate ids are not checked.
    #[must_use]
    pub fn add_item(mut self, item: ShoppingItem) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn delete_item(mut self, id: &ItemId) -> Self {
        self.items.retain(|item| &item.id != id);
        self
    }

    #[must_use]
    pub fn toggle_purchased(mut self, id: &ItemId) -> Self {
        if let Some(item) = self.find_mut(id) {
            item.purchased = !item.purchased;
        }
        self
    }

    /// Overwrites name and quantity, leaving id and purchased state alone.
    #[must_use]
    pub fn edit_item(mut self, id: &ItemId, name: impl Into<String>, quantity: i64) -> Self {
        if let Some(item) = self.find_mut(id) {
            item.name = name.into();
            item.quantity = quantity;
        }
        self
    }

    /// Replaces the whole collection, order included.
    #[must_use]
    pub fn set_items(self, items: Vec<ShoppingItem>) -> Self {
        Self { items }
    }

    fn find_mut(&mut self, id: &ItemId) -> Option<&mut ShoppingItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

impl From<Vec<ShoppingItem>> for ShoppingList {
    fn from(items: Vec<ShoppingItem>) -> Self {
        Self::new(items)
    }
}
