//! Input validation and read-side views over the shopping list.
//!
//! Nothing in here mutates a list: drafts are checked before an item is
//! built, and queries derive what the user sees from the current snapshot.

use super::errors::{DomainError, DomainResult};
use super::models::{ItemFilter, ShoppingItem};
use super::store::ShoppingList;

/// Validated name and quantity typed into the add or edit form.
///
/// # Examples
///
/// ```
/// use shoplist::domain::ItemDraft;
///
/// let draft = ItemDraft::parse("  Milk ", "2").unwrap();
/// assert_eq!(draft.name, "Milk");
/// assert_eq!(draft.quantity, 2);
///
/// assert!(ItemDraft::parse("   ", "1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: i64,
}

impl ItemDraft {
    /// Parses raw form input.
    ///
    /// The name is trimmed before it is stored and must not be empty. The
    /// quantity is trimmed; blank means [`ShoppingItem::DEFAULT_QUANTITY`],
    /// anything else has to be a whole number. No bounds are applied to the quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyName`] or [`DomainError::InvalidQuantity`].
    pub fn parse(name: &str, quantity: &str) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }

        let quantity = quantity.trim();
        let quantity = if quantity.is_empty() {
            ShoppingItem::DEFAULT_QUANTITY
        } else {
            quantity
                .parse::<i64>()
                .map_err(|_| DomainError::InvalidQuantity(quantity.to_string()))?
        };

        Ok(Self {
            name: name.to_string(),
            quantity,
        })
    }

    /// Builds a brand-new item from the draft, minting its id.
    pub fn into_item(self) -> ShoppingItem {
        ShoppingItem::new(self.name, self.quantity)
    }
}

/// Search text plus filter selection, applied to a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub search: String,
    pub filter: ItemFilter,
}

impl ItemQuery {
    pub fn new(search: impl Into<String>, filter: ItemFilter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }

    /// Case-insensitive substring match on the name, then the filter.
    pub fn matches(&self, item: &ShoppingItem) -> bool {
        let needle = self.search.to_lowercase();
        item.name.to_lowercase().contains(&needle) && self.filter.matches(item)
    }

    /// Items of `list` that the query lets through, in list order.
    pub fn apply<'a>(&self, list: &'a ShoppingList) -> Vec<&'a ShoppingItem> {
        list.items().iter().filter(|item| self.matches(item)).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.filter != ItemFilter::All
    }
}

/// Counts shown in the list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub total: usize,
    pub purchased: usize,
}

impl ListSummary {
    pub fn of(list: &ShoppingList) -> Self {
        Self {
            total: list.len(),
            purchased: list.items().iter().filter(|item| item.purchased).count(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.purchased
    }
}
