use thiserror::Error;

/// Input rejected before it reaches the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Item name is required")]
    EmptyName,
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
