pub mod optimizer;

use serde::{Deserialize, Serialize};

pub use optimizer::ComboOptimizer;

/// Immutable food/beverage offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComboItem {
    pub name: String,
    pub price: u32,
    pub value: u32,
}

impl ComboItem {
    pub fn new(name: impl Into<String>, price: u32, value: u32) -> Self {
        Self {
            name: name.into(),
            price,
            value,
        }
    }
}

/// Items picked for a budget, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComboSelection {
    pub budget: u32,
    pub items: Vec<ComboItem>,
    pub total_cost: u64,
    pub total_value: u64,
}

impl ComboSelection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}
