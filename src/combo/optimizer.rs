use crate::combo::{ComboItem, ComboSelection};

/// 0/1 subset selection over a fixed combo catalog.
///
/// Tie-break contract: the table only records "take item i at budget b" when
/// taking it strictly beats skipping it, and the backtrack walks items from
/// last to first. Among equally valuable subsets this prefers the one that
/// leaves later catalog items out. Results must not depend on anything else.
#[derive(Debug, Clone, Default)]
pub struct ComboOptimizer {
    items: Vec<ComboItem>,
}

impl ComboOptimizer {
    pub fn new(items: Vec<ComboItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ComboItem] {
        &self.items
    }

    /// Highest-value subset whose total price fits in `budget`.
    ///
    /// O(items x budget) time and space, with the budget capped at the
    /// catalog's total price. Configs bound that total by
    /// `MAX_COMBO_TOTAL_PRICE`.
    pub fn best_combo(&self, budget: u32) -> ComboSelection {
        // Past the catalog total every budget picks the same items.
        let total_price: u64 = self.items.iter().map(|item| u64::from(item.price)).sum();
        let cap = u64::from(budget).min(total_price) as usize;
        let width = cap + 1;
        let n = self.items.len();

        // best[b]: max value with the items seen so far and budget b.
        let mut best = vec![0u64; width];
        let mut take = vec![vec![false; width]; n];

        for (i, item) in self.items.iter().enumerate() {
            let price = item.price as usize;
            // Descending b keeps `best[b - price]` at the previous row.
            for b in (price..width).rev() {
                let with_item = best[b - price] + u64::from(item.value);
                if with_item > best[b] {
                    best[b] = with_item;
                    take[i][b] = true;
                }
            }
        }

        let mut remaining = cap;
        let mut chosen = Vec::new();
        for i in (0..n).rev() {
            if take[i][remaining] {
                chosen.push(self.items[i].clone());
                remaining -= self.items[i].price as usize;
            }
        }
        chosen.reverse();

        let total_cost: u64 = chosen.iter().map(|item| u64::from(item.price)).sum();
        let total_value: u64 = chosen.iter().map(|item| u64::from(item.value)).sum();

        tracing::debug!(
            budget,
            total_cost,
            total_value,
            items = chosen.len(),
            "combo selected"
        );

        ComboSelection {
            budget,
            items: chosen,
            total_cost,
            total_value,
        }
    }
}
