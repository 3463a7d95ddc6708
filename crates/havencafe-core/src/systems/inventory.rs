//! Inventory - slot containers, stacking, and spoilage

use havencafe_logic::constants::{
    INVENTORY_CARRIED_SLOTS, INVENTORY_FRIDGE_SLOTS, INVENTORY_STORAGE_SLOTS, ITEM_STACK_SIZE,
};
use havencafe_logic::ingredients;
use serde::{Deserialize, Serialize};

/// A stack of identical ingredients in one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub ingredient: String,
    /// Quality multiplier, 0.7-1.3.
    pub quality: f32,
    pub quantity: u32,
    /// Days left before the stack spoils; None never spoils.
    pub days_until_spoil: Option<u8>,
}

impl ItemStack {
    /// A fresh stack, with the spoil timer from the ingredient catalog.
    pub fn fresh(ingredient: impl Into<String>, quality: f32, quantity: u32) -> Self {
        let ingredient = ingredient.into();
        let days_until_spoil = ingredients::get(&ingredient)
            .filter(|def| def.spoil_days > 0)
            .map(|def| def.spoil_days);
        Self {
            ingredient,
            quality,
            quantity,
            days_until_spoil,
        }
    }

    pub fn is_spoiled(&self) -> bool {
        self.days_until_spoil == Some(0)
    }
}

/// A fixed number of item slots. The fridge variant stops spoilage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub slots: Vec<Option<ItemStack>>,
    pub prevents_spoilage: bool,
}

impl Container {
    pub fn new(max_slots: usize, prevents_spoilage: bool) -> Self {
        Self {
            slots: vec![None; max_slots],
            prevents_spoilage,
        }
    }

    pub fn max_slots(&self) -> usize {
        self.slots.len()
    }

    /// Add a stack, merging with compatible stacks first. Returns the
    /// overflow that didn't fit.
    pub fn add(&mut self, stack: ItemStack) -> u32 {
        let mut remaining = stack.quantity;

        // Merge into stacks of the same ingredient on the same spoil timer
        for slot in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.ingredient == stack.ingredient
                && slot.days_until_spoil == stack.days_until_spoil
                && slot.quantity < ITEM_STACK_SIZE
            {
                let space = ITEM_STACK_SIZE - slot.quantity;
                let moved = space.min(remaining);
                // Blend quality by weight so a merge never loses value
                let total = (slot.quantity + moved) as f32;
                slot.quality =
                    (slot.quality * slot.quantity as f32 + stack.quality * moved as f32) / total;
                slot.quantity += moved;
                remaining -= moved;
            }
        }

        // Fill empty slots
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = ITEM_STACK_SIZE.min(remaining);
                *slot = Some(ItemStack {
                    quantity: moved,
                    ..stack.clone()
                });
                remaining -= moved;
            }
        }

        remaining
    }

    /// Remove up to `quantity` of an ingredient, soonest-to-spoil first.
    /// Returns how many were removed.
    pub fn remove(&mut self, ingredient: &str, quantity: u32) -> u32 {
        let mut remaining = quantity;

        // Order slot indices by spoil urgency
        let mut indices: Vec<usize> = (0..self.slots.len())
            .filter(|&i| {
                self.slots[i]
                    .as_ref()
                    .is_some_and(|slot| slot.ingredient == ingredient)
            })
            .collect();
        indices.sort_by_key(|&i| {
            self.slots[i]
                .as_ref()
                .and_then(|slot| slot.days_until_spoil)
                .unwrap_or(u8::MAX)
        });

        for i in indices {
            if remaining == 0 {
                break;
            }
            let Some(slot) = self.slots[i].as_mut() else {
                continue;
            };
            let taken = slot.quantity.min(remaining);
            slot.quantity -= taken;
            remaining -= taken;
            if slot.quantity == 0 {
                self.slots[i] = None;
            }
        }
        quantity - remaining
    }

    pub fn count(&self, ingredient: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.ingredient == ingredient)
            .map(|slot| slot.quantity)
            .sum()
    }

    /// Average quality of an ingredient across the container's stacks.
    pub fn average_quality(&self, ingredient: &str) -> Option<f32> {
        let mut total_quantity = 0u32;
        let mut weighted = 0.0f32;
        for slot in self.slots.iter().flatten() {
            if slot.ingredient == ingredient {
                total_quantity += slot.quantity;
                weighted += slot.quality * slot.quantity as f32;
            }
        }
        (total_quantity > 0).then(|| weighted / total_quantity as f32)
    }

    pub fn used_slots(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots() - self.used_slots()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Tick spoil timers and delete spoiled stacks. Returns what was lost
    /// as (ingredient, quantity).
    pub fn advance_day(&mut self) -> Vec<(String, u32)> {
        if self.prevents_spoilage {
            return Vec::new();
        }
        let mut lost = Vec::new();
        for slot in self.slots.iter_mut() {
            if let Some(stack) = slot {
                if let Some(days) = stack.days_until_spoil.as_mut() {
                    *days = days.saturating_sub(1);
                }
                if stack.is_spoiled() {
                    lost.push((stack.ingredient.clone(), stack.quantity));
                    *slot = None;
                }
            }
        }
        lost
    }

    /// Group stacks by category then name, empty slots at the end.
    pub fn sort(&mut self) {
        let mut stacks: Vec<ItemStack> = self.slots.iter_mut().filter_map(Option::take).collect();
        stacks.sort_by_key(|stack| {
            let def = ingredients::get(&stack.ingredient);
            (
                def.map(|d| d.category as u8).unwrap_or(u8::MAX),
                def.map(|d| d.name).unwrap_or(""),
            )
        });
        for (slot, stack) in self.slots.iter_mut().zip(stacks) {
            *slot = Some(stack);
        }
    }

    /// Grow the container by `amount` slots.
    pub fn expand(&mut self, amount: usize) {
        self.slots.extend(std::iter::repeat_with(|| None).take(amount));
    }
}

/// Which container an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Carried,
    Storage,
    Fridge,
}

/// All player storage: carried pack, cafe pantry, and the fridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub carried: Container,
    pub storage: Container,
    pub fridge: Container,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            carried: Container::new(INVENTORY_CARRIED_SLOTS, false),
            storage: Container::new(INVENTORY_STORAGE_SLOTS, false),
            fridge: Container::new(INVENTORY_FRIDGE_SLOTS, true),
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn container_mut(&mut self, kind: ContainerKind) -> &mut Container {
        match kind {
            ContainerKind::Carried => &mut self.carried,
            ContainerKind::Storage => &mut self.storage,
            ContainerKind::Fridge => &mut self.fridge,
        }
    }

    /// Add to the carried pack; returns overflow.
    pub fn add_item(&mut self, ingredient: &str, quality: f32, quantity: u32) -> u32 {
        self.carried.add(ItemStack::fresh(ingredient, quality, quantity))
    }

    /// Total count across all containers.
    pub fn count(&self, ingredient: &str) -> u32 {
        self.carried.count(ingredient) + self.storage.count(ingredient) + self.fridge.count(ingredient)
    }

    pub fn has(&self, ingredient: &str, quantity: u32) -> bool {
        self.count(ingredient) >= quantity
    }

    /// Remove across containers, soonest-to-spoil containers first
    /// (carried, then storage, then fridge). Returns how many were removed.
    pub fn remove(&mut self, ingredient: &str, quantity: u32) -> u32 {
        let mut removed = self.carried.remove(ingredient, quantity);
        if removed < quantity {
            removed += self.storage.remove(ingredient, quantity - removed);
        }
        if removed < quantity {
            removed += self.fridge.remove(ingredient, quantity - removed);
        }
        removed
    }

    /// Average quality across every stack of an ingredient.
    pub fn average_quality(&self, ingredient: &str) -> f32 {
        let containers = [&self.carried, &self.storage, &self.fridge];
        let mut total = 0u32;
        let mut weighted = 0.0f32;
        for container in containers {
            for slot in container.slots.iter().flatten() {
                if slot.ingredient == ingredient {
                    total += slot.quantity;
                    weighted += slot.quality * slot.quantity as f32;
                }
            }
        }
        if total == 0 {
            1.0
        } else {
            weighted / total as f32
        }
    }

    /// Move items between containers, preserving spoil timers. Returns how
    /// many were actually moved.
    pub fn transfer(
        &mut self,
        ingredient: &str,
        quantity: u32,
        from: ContainerKind,
        to: ContainerKind,
    ) -> u32 {
        if from == to {
            return 0;
        }
        // Pull out stacks one slot at a time so timers survive the move
        let mut moved = 0;
        while moved < quantity {
            let source = self.container_mut(from);
            let index = source.slots.iter().position(|slot| {
                slot.as_ref().is_some_and(|stack| stack.ingredient == ingredient)
            });
            let Some(index) = index else { break };
            let Some(mut stack) = source.slots[index].take() else {
                break;
            };

            let take = stack.quantity.min(quantity - moved);
            let mut portion = stack.clone();
            portion.quantity = take;
            stack.quantity -= take;
            if stack.quantity > 0 {
                source.slots[index] = Some(stack);
            }

            let mut leftover = portion.clone();
            let overflow = self.container_mut(to).add(portion);
            let accepted = take - overflow;
            moved += accepted;
            if overflow > 0 {
                // Destination full: put the remainder back
                leftover.quantity = overflow;
                self.container_mut(from).add(leftover);
                break;
            }
        }
        moved
    }

    /// Daily spoilage across all containers.
    pub fn advance_day(&mut self) -> Vec<(String, u32)> {
        let mut lost = self.carried.advance_day();
        lost.extend(self.storage.advance_day());
        lost.extend(self.fridge.advance_day());
        lost
    }

    pub fn sort_all(&mut self) {
        self.carried.sort();
        self.storage.sort();
        self.fridge.sort();
    }

    pub fn expand(&mut self, kind: ContainerKind, amount: usize) {
        self.container_mut(kind).expand(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_then_fills() {
        let mut container = Container::new(3, false);
        assert_eq!(container.add(ItemStack::fresh("wild_berry", 1.0, 7)), 0);
        assert_eq!(container.add(ItemStack::fresh("wild_berry", 1.0, 7)), 0);
        // 14 berries: one full stack of 10, one of 4 = 2 slots
        assert_eq!(container.used_slots(), 2);
        assert_eq!(container.count("wild_berry"), 14);
    }

    #[test]
    fn test_overflow_reported() {
        let mut container = Container::new(1, false);
        assert_eq!(container.add(ItemStack::fresh("wild_berry", 1.0, 15)), 5);
        assert_eq!(container.count("wild_berry"), 10);
    }

    #[test]
    fn test_remove_spoilage_order() {
        let mut container = Container::new(4, false);
        let mut old = ItemStack::fresh("wild_berry", 1.0, 5);
        old.days_until_spoil = Some(1);
        container.add(old);
        container.add(ItemStack::fresh("wild_berry", 1.0, 5)); // 2 days

        assert_eq!(container.remove("wild_berry", 5), 5);
        // The soon-to-spoil stack went first
        let remaining: Vec<_> = container.slots.iter().flatten().collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].days_until_spoil, Some(2));
    }

    #[test]
    fn test_spoilage() {
        let mut container = Container::new(4, false);
        container.add(ItemStack::fresh("edible_flower", 1.0, 3)); // spoils in 1 day
        container.add(ItemStack::fresh("golden_honey", 1.0, 2)); // never spoils

        let lost = container.advance_day();
        assert_eq!(lost, vec![("edible_flower".to_string(), 3)]);
        assert_eq!(container.count("edible_flower"), 0);
        assert_eq!(container.count("golden_honey"), 2);
    }

    #[test]
    fn test_fridge_prevents_spoilage() {
        let mut fridge = Container::new(4, true);
        fridge.add(ItemStack::fresh("edible_flower", 1.0, 3));
        for _ in 0..5 {
            assert!(fridge.advance_day().is_empty());
        }
        assert_eq!(fridge.count("edible_flower"), 3);
    }

    #[test]
    fn test_inventory_spanning_queries() {
        let mut inventory = Inventory::new();
        inventory.carried.add(ItemStack::fresh("wild_berry", 1.0, 3));
        inventory.storage.add(ItemStack::fresh("wild_berry", 1.0, 4));
        assert_eq!(inventory.count("wild_berry"), 7);
        assert!(inventory.has("wild_berry", 7));
        assert!(!inventory.has("wild_berry", 8));

        assert_eq!(inventory.remove("wild_berry", 5), 5);
        assert_eq!(inventory.count("wild_berry"), 2);
    }

    #[test]
    fn test_transfer_preserves_spoil_timer() {
        let mut inventory = Inventory::new();
        let mut stack = ItemStack::fresh("wild_berry", 1.2, 4);
        stack.days_until_spoil = Some(1);
        inventory.carried.add(stack);

        let moved = inventory.transfer("wild_berry", 4, ContainerKind::Carried, ContainerKind::Fridge);
        assert_eq!(moved, 4);
        let fridge_stack = inventory.fridge.slots.iter().flatten().next().unwrap();
        assert_eq!(fridge_stack.days_until_spoil, Some(1));
        assert!((fridge_stack.quality - 1.2).abs() < 0.001);
    }

    #[test]
    fn test_sort_groups_by_category() {
        let mut container = Container::new(6, false);
        container.add(ItemStack::fresh("golden_honey", 1.0, 1)); // Special
        container.add(ItemStack::fresh("field_mushroom", 1.0, 1)); // Vegetable
        container.add(ItemStack::fresh("wild_berry", 1.0, 1)); // Fruit
        container.sort();

        let order: Vec<&str> = container
            .slots
            .iter()
            .flatten()
            .map(|stack| stack.ingredient.as_str())
            .collect();
        assert_eq!(order, vec!["field_mushroom", "wild_berry", "golden_honey"]);
    }

    #[test]
    fn test_expand() {
        let mut inventory = Inventory::new();
        let before = inventory.carried.max_slots();
        inventory.expand(ContainerKind::Carried, 5);
        assert_eq!(inventory.carried.max_slots(), before + 5);
    }

    #[test]
    fn test_average_quality_weighted() {
        let mut inventory = Inventory::new();
        inventory.carried.add(ItemStack::fresh("wild_berry", 0.7, 1));
        let mut good = ItemStack::fresh("wild_berry", 1.3, 3);
        // Different timer so the stacks don't merge and average out
        good.days_until_spoil = Some(1);
        inventory.carried.add(good);
        let avg = inventory.average_quality("wild_berry");
        assert!((avg - (0.7 + 1.3 * 3.0) / 4.0).abs() < 0.001);
    }
}
