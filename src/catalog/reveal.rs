//! Ventana visible por categoría ("ver más" / "ver menos")

use serde::{Deserialize, Serialize};

use super::categorizer::Category;

/// Prefijo visible de una lista: los primeros `window` elementos si no está
/// expandida y es más larga que la ventana; si no, la lista entera.
pub fn visible_slice<T>(items: &[T], expanded: bool, window: usize) -> &[T] {
    if !expanded && items.len() > window {
        &items[..window]
    } else {
        items
    }
}

/// Cuántos elementos quedan detrás del botón "ver más"
pub fn hidden_count(len: usize, expanded: bool, window: usize) -> usize {
    if expanded {
        0
    } else {
        len.saturating_sub(window)
    }
}

/// Flags de expansión, independientes por categoría
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    pub normal: bool,
    pub premium: bool,
    pub pickup: bool,
    pub bus: bool,
}

impl RevealState {
    pub fn is_expanded(&self, category: Category) -> bool {
        match category {
            Category::Normal => self.normal,
            Category::Premium => self.premium,
            Category::Pickup => self.pickup,
            Category::Bus => self.bus,
        }
    }

    pub fn set(&mut self, category: Category, expanded: bool) {
        let flag = match category {
            Category::Normal => &mut self.normal,
            Category::Premium => &mut self.premium,
            Category::Pickup => &mut self.pickup,
            Category::Bus => &mut self.bus,
        };
        *flag = expanded;
    }

    pub fn toggle(&mut self, category: Category) {
        let expanded = self.is_expanded(category);
        self.set(category, !expanded);
    }

    pub fn collapse_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_of_six() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(visible_slice(&items, false, 6), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(visible_slice(&items, true, 6).len(), 10);
        assert_eq!(hidden_count(items.len(), false, 6), 4);
        assert_eq!(hidden_count(items.len(), true, 6), 0);
    }

    #[test]
    fn test_short_lists_are_shown_whole() {
        let items = [1, 2, 3, 4, 5, 6];
        assert_eq!(visible_slice(&items, false, 6).len(), 6);
        assert_eq!(hidden_count(items.len(), false, 6), 0);
        let empty: [u8; 0] = [];
        assert!(visible_slice(&empty, false, 6).is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut state = RevealState::default();
        state.toggle(Category::Premium);
        assert!(state.is_expanded(Category::Premium));
        assert!(!state.is_expanded(Category::Normal));
        assert!(!state.is_expanded(Category::Pickup));
        assert!(!state.is_expanded(Category::Bus));

        state.toggle(Category::Bus);
        state.toggle(Category::Premium);
        assert!(!state.is_expanded(Category::Premium));
        assert!(state.is_expanded(Category::Bus));

        state.collapse_all();
        assert_eq!(state, RevealState::default());
    }
}
