//! Timer registry: the list of configurable presets

use tracing::debug;

use super::timer::{default_timers, Timer, TimerField, TimerId};

/// Result of a delete request against the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Rejected: the registry must keep at least one timer
    LastTimer,
    NotFound,
}

/// Ordered list of timers. Never empty.
#[derive(Debug, Clone)]
pub struct TimerRegistry {
    timers: Vec<Timer>,
}

impl TimerRegistry {
    /// Create a registry holding the built-in default timers
    pub fn new() -> Self {
        Self {
            timers: default_timers(),
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.get(id).is_some()
    }

    /// First timer in registry order
    pub fn first(&self) -> &Timer {
        // The registry is never empty
        &self.timers[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    /// Append a new timer with an id one above the current maximum
    pub fn add_timer(&mut self) -> Timer {
        let next_id = self.timers.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let timer = Timer::new_with_id(next_id);
        debug!("Adding timer {} with color {}", timer.id, timer.color);
        self.timers.push(timer.clone());
        timer
    }

    /// Replace one field of a timer. Returns false if the id is unknown.
    pub fn update_timer(&mut self, id: TimerId, field: TimerField) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.apply(field);
                true
            }
            None => false,
        }
    }

    /// Remove a timer unless it is the only one left
    pub fn delete_timer(&mut self, id: TimerId) -> DeleteOutcome {
        let Some(index) = self.timers.iter().position(|t| t.id == id) else {
            return DeleteOutcome::NotFound;
        };
        if self.timers.len() <= 1 {
            return DeleteOutcome::LastTimer;
        }
        self.timers.remove(index);
        DeleteOutcome::Deleted
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &TimerRegistry) -> Vec<TimerId> {
        registry.iter().map(|t| t.id).collect()
    }

    #[test]
    fn add_timer_uses_max_id_plus_one() {
        let mut registry = TimerRegistry::new();
        registry.delete_timer(2);
        let added = registry.add_timer();
        assert_eq!(added.id, 4);
        assert_eq!(ids(&registry), vec![1, 3, 4]);
        assert_eq!(added.name, "New Timer");
        assert_eq!(added.minutes, 25);
        assert_eq!(added.activity, "New Activity");
    }

    #[test]
    fn add_timer_grows_by_exactly_one_with_a_larger_id() {
        let mut registry = TimerRegistry::new();
        for _ in 0..5 {
            let before = registry.len();
            let max_before = registry.iter().map(|t| t.id).max().unwrap();
            let added = registry.add_timer();
            assert_eq!(registry.len(), before + 1);
            assert!(added.id > max_before);
        }
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut registry = TimerRegistry::new();
        let untouched: Vec<Timer> = registry.iter().filter(|t| t.id != 2).cloned().collect();
        assert_eq!(registry.delete_timer(2), DeleteOutcome::Deleted);
        let remaining: Vec<Timer> = registry.iter().cloned().collect();
        assert_eq!(remaining, untouched);
    }

    #[test]
    fn delete_last_timer_is_rejected() {
        let mut registry = TimerRegistry::new();
        registry.delete_timer(1);
        registry.delete_timer(2);
        assert_eq!(registry.delete_timer(3), DeleteOutcome::LastTimer);
        assert_eq!(ids(&registry), vec![3]);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut registry = TimerRegistry::new();
        assert_eq!(registry.delete_timer(42), DeleteOutcome::NotFound);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut registry = TimerRegistry::new();
        let before: Vec<Timer> = registry.iter().cloned().collect();
        assert!(!registry.update_timer(9, TimerField::Name("x".to_string())));
        let after: Vec<Timer> = registry.iter().cloned().collect();
        assert_eq!(before, after);
    }
}
