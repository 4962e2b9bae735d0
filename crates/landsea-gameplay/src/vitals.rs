//! Survival vitals: health, stamina and hunger.

use landsea_common::Nourishment;
use landsea_world::RestEffect;
use serde::{Deserialize, Serialize};

/// Stamina regained per second.
pub const STAMINA_REGEN: f32 = 10.0;
/// Hunger lost per second.
pub const HUNGER_DECAY: f32 = 0.2;
/// Health lost per second while starving.
pub const STARVATION_DAMAGE: f32 = 1.0;

/// A bounded value that starts full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    current: f32,
    max: f32,
}

impl Stat {
    /// A full stat.
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Current value.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Maximum value.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Value as a fraction (0.0-1.0).
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Adds up to the maximum.
    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Subtracts down to zero.
    pub fn deplete(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Whether the value is zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// The player's vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Health, 0 means dead
    pub health: Stat,
    /// Spent by attacking, regenerates
    pub stamina: Stat,
    /// Decays over time; starvation hurts
    pub hunger: Stat,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: Stat::new(100.0),
            stamina: Stat::new(100.0),
            hunger: Stat::new(100.0),
        }
    }
}

impl Vitals {
    /// Advances regeneration and decay.
    pub fn update(&mut self, dt: f32) {
        self.stamina.restore(STAMINA_REGEN * dt);
        self.hunger.deplete(HUNGER_DECAY * dt);
        if self.hunger.is_depleted() {
            self.health.deplete(STARVATION_DAMAGE * dt);
        }
    }

    /// Spends stamina if enough is available.
    pub fn try_spend_stamina(&mut self, amount: f32) -> bool {
        if self.stamina.current() < amount {
            return false;
        }
        self.stamina.deplete(amount);
        true
    }

    /// Applies food.
    pub fn eat(&mut self, nourishment: Nourishment) {
        self.hunger.restore(nourishment.hunger);
        self.health.restore(nourishment.health);
    }

    /// Applies a campfire rest.
    pub fn rest(&mut self, effect: RestEffect) {
        self.health.restore(effect.heal);
        self.stamina.restore(effect.stamina);
    }

    /// Whether health has run out.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health.is_depleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landsea_world::CAMPFIRE_REST;

    #[test]
    fn test_hunger_decays_then_starves() {
        let mut vitals = Vitals::default();
        for _ in 0..490 {
            vitals.update(1.0);
        }
        assert!(!vitals.hunger.is_depleted());
        assert!((vitals.health.current() - 100.0).abs() < f32::EPSILON);

        for _ in 0..20 {
            vitals.update(1.0);
        }
        assert!(vitals.hunger.is_depleted());
        assert!(vitals.health.current() < 95.0);
        assert!(!vitals.is_dead());
    }

    #[test]
    fn test_stamina_spend_and_regen() {
        let mut vitals = Vitals::default();
        for _ in 0..20 {
            assert!(vitals.try_spend_stamina(5.0));
        }
        assert!(!vitals.try_spend_stamina(5.0));
        vitals.update(0.5);
        assert!(vitals.try_spend_stamina(5.0));
    }

    #[test]
    fn test_eat_and_rest_are_capped() {
        let mut vitals = Vitals::default();
        vitals.hunger.deplete(20.0);
        vitals.health.deplete(30.0);
        vitals.stamina.deplete(90.0);

        vitals.eat(Nourishment::new(30.0, 5.0));
        assert!((vitals.hunger.current() - 100.0).abs() < f32::EPSILON);
        assert!((vitals.health.current() - 75.0).abs() < f32::EPSILON);

        vitals.rest(CAMPFIRE_REST);
        assert!((vitals.health.current() - 85.0).abs() < f32::EPSILON);
        assert!((vitals.stamina.current() - 60.0).abs() < f32::EPSILON);
    }
}
