//! The single active player, shared with everything that needs to find it.

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("player {attempted} tried to register while {current} is already registered")]
    AlreadyRegistered { current: Entity, attempted: Entity },
}

/// Registration of the one active player.
///
/// The first registration wins. A second one is rejected and reported, and
/// the existing registration is kept.
#[derive(Resource, Debug, Default)]
pub struct PlayerRegistry {
    current: Option<Entity>,
}

impl PlayerRegistry {
    pub fn register(&mut self, player: Entity) -> Result<(), RegistryError> {
        if let Some(current) = self.current {
            return Err(RegistryError::AlreadyRegistered {
                current,
                attempted: player,
            });
        }
        self.current = Some(player);
        Ok(())
    }

    /// Clear the registration if `player` holds it. Returns whether it did.
    pub fn unregister(&mut self, player: Entity) -> bool {
        if self.current == Some(player) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_wins() {
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        let mut registry = PlayerRegistry::default();

        assert_eq!(registry.register(first), Ok(()));
        assert_eq!(
            registry.register(second),
            Err(RegistryError::AlreadyRegistered {
                current: first,
                attempted: second,
            })
        );
        assert_eq!(registry.current(), Some(first));
    }

    #[test]
    fn only_the_holder_can_unregister() {
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        let mut registry = PlayerRegistry::default();
        registry.register(first).unwrap();

        assert!(!registry.unregister(second));
        assert_eq!(registry.current(), Some(first));

        assert!(registry.unregister(first));
        assert_eq!(registry.current(), None);
        assert_eq!(registry.register(second), Ok(()));
    }
}
