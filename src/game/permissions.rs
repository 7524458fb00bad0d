//! Alliance permissions as an explicit enumerated set

use serde::{Deserialize, Serialize};

use crate::core::types::Faction;

/// A named permission a faction may grant to its ally
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Permission {
    /// Ship at the Guild's half rate
    ShipAtGuildRate = 0,
    /// Ship between two locations on the board
    ShipCrossBoard = 1,
    /// Use the Atreides prescience in our battles
    UsePrescience = 2,
    /// Use the Bene Gesserit voice in our battles
    UseVoice = 3,
    /// Call traitors held by the ally
    UseAllyTraitors = 4,
    /// Spend ally spice on shipments
    SpiceForShipment = 5,
    /// Spend ally spice on the battle dial
    SpiceForBattle = 6,
    /// Fremen shelter: our forces do not suffer storm losses
    StormShelter = 7,
    /// Revive from the Tleilaxu tanks at the Tleilaxu price
    TleilaxuRevival = 8,
    /// Ixian peek at the card up for bid
    SeeAuctionCard = 9,
}

impl Permission {
    pub const ALL: [Permission; 10] = [
        Permission::ShipAtGuildRate,
        Permission::ShipCrossBoard,
        Permission::UsePrescience,
        Permission::UseVoice,
        Permission::UseAllyTraitors,
        Permission::SpiceForShipment,
        Permission::SpiceForBattle,
        Permission::StormShelter,
        Permission::TleilaxuRevival,
        Permission::SeeAuctionCard,
    ];

    fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// A set of permissions, stored as a bit mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(u32);

impl PermissionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(permissions: &[Permission]) -> Self {
        let mut set = Self::empty();
        for p in permissions {
            set.insert(*p);
        }
        set
    }

    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !permission.bit();
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

/// Permissions a faction is able to grant to its ally
pub fn permissions_for_ally(faction: Faction) -> PermissionSet {
    match faction {
        Faction::Guild => PermissionSet::of(&[Permission::ShipAtGuildRate, Permission::ShipCrossBoard]),
        Faction::Atreides => PermissionSet::of(&[Permission::UsePrescience]),
        Faction::BeneGesserit => PermissionSet::of(&[Permission::UseVoice]),
        Faction::Harkonnen => PermissionSet::of(&[Permission::UseAllyTraitors]),
        Faction::Emperor | Faction::Choam => {
            PermissionSet::of(&[Permission::SpiceForShipment, Permission::SpiceForBattle])
        }
        Faction::Fremen => PermissionSet::of(&[Permission::StormShelter]),
        Faction::Tleilaxu => PermissionSet::of(&[Permission::TleilaxuRevival]),
        Faction::Ixian => PermissionSet::of(&[Permission::SeeAuctionCard]),
        Faction::Richese => PermissionSet::of(&[Permission::SpiceForShipment]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut set = PermissionSet::empty();
        set.insert(Permission::UseVoice);
        assert!(set.contains(Permission::UseVoice));
        set.remove(Permission::UseVoice);
        assert!(set.is_empty());
    }

    #[test]
    fn test_iter_returns_declaration_order() {
        let set = PermissionSet::of(&[Permission::SpiceForBattle, Permission::ShipAtGuildRate]);
        let listed: Vec<_> = set.iter().collect();
        assert_eq!(listed, vec![Permission::ShipAtGuildRate, Permission::SpiceForBattle]);
    }

    #[test]
    fn test_every_faction_grants_something() {
        for faction in Faction::ALL {
            assert!(!permissions_for_ally(faction).is_empty(), "{} grants nothing", faction);
        }
    }
}
