//! Entity store
//!
//! Owns entity identities, their tags and every component table.
//! Both halves of the lifecycle are two-phase:
//! - `add_entity` stages a new entity; it becomes visible at the next `update`
//! - `destroy` marks an entity inactive at once; `update` physically removes it
//!
//! Queries only ever return committed, active entities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::components::Components;

/// Stable numeric entity identity (never reused within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    #[cfg(test)]
    pub(crate) fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Role of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Player,
    LargeEnemy,
    SmallEnemy,
    Bullet,
    SpecialWeapon,
}

impl Tag {
    pub const COUNT: usize = 5;

    #[inline]
    fn index(self) -> usize {
        match self {
            Tag::Player => 0,
            Tag::LargeEnemy => 1,
            Tag::SmallEnemy => 2,
            Tag::Bullet => 3,
            Tag::SpecialWeapon => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Player => "player",
            Tag::LargeEnemy => "largeEnemy",
            Tag::SmallEnemy => "smallEnemy",
            Tag::Bullet => "bullet",
            Tag::SpecialWeapon => "specialWeapon",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct EntityMeta {
    tag: Tag,
    active: bool,
    /// Not yet committed by `update`
    pending: bool,
}

/// Owner of all entities and their components
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Every entity the store knows about, committed or pending
    meta: HashMap<EntityId, EntityMeta>,
    /// Committed entities in creation order
    live: Vec<EntityId>,
    /// Committed entities per tag, same order as `live`
    by_tag: [Vec<EntityId>; Tag::COUNT],
    /// Added since the last `update`
    pending: Vec<EntityId>,
    next_id: u32,
    pub components: Components,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new entity; it is committed by the next `update`
    pub fn add_entity(&mut self, tag: Tag) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.meta.insert(
            id,
            EntityMeta {
                tag,
                active: true,
                pending: true,
            },
        );
        self.pending.push(id);
        id
    }

    /// Mark an entity inactive; no-op for unknown ids
    pub fn destroy(&mut self, id: EntityId) {
        if let Some(meta) = self.meta.get_mut(&id) {
            meta.active = false;
        }
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.meta.get(&id).is_some_and(|m| m.active)
    }

    /// Committed (not pending) and active
    pub fn is_live(&self, id: EntityId) -> bool {
        self.meta.get(&id).is_some_and(|m| m.active && !m.pending)
    }

    pub fn tag(&self, id: EntityId) -> Option<Tag> {
        self.meta.get(&id).map(|m| m.tag)
    }

    /// All committed, active entities in creation order
    pub fn entities(&self) -> Vec<EntityId> {
        self.live
            .iter()
            .copied()
            .filter(|id| self.is_active(*id))
            .collect()
    }

    /// Committed, active entities with `tag`
    pub fn entities_with_tag(&self, tag: Tag) -> Vec<EntityId> {
        self.by_tag[tag.index()]
            .iter()
            .copied()
            .filter(|id| self.is_active(*id))
            .collect()
    }

    /// Number of committed, active entities
    pub fn len(&self) -> usize {
        self.live.iter().filter(|id| self.is_active(**id)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of committed, active entities with `tag`
    pub fn count(&self, tag: Tag) -> usize {
        self.by_tag[tag.index()]
            .iter()
            .filter(|id| self.is_active(**id))
            .count()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Sync point: purge inactive entities, then commit pending ones
    pub fn update(&mut self) {
        let mut removed = Vec::new();
        for id in self.live.iter().chain(self.pending.iter()) {
            if !self.is_active(*id) {
                removed.push(*id);
            }
        }
        for id in &removed {
            self.meta.remove(id);
            self.components.remove_all(*id);
        }

        let meta = &self.meta;
        self.live.retain(|id| meta.contains_key(id));
        for list in &mut self.by_tag {
            list.retain(|id| meta.contains_key(id));
        }

        for id in self.pending.drain(..) {
            if let Some(m) = self.meta.get_mut(&id) {
                m.pending = false;
                self.live.push(id);
                self.by_tag[m.tag.index()].push(id);
            }
        }

        if !removed.is_empty() {
            log::trace!("Store sync removed {} entities, {} live", removed.len(), self.live.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::components::{Collision, Transform};

    #[test]
    fn test_added_entity_pending_until_update() {
        let mut store = EntityStore::new();
        let id = store.add_entity(Tag::Bullet);
        assert!(store.is_active(id));
        assert!(!store.is_live(id));
        assert!(store.entities().is_empty());
        assert_eq!(store.pending_len(), 1);

        store.update();
        assert_eq!(store.entities(), vec![id]);
        assert_eq!(store.entities_with_tag(Tag::Bullet), vec![id]);
        assert!(store.entities_with_tag(Tag::LargeEnemy).is_empty());
        assert!(store.is_live(id));
    }

    #[test]
    fn test_destroy_hides_immediately_and_purges_on_update() {
        let mut store = EntityStore::new();
        let a = store.add_entity(Tag::LargeEnemy);
        let b = store.add_entity(Tag::LargeEnemy);
        store.components.transforms.insert(a, Transform::default());
        store.components.collisions.insert(a, Collision { radius: 1.0 });
        store.update();

        store.destroy(a);
        assert!(!store.is_active(a));
        assert_eq!(store.entities_with_tag(Tag::LargeEnemy), vec![b]);
        // Still physically present until the sync point
        assert!(store.components.transforms.contains(a));

        store.update();
        assert!(!store.components.transforms.contains(a));
        assert!(!store.components.collisions.contains(a));
        assert_eq!(store.tag(a), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_destroying_pending_entity_never_commits_it() {
        let mut store = EntityStore::new();
        let id = store.add_entity(Tag::SmallEnemy);
        store.components.transforms.insert(id, Transform::default());
        store.destroy(id);
        store.update();
        assert!(store.is_empty());
        assert!(store.components.transforms.is_empty());
    }

    #[test]
    fn test_is_live_tracks_commit_and_destroy() {
        let mut store = EntityStore::new();
        let a = store.add_entity(Tag::Bullet);
        store.update();
        let b = store.add_entity(Tag::Bullet);
        assert!(store.is_live(a));
        assert!(!store.is_live(b));

        store.update();
        assert!(store.is_live(b));
        store.destroy(b);
        assert!(!store.is_live(b));
        store.update();
        assert!(!store.is_live(b));
        assert!(store.is_live(a));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = EntityStore::new();
        let a = store.add_entity(Tag::Bullet);
        store.destroy(a);
        store.update();
        let b = store.add_entity(Tag::Bullet);
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_creation_order_preserved_across_tags() {
        let mut store = EntityStore::new();
        let ids: Vec<_> = [Tag::Player, Tag::Bullet, Tag::LargeEnemy, Tag::Bullet]
            .into_iter()
            .map(|t| store.add_entity(t))
            .collect();
        store.update();
        assert_eq!(store.entities(), ids);
        assert_eq!(store.entities_with_tag(Tag::Bullet), vec![ids[1], ids[3]]);
        assert_eq!(store.count(Tag::Bullet), 2);
    }
}
