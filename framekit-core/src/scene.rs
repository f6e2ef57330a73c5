/// Minimal entity arena consumed by bounding-volume queries
///
/// Entities live in a flat `Vec` and refer to their children by index, so a
/// parent/child graph may contain cycles. Traversals are expected to guard
/// against revisits.
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SceneError;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Index of an entity inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub usize);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a bounding-volume computation needs from an entity graph.
pub trait EntityGraph {
    /// Points owned by `id` (not its descendants), or `None` for unknown ids.
    fn points(&self, id: EntityId) -> Option<&[Vector]>;

    /// Direct children of `id`, or `None` for unknown ids.
    fn children(&self, id: EntityId) -> Option<Vec<EntityId>>;
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub points: Vec<Vector>,
    pub children: BTreeMap<String, EntityId>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn with_points(name: impl Into<String>, points: Vec<Vector>) -> Self {
        Self {
            points,
            ..Self::new(name)
        }
    }

    /// An entity holding the eight corners of an axis-aligned cube centered
    /// on the origin.
    pub fn cube(name: impl Into<String>, size: f32) -> Self {
        let half = size / 2.0;
        let mut points = Vec::with_capacity(8);
        for &x in &[-half, half] {
            for &y in &[-half, half] {
                for &z in &[-half, half] {
                    points.push(Vector::point(x, y, z));
                }
            }
        }
        Self::with_points(name, points)
    }

    /// Apply `m` to every point in place.
    pub fn transform(&mut self, m: &Matrix) {
        for p in &mut self.points {
            *p = m.multiply_vector(p);
        }
    }
}

/// Arena of entities.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    pub fn add(&mut self, entity: Entity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Register `child` under `parent` as `name`.
    pub fn attach(
        &mut self,
        parent: EntityId,
        name: impl Into<String>,
        child: EntityId,
    ) -> Result<(), SceneError> {
        if self.get(child).is_none() {
            return Err(SceneError::UnknownEntity(child));
        }
        let name = name.into();
        let entity = self
            .entities
            .get_mut(parent.0)
            .ok_or(SceneError::UnknownEntity(parent))?;

        if entity.children.contains_key(&name) {
            return Err(SceneError::DuplicateChild { parent, name });
        }
        entity.children.insert(name, child);
        Ok(())
    }
}

impl EntityGraph for Scene {
    fn points(&self, id: EntityId) -> Option<&[Vector]> {
        self.get(id).map(|e| e.points.as_slice())
    }

    fn children(&self, id: EntityId) -> Option<Vec<EntityId>> {
        self.get(id).map(|e| e.children.values().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_corners() {
        let cube = Entity::cube("box", 2.0);
        assert_eq!(cube.points.len(), 8);
        assert!(cube.points.iter().all(|p| p.x.abs() == 1.0 && p.is_point()));
    }

    #[test]
    fn test_attach_and_lookup() {
        let mut scene = Scene::new();
        let root = scene.add(Entity::new("root"));
        let wheel = scene.add(Entity::cube("wheel", 1.0));
        scene.attach(root, "front_wheel", wheel).unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.children(root), Some(vec![wheel]));
        assert_eq!(scene.points(wheel).map(|p| p.len()), Some(8));
        assert!(scene.points(EntityId(42)).is_none());
    }

    #[test]
    fn test_attach_rejects_duplicates_and_unknown_ids() {
        let mut scene = Scene::new();
        let root = scene.add(Entity::new("root"));
        let child = scene.add(Entity::new("child"));

        scene.attach(root, "c", child).unwrap();
        assert_eq!(
            scene.attach(root, "c", child),
            Err(SceneError::DuplicateChild { parent: root, name: "c".to_string() })
        );
        assert_eq!(
            scene.attach(root, "ghost", EntityId(9)),
            Err(SceneError::UnknownEntity(EntityId(9)))
        );
        assert_eq!(
            scene.attach(EntityId(9), "x", child),
            Err(SceneError::UnknownEntity(EntityId(9)))
        );
    }

    #[test]
    fn test_transform_moves_points() {
        let mut cube = Entity::cube("box", 2.0);
        cube.transform(&Matrix::translate(10.0, 0.0, 0.0));
        assert!(cube.points.iter().all(|p| p.x >= 9.0 && p.x <= 11.0));
    }
}
