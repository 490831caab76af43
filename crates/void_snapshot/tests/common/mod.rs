//! Minimal in-memory host used by the integration tests
//!
//! Implements the full collaborator surface: an arena world with a class
//! registry, actors with field maps, components with optional
//! spatial/physics/movement capabilities, and a recording controller.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use void_snapshot::prelude::*;

use glam::Vec3;

/// Physics state of a mock component
#[derive(Debug, Clone, Default)]
pub struct MockPhysics {
    pub linear: Vec3,
    pub angular: Vec3,
    pub simulating: bool,
    pub mass_recomputes: u32,
}

/// Movement state of a mock component
#[derive(Debug, Clone, Default)]
pub struct MockMovement {
    pub velocity: Vec3,
    pub change_notifications: u32,
}

/// A component with capability sets chosen per test
#[derive(Debug, Clone)]
pub struct MockComponent {
    pub class: ClassId,
    pub name: String,
    pub fields: BTreeMap<String, FieldValue>,
    pub relative_transform: Option<Transform>,
    pub physics: Option<MockPhysics>,
    pub movement: Option<MockMovement>,
    pub teleports: u32,
}

impl MockComponent {
    pub fn new(name: &str) -> Self {
        Self {
            class: ClassId::from_name(name),
            name: name.to_owned(),
            fields: BTreeMap::new(),
            relative_transform: None,
            physics: None,
            movement: None,
            teleports: 0,
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_owned(), value.into());
        self
    }

    pub fn with_relative_transform(mut self, transform: Transform) -> Self {
        self.relative_transform = Some(transform);
        self
    }

    pub fn with_physics(mut self, linear: Vec3, angular: Vec3, simulating: bool) -> Self {
        self.physics = Some(MockPhysics {
            linear,
            angular,
            simulating,
            mass_recomputes: 0,
        });
        self
    }

    pub fn with_movement(mut self, velocity: Vec3) -> Self {
        self.movement = Some(MockMovement {
            velocity,
            change_notifications: 0,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl Persist for MockComponent {
    fn write_fields(&self, writer: &mut FieldWriter) {
        for (name, value) in &self.fields {
            writer.field(name.as_str(), value.clone());
        }
    }

    fn read_field(&mut self, name: &str, value: &FieldValue) -> bool {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value.clone();
                true
            }
            None => false,
        }
    }
}

impl Spatial for MockComponent {
    fn relative_transform(&self) -> Transform {
        self.relative_transform.unwrap_or(Transform::IDENTITY)
    }

    fn set_relative_transform(&mut self, transform: Transform, _teleport: Teleport) {
        self.relative_transform = Some(transform);
        self.teleports += 1;
    }
}

impl PhysicsBody for MockComponent {
    fn linear_velocity(&self) -> Vec3 {
        self.physics.as_ref().map(|p| p.linear).unwrap_or(Vec3::ZERO)
    }

    fn angular_velocity(&self) -> Vec3 {
        self.physics.as_ref().map(|p| p.angular).unwrap_or(Vec3::ZERO)
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        if let Some(physics) = self.physics.as_mut() {
            physics.linear = velocity;
        }
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        if let Some(physics) = self.physics.as_mut() {
            physics.angular = velocity;
        }
    }

    fn is_simulating(&self) -> bool {
        self.physics.as_ref().map(|p| p.simulating).unwrap_or(false)
    }

    fn recompute_mass_properties(&mut self) {
        if let Some(physics) = self.physics.as_mut() {
            physics.mass_recomputes += 1;
        }
    }
}

impl Movement for MockComponent {
    fn velocity(&self) -> Vec3 {
        self.movement
            .as_ref()
            .map(|m| m.velocity)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(movement) = self.movement.as_mut() {
            movement.velocity = velocity;
        }
    }

    fn velocity_changed(&mut self) {
        if let Some(movement) = self.movement.as_mut() {
            movement.change_notifications += 1;
        }
    }
}

impl Component for MockComponent {
    fn class(&self) -> ClassId {
        self.class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn spatial(&self) -> Option<&dyn Spatial> {
        self.relative_transform.as_ref().map(|_| self as &dyn Spatial)
    }

    fn spatial_mut(&mut self) -> Option<&mut dyn Spatial> {
        if self.relative_transform.is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn physics(&self) -> Option<&dyn PhysicsBody> {
        self.physics.as_ref().map(|_| self as &dyn PhysicsBody)
    }

    fn physics_mut(&mut self) -> Option<&mut dyn PhysicsBody> {
        if self.physics.is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn movement(&self) -> Option<&dyn Movement> {
        self.movement.as_ref().map(|_| self as &dyn Movement)
    }

    fn movement_mut(&mut self) -> Option<&mut dyn Movement> {
        if self.movement.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

/// A live actor in the mock world
#[derive(Debug, Clone)]
pub struct MockActor {
    pub class: ClassId,
    pub name: String,
    pub transform: Transform,
    pub container: String,
    pub lifespan: Option<f32>,
    pub fields: BTreeMap<String, FieldValue>,
    pub components: Vec<MockComponent>,
    pub deferred: bool,
    pub finished: bool,
}

impl MockActor {
    pub fn new(name: &str) -> Self {
        Self {
            class: ClassId::INVALID,
            name: name.to_owned(),
            transform: Transform::IDENTITY,
            container: "/world/persistent".to_owned(),
            lifespan: None,
            fields: BTreeMap::new(),
            components: Vec::new(),
            deferred: false,
            finished: true,
        }
    }

    pub fn with_class(mut self, class: ClassId) -> Self {
        self.class = class;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_container(mut self, container: &str) -> Self {
        self.container = container.to_owned();
        self
    }

    pub fn with_lifespan(mut self, lifespan: f32) -> Self {
        self.lifespan = Some(lifespan);
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_owned(), value.into());
        self
    }

    pub fn with_component(mut self, component: MockComponent) -> Self {
        self.components.push(component);
        self
    }

    pub fn component(&self, name: &str) -> Option<&MockComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl Persist for MockActor {
    fn write_fields(&self, writer: &mut FieldWriter) {
        for (name, value) in &self.fields {
            writer.field(name.as_str(), value.clone());
        }
    }

    fn read_field(&mut self, name: &str, value: &FieldValue) -> bool {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value.clone();
                true
            }
            None => false,
        }
    }
}

impl Actor for MockActor {
    fn class(&self) -> ClassId {
        self.class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn container_path(&self) -> &str {
        &self.container
    }

    fn lifespan(&self) -> Option<f32> {
        self.lifespan
    }

    fn set_lifespan(&mut self, lifespan: Option<f32>) {
        self.lifespan = lifespan;
    }

    fn components(&self) -> Vec<&dyn Component> {
        self.components.iter().map(|c| c as &dyn Component).collect()
    }

    fn components_mut(&mut self) -> Vec<&mut dyn Component> {
        self.components
            .iter_mut()
            .map(|c| c as &mut dyn Component)
            .collect()
    }
}

/// Records every rebinding call made during restore
#[derive(Debug, Default)]
pub struct MockController {
    pub orientation: Rotator,
    pub possessed: Option<ActorId>,
    pub rotation_updates: Vec<f32>,
}

impl Controller for MockController {
    fn orientation(&self) -> Rotator {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Rotator) {
        self.orientation = orientation;
    }

    fn possess(&mut self, actor: ActorId) {
        self.possessed = Some(actor);
    }

    fn rotation_updated(&mut self, delta_hint: f32) {
        self.rotation_updates.push(delta_hint);
    }
}

type Factory = Box<dyn Fn() -> MockActor>;

/// Arena world with a class registry and a single controller
pub struct MockWorld {
    pub actors: Vec<Option<MockActor>>,
    pub containers: Vec<(String, ContainerId)>,
    pub default_container: String,
    pub controller: MockController,
    classes: HashMap<ClassId, Factory>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            containers: vec![("/world/persistent".to_owned(), ContainerId(1))],
            default_container: "/world/persistent".to_owned(),
            controller: MockController::default(),
            classes: HashMap::new(),
        }
    }

    /// Register a spawnable class; the factory builds the class defaults
    pub fn register_class(&mut self, name: &str, factory: impl Fn() -> MockActor + 'static) -> ClassId {
        let id = ClassId::from_name(name);
        self.classes.insert(id, Box::new(factory));
        id
    }

    pub fn add_container(&mut self, path: &str, id: ContainerId) {
        self.containers.push((path.to_owned(), id));
    }

    /// Insert a pre-built live actor (test setup only)
    pub fn insert(&mut self, actor: MockActor) -> ActorId {
        let id = ActorId(self.actors.len() as u64);
        self.actors.push(Some(actor));
        id
    }

    pub fn live_count(&self) -> usize {
        self.actors.iter().filter(|slot| slot.is_some()).count()
    }

    /// Find a live actor by name (test assertions only)
    pub fn find_actor(&self, name: &str) -> &MockActor {
        self.actors
            .iter()
            .flatten()
            .find(|a| a.name == name)
            .unwrap_or_else(|| panic!("no live actor named '{}'", name))
    }

    fn container_path_of(&self, id: ContainerId) -> Option<String> {
        self.containers
            .iter()
            .find(|(_, c)| *c == id)
            .map(|(path, _)| path.clone())
    }
}

impl Default for MockWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for MockWorld {
    fn spawn(
        &mut self,
        class: ClassId,
        transform: Transform,
        options: SpawnOptions,
    ) -> void_snapshot::error::Result<ActorId> {
        let factory = self
            .classes
            .get(&class)
            .ok_or_else(|| SnapshotError::SpawnFailed {
                name: options.name.clone(),
                reason: "class not registered".to_owned(),
            })?;
        let mut actor = factory();

        actor.class = class;
        actor.name = options.name;
        actor.transform = transform;
        actor.container = options
            .container
            .and_then(|id| self.container_path_of(id))
            .unwrap_or_else(|| self.default_container.clone());
        actor.deferred = options.defer_activation;
        actor.finished = !options.defer_activation;

        let id = ActorId(self.actors.len() as u64);
        self.actors.push(Some(actor));
        Ok(id)
    }

    fn finish_spawning(&mut self, actor: ActorId, transform: Transform) {
        if let Some(Some(actor)) = self.actors.get_mut(actor.0 as usize) {
            actor.finished = true;
            actor.transform = transform;
        }
    }

    fn actor(&self, actor: ActorId) -> Option<&dyn Actor> {
        self.actors
            .get(actor.0 as usize)
            .and_then(|slot| slot.as_ref())
            .map(|a| a as &dyn Actor)
    }

    fn actor_mut(&mut self, actor: ActorId) -> Option<&mut dyn Actor> {
        self.actors
            .get_mut(actor.0 as usize)
            .and_then(|slot| slot.as_mut())
            .map(|a| a as &mut dyn Actor)
    }

    fn destroy_tracked(&mut self) {
        for slot in &mut self.actors {
            *slot = None;
        }
    }

    fn containers(&self) -> Vec<(String, ContainerId)> {
        self.containers.clone()
    }

    fn controller(&self) -> &dyn Controller {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut dyn Controller {
        &mut self.controller
    }
}
