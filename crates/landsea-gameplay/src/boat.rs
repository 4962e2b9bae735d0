//! Boat rigid-body simulation.
//!
//! The boat is a single rigid body built from grid parts. Each tick the
//! parts contribute forces (sail thrust, rudder lift, anchor drag), the hull
//! adds hydrodynamic drag, and the state is integrated with explicit Euler.
//! Land contact is point-sampled under every hull tile.
//!
//! Angles are in degrees, counter-clockwise positive; heading 0 points along
//! local +Y.

use glam::Vec2;
use landsea_world::ChunkStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::inventory::Inventory;
use crate::parts::{BoatGeometry, BoatPart, PartInteraction, PartKind};

/// Mass of the starting raft.
pub const BASE_MASS: f32 = 3000.0;
/// Mass added per placed hull tile.
pub const MASS_PER_HULL: f32 = 50.0;
/// Moment of inertia of the starting raft.
pub const BASE_INERTIA: f32 = 12_000.0;
/// Inertia added per placed hull tile.
pub const INERTIA_PER_HULL: f32 = 200.0;

/// Quadratic drag along the keel.
pub const DRAG_FORWARD: f32 = 0.3;
/// Quadratic drag across the keel.
pub const DRAG_SIDEWAYS: f32 = 5.0;
/// Base angular drag, before the per-hull term.
pub const ANGULAR_DRAG: f32 = 10.0;

const SAIL_FORCE: f32 = 500.0;
const IRONS_FORCE: f32 = 50.0;
const SAIL_TORQUE_FACTOR: f32 = 0.5;
/// Heading-wind dot product below which the sail cannot drive.
const IRONS_THRESHOLD: f32 = -0.75;
const RUDDER_LIFT: f32 = 100.0;
const ANCHOR_DRAG: f32 = 500.0;
const ANGULAR_DRAG_SCALE: f32 = 50.0;
const RESTITUTION: f32 = -0.2;

const KICK_COOLDOWN: f32 = 1.0;
const KICK_SPEED: f32 = 80.0;
const KICK_SPIN: i32 = 30;
const KICK_PROBE_TILES: f32 = 2.0;
/// Below this speed a kick with no land nearby pushes astern.
const KICK_IDLE_SPEED: f32 = 10.0;

/// Answers land/water queries for collision.
pub trait LandQuery {
    /// Whether the world position is land.
    fn is_land(&mut self, pos: Vec2) -> bool;
}

impl LandQuery for ChunkStore {
    fn is_land(&mut self, pos: Vec2) -> bool {
        ChunkStore::is_land(self, pos)
    }
}

/// Errors from editing the part grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Cell lies outside the deck grid
    #[error("Cell ({x}, {y}) is outside the boat grid")]
    OutOfGrid {
        /// Grid X
        x: i32,
        /// Grid Y
        y: i32,
    },
    /// A hull already occupies the cell
    #[error("Cell ({x}, {y}) already has a hull")]
    Occupied {
        /// Grid X
        x: i32,
        /// Grid Y
        y: i32,
    },
}

/// Rotates `v` counter-clockwise by `degrees`.
#[must_use]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit heading for a boat angle.
#[must_use]
pub fn heading_for(angle: f32) -> Vec2 {
    rotate_deg(Vec2::Y, angle)
}

/// World-space sail force for a heading and wind.
#[must_use]
pub fn sail_force(heading: Vec2, wind: Vec2) -> Vec2 {
    let wind_speed = wind.length();
    let wind_dir = wind.normalize_or_zero();
    let dot = heading.dot(wind_dir);

    if dot > IRONS_THRESHOLD {
        let efficiency = (dot - IRONS_THRESHOLD) / (1.0 - IRONS_THRESHOLD);
        let thrust = heading * (wind_speed * efficiency * SAIL_FORCE);

        // Side force pushes to leeward.
        let side_dir = if heading.perp_dot(wind_dir) > 0.0 {
            -heading.perp()
        } else {
            heading.perp()
        };
        let side_factor = 1.0 - (dot + 1.0) / 2.0;
        thrust + side_dir * (wind_speed * side_factor * SAIL_FORCE)
    } else {
        wind_dir * (wind_speed * IRONS_FORCE)
    }
}

/// A boat and the parts it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    position: Vec2,
    velocity: Vec2,
    /// Heading in degrees
    angle: f32,
    /// Degrees per second
    angular_velocity: f32,
    geometry: BoatGeometry,
    parts: Vec<BoatPart>,
    hull_count: u32,
    mass: f32,
    inertia: f32,
    kick_cooldown: f32,
}

impl Boat {
    /// Creates the starting raft at `position`: a 2x4 hull with sail,
    /// rudder, anchor and crate.
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        let mut parts = Vec::new();
        for x in 4..=5 {
            for y in 3..=6 {
                parts.push(BoatPart::hull(x, y));
            }
        }
        let hull_count = parts.len() as u32;

        parts.push(BoatPart::sail(4.0, 4.0));
        parts.push(BoatPart::rudder(4.5, 3.0));
        parts.push(BoatPart::anchor(5.0, 6.0));
        parts.push(BoatPart::storage(5.0, 4.0));

        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            geometry: BoatGeometry::default(),
            parts,
            hull_count,
            mass: BASE_MASS,
            inertia: BASE_INERTIA,
            kick_cooldown: 0.0,
        }
    }

    /// World position of the centre of mass.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Linear velocity in pixels per second.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Heading angle in degrees.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Angular velocity in degrees per second.
    #[must_use]
    pub const fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Unit vector along local +Y in world space.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        heading_for(self.angle)
    }

    /// Deck grid.
    #[must_use]
    pub const fn geometry(&self) -> &BoatGeometry {
        &self.geometry
    }

    /// Parts in placement order.
    #[must_use]
    pub fn parts(&self) -> &[BoatPart] {
        &self.parts
    }

    /// Current mass.
    #[must_use]
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Current moment of inertia.
    #[must_use]
    pub const fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Number of hull tiles.
    #[must_use]
    pub const fn hull_count(&self) -> u32 {
        self.hull_count
    }

    /// Seconds until kick-off is usable again.
    #[must_use]
    pub const fn kick_cooldown(&self) -> f32 {
        self.kick_cooldown
    }

    /// Sets position and velocity directly. Intended for spawning and tests.
    pub fn teleport(&mut self, position: Vec2, angle: f32) {
        self.position = position;
        self.angle = angle;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Sets the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Advances the simulation by `dt` seconds. Returns `true` if the step
    /// hit land and was rolled back.
    pub fn update(&mut self, dt: f32, wind: Vec2, land: &mut impl LandQuery) -> bool {
        self.kick_cooldown = (self.kick_cooldown - dt).max(0.0);
        for part in &mut self.parts {
            part.update(dt);
        }

        let (force, torque) = self.accumulate_forces(wind);

        let prev_position = self.position;
        let prev_angle = self.angle;

        self.velocity += force / self.mass * dt;
        self.position += self.velocity * dt;
        self.angular_velocity += torque / self.inertia * dt;
        self.angle += self.angular_velocity * dt;

        if self.hull_touches_land(land) {
            self.position = prev_position;
            self.angle = prev_angle;
            self.velocity *= RESTITUTION;
            self.angular_velocity *= 0.5;
            return true;
        }
        false
    }

    /// Net world force and torque for the current state.
    fn accumulate_forces(&self, wind: Vec2) -> (Vec2, f32) {
        let heading = self.heading();
        let local_vel = rotate_deg(self.velocity, -self.angle);
        let omega = self.angular_velocity.to_radians();

        let mut local_force = Vec2::ZERO;
        let mut torque = 0.0;

        for part in &self.parts {
            let lever = part.local_position(&self.geometry);
            // Velocity of the water past this point, in boat space.
            let point_vel = local_vel + lever.perp() * omega;

            match &part.kind {
                PartKind::Sail { raised: true } => {
                    let force = rotate_deg(sail_force(heading, wind), -self.angle);
                    local_force += force;
                    torque += lever.perp_dot(force) * SAIL_TORQUE_FACTOR;
                },
                PartKind::Rudder { angle } => {
                    let normal = rotate_deg(Vec2::Y, *angle).perp();
                    let force = normal * ((-point_vel).dot(normal) * RUDDER_LIFT);
                    local_force += force;
                    torque += lever.perp_dot(force);
                },
                PartKind::Anchor { dropped: true } => {
                    let force = point_vel * -ANCHOR_DRAG;
                    local_force += force;
                    torque += lever.perp_dot(force);
                },
                _ => {},
            }
        }

        local_force += Vec2::new(
            -DRAG_SIDEWAYS * local_vel.x * local_vel.x.abs(),
            -DRAG_FORWARD * local_vel.y * local_vel.y.abs(),
        );
        torque -= self.angular_velocity
            * (ANGULAR_DRAG + 2.0 * self.hull_count as f32)
            * ANGULAR_DRAG_SCALE;

        (rotate_deg(local_force, self.angle), torque)
    }

    fn hull_touches_land(&self, land: &mut impl LandQuery) -> bool {
        self.hull_world_positions().any(|pos| land.is_land(pos))
    }

    /// Pushes off nearby land, or backs away when idle in open water.
    /// Returns `true` if a kick was applied.
    pub fn kick_off(&mut self, land: &mut impl LandQuery, rng: &mut fastrand::Rng) -> bool {
        if self.kick_cooldown > 0.0 {
            return false;
        }

        let reach = self.geometry.tile_size * KICK_PROBE_TILES;
        let probes = [
            (Vec2::X * reach, -Vec2::X),
            (-Vec2::X * reach, Vec2::X),
            (Vec2::Y * reach, -Vec2::Y),
            (-Vec2::Y * reach, Vec2::Y),
        ];

        let mut push = Vec2::ZERO;
        let mut found_land = false;
        let tiles: Vec<Vec2> = self.hull_world_positions().collect();
        for tile in tiles {
            for (offset, away) in probes {
                if land.is_land(tile + offset) {
                    push += away;
                    found_land = true;
                }
            }
        }

        if !found_land {
            if self.velocity.length() >= KICK_IDLE_SPEED {
                return false;
            }
            push = -self.heading();
        }

        let jitter = if rng.bool() { 45.0 } else { -45.0 };
        let push = rotate_deg(push.normalize_or_zero(), jitter);
        self.velocity += push * KICK_SPEED;
        self.angular_velocity += rng.i32(-KICK_SPIN..=KICK_SPIN) as f32;
        self.kick_cooldown = KICK_COOLDOWN;

        debug!(
            "Kicked off, velocity now ({:.1}, {:.1})",
            self.velocity.x, self.velocity.y
        );
        true
    }

    /// Turns the first rudder by `input` (-1..1).
    pub fn steer(&mut self, input: f32, dt: f32) {
        if let Some(rudder) = self.find_part_mut(|k| matches!(k, PartKind::Rudder { .. })) {
            rudder.steer(input, dt);
        }
    }

    /// Toggles the first sail. Returns its new raised state.
    pub fn toggle_sail(&mut self) -> Option<bool> {
        let sail = self.find_part_mut(|k| matches!(k, PartKind::Sail { .. }))?;
        match &mut sail.kind {
            PartKind::Sail { raised } => {
                *raised = !*raised;
                Some(*raised)
            },
            _ => None,
        }
    }

    /// Toggles the first anchor. Returns its new dropped state.
    pub fn toggle_anchor(&mut self) -> Option<bool> {
        let anchor = self.find_part_mut(|k| matches!(k, PartKind::Anchor { .. }))?;
        match &mut anchor.kind {
            PartKind::Anchor { dropped } => {
                *dropped = !*dropped;
                Some(*dropped)
            },
            _ => None,
        }
    }

    /// Whether the first sail is raised.
    #[must_use]
    pub fn sail_raised(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p.kind, PartKind::Sail { raised: true }))
    }

    /// Whether any anchor is down.
    #[must_use]
    pub fn anchor_dropped(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p.kind, PartKind::Anchor { dropped: true }))
    }

    /// Deflection of the first rudder.
    #[must_use]
    pub fn rudder_angle(&self) -> Option<f32> {
        self.parts.iter().find_map(|p| match p.kind {
            PartKind::Rudder { angle } => Some(angle),
            _ => None,
        })
    }

    /// Inventory of the first crate.
    pub fn crate_inventory_mut(&mut self) -> Option<&mut Inventory> {
        self.parts.iter_mut().find_map(|p| match &mut p.kind {
            PartKind::Crate { inventory } => Some(inventory),
            _ => None,
        })
    }

    /// Inventory of the first crate.
    #[must_use]
    pub fn crate_inventory(&self) -> Option<&Inventory> {
        self.parts.iter().find_map(|p| match &p.kind {
            PartKind::Crate { inventory } => Some(inventory),
            _ => None,
        })
    }

    fn find_part_mut(&mut self, pred: impl Fn(&PartKind) -> bool) -> Option<&mut BoatPart> {
        self.parts.iter_mut().find(|p| pred(&p.kind))
    }

    /// Whether a hull occupies integer cell `(x, y)`.
    #[must_use]
    pub fn is_cell_occupied(&self, x: i32, y: i32) -> bool {
        self.parts.iter().any(|p| p.is_hull_at(x, y))
    }

    /// Adds a part. Hulls must land on a free in-grid cell and make the
    /// boat heavier.
    pub fn add_part(&mut self, part: BoatPart) -> Result<(), BuildError> {
        if part.is_hull() {
            let (x, y) = (part.grid_x as i32, part.grid_y as i32);
            if !self.geometry.contains(x, y) {
                return Err(BuildError::OutOfGrid { x, y });
            }
            if self.is_cell_occupied(x, y) {
                return Err(BuildError::Occupied { x, y });
            }
            self.hull_count += 1;
            self.mass += MASS_PER_HULL;
            self.inertia += INERTIA_PER_HULL;
            debug!("Hull placed at ({x}, {y}), mass now {}", self.mass);
        }
        self.parts.push(part);
        Ok(())
    }

    /// Places a hull tile at grid cell `(x, y)`.
    pub fn place_hull(&mut self, x: i32, y: i32) -> Result<(), BuildError> {
        self.add_part(BoatPart::hull(x, y))
    }

    /// Whether a local position stands on a hull tile.
    #[must_use]
    pub fn is_tile_walkable(&self, local: Vec2) -> bool {
        self.geometry
            .cell_at(local)
            .is_some_and(|(x, y)| self.is_cell_occupied(x, y))
    }

    /// Boat-local to world position.
    #[must_use]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + rotate_deg(local, self.angle)
    }

    /// World to boat-local position.
    #[must_use]
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        rotate_deg(world - self.position, -self.angle)
    }

    /// World position of the first rudder, or the boat centre without one.
    #[must_use]
    pub fn rudder_world_position(&self) -> Vec2 {
        self.parts
            .iter()
            .find(|p| matches!(p.kind, PartKind::Rudder { .. }))
            .map_or(self.position, |p| {
                self.local_to_world(p.local_position(&self.geometry))
            })
    }

    /// World positions of every hull tile centre.
    pub fn hull_world_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.parts
            .iter()
            .filter(|p| p.is_hull())
            .map(|p| self.local_to_world(p.local_position(&self.geometry)))
    }

    /// Index of the non-hull part nearest to a local position, within
    /// `max_cells` cells on both axes.
    #[must_use]
    pub fn nearest_part(&self, local: Vec2, max_cells: f32) -> Option<usize> {
        let reach = max_cells * self.geometry.tile_size;
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_hull())
            .map(|(i, p)| (i, p.local_position(&self.geometry) - local))
            .filter(|(_, d)| d.x.abs() <= reach && d.y.abs() <= reach)
            .min_by(|(_, a), (_, b)| a.length_squared().total_cmp(&b.length_squared()))
            .map(|(i, _)| i)
    }

    /// Interacts with the part at `index`.
    pub fn interact_part(&mut self, index: usize) -> PartInteraction {
        self.parts
            .get_mut(index)
            .map_or(PartInteraction::Ignored, BoatPart::interact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Land wherever `x` is at or beyond a wall, plus explicit tiles.
    #[derive(Default)]
    struct MockLand {
        wall_x: Option<f32>,
        tiles: HashSet<(i32, i32)>,
        queries: usize,
    }

    impl LandQuery for MockLand {
        fn is_land(&mut self, pos: Vec2) -> bool {
            self.queries += 1;
            if self.wall_x.is_some_and(|wall| pos.x >= wall) {
                return true;
            }
            let tile = (pos / 32.0).floor();
            self.tiles.contains(&(tile.x as i32, tile.y as i32))
        }
    }

    #[test]
    fn test_seed_layout() {
        let boat = Boat::new(Vec2::new(100.0, 200.0));
        assert_eq!(boat.hull_count(), 8);
        assert_eq!(boat.parts().len(), 12);
        assert!((boat.mass() - BASE_MASS).abs() < f32::EPSILON);
        assert!((boat.inertia() - BASE_INERTIA).abs() < f32::EPSILON);
        assert!(boat.sail_raised());
        assert!(!boat.anchor_dropped());
        assert_eq!(boat.rudder_angle(), Some(0.0));
        assert!(boat.is_cell_occupied(4, 3));
        assert!(boat.is_cell_occupied(5, 6));
        assert!(!boat.is_cell_occupied(3, 3));
        assert_eq!(
            boat.crate_inventory().map(Inventory::capacity),
            Some(crate::inventory::CRATE_INVENTORY_SLOTS)
        );
    }

    #[test]
    fn test_heading_is_ccw_from_local_y() {
        assert!((heading_for(0.0) - Vec2::Y).length() < 1e-6);
        assert!((heading_for(90.0) - Vec2::NEG_X).length() < 1e-6);
        assert!((heading_for(-90.0) - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_downwind_run() {
        let mut boat = Boat::new(Vec2::ZERO);
        boat.teleport(Vec2::ZERO, -90.0);
        let mut land = MockLand::default();
        let wind = Vec2::new(40.0, 0.0);

        for _ in 0..60 {
            assert!(!boat.update(1.0 / 60.0, wind, &mut land));
        }

        let v = boat.velocity();
        assert!(v.length() > 0.0);
        assert!(v.dot(boat.heading()) > 0.8 * v.length());
        assert!(boat.position().x > 0.0);
    }

    #[test]
    fn test_in_irons_pushes_backwards() {
        let force = sail_force(Vec2::X, Vec2::new(-40.0, 0.0));
        assert!(force.x < 0.0);
        assert!((force.length() - 40.0 * 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_lowered_sail_drifts_to_rest() {
        let mut boat = Boat::new(Vec2::ZERO);
        assert_eq!(boat.toggle_sail(), Some(false));
        let mut land = MockLand::default();
        for _ in 0..120 {
            boat.update(1.0 / 60.0, Vec2::new(100.0, 0.0), &mut land);
        }
        assert_eq!(boat.velocity(), Vec2::ZERO);
        assert_eq!(boat.position(), Vec2::ZERO);
    }

    #[test]
    fn test_rudder_turns_moving_boat() {
        let spin_after = |input: f32| {
            let mut boat = Boat::new(Vec2::ZERO);
            boat.toggle_sail();
            boat.steer(input, 1.0);
            boat.set_velocity(Vec2::new(0.0, 100.0));
            let mut land = MockLand::default();
            for _ in 0..5 {
                boat.update(1.0 / 60.0, Vec2::ZERO, &mut land);
            }
            (boat.rudder_angle(), boat.angular_velocity())
        };

        let (port_angle, port_spin) = spin_after(-1.0);
        let (starboard_angle, starboard_spin) = spin_after(1.0);
        let (centre_angle, centre_spin) = spin_after(0.0);

        assert_eq!(port_angle, Some(45.0));
        assert_eq!(starboard_angle, Some(-45.0));
        assert_eq!(centre_angle, Some(0.0));
        assert!(port_spin.abs() > 1e-3);
        assert!(starboard_spin.abs() > 1e-3);
        assert!(port_spin.signum() != starboard_spin.signum());
        assert!(centre_spin.abs() < 1e-6);
    }

    #[test]
    fn test_anchor_slows_boat() {
        let mut free = Boat::new(Vec2::ZERO);
        let mut anchored = Boat::new(Vec2::ZERO);
        free.toggle_sail();
        anchored.toggle_sail();
        assert_eq!(anchored.toggle_anchor(), Some(true));

        let mut land = MockLand::default();
        for boat in [&mut free, &mut anchored] {
            boat.set_velocity(Vec2::new(0.0, 50.0));
            for _ in 0..30 {
                boat.update(1.0 / 60.0, Vec2::ZERO, &mut land);
            }
        }
        assert!(anchored.velocity().length() < free.velocity().length());
    }

    #[test]
    fn test_mass_monotonic_per_hull() {
        let mut boat = Boat::new(Vec2::ZERO);
        let cells = [(3, 3), (3, 4), (6, 3), (6, 6), (0, 0)];
        let mut last = boat.mass();
        for (x, y) in cells {
            boat.place_hull(x, y).expect("free cell");
            assert!(boat.mass() > last);
            last = boat.mass();
        }
        let n = cells.len() as f32;
        assert!((boat.mass() - (BASE_MASS + n * MASS_PER_HULL)).abs() < 1e-3);
        assert!((boat.inertia() - (BASE_INERTIA + n * INERTIA_PER_HULL)).abs() < 1e-3);
        assert_eq!(boat.hull_count(), 8 + cells.len() as u32);
    }

    #[test]
    fn test_place_hull_errors() {
        let mut boat = Boat::new(Vec2::ZERO);
        let mass = boat.mass();
        assert_eq!(boat.place_hull(4, 4), Err(BuildError::Occupied { x: 4, y: 4 }));
        assert_eq!(boat.place_hull(10, 0), Err(BuildError::OutOfGrid { x: 10, y: 0 }));
        assert_eq!(boat.place_hull(-1, 5), Err(BuildError::OutOfGrid { x: -1, y: 5 }));
        assert!((boat.mass() - mass).abs() < f32::EPSILON);
    }

    #[test]
    fn test_non_hull_parts_do_not_add_mass() {
        let mut boat = Boat::new(Vec2::ZERO);
        boat.add_part(BoatPart::sail(5.0, 5.0)).expect("sail");
        assert!((boat.mass() - BASE_MASS).abs() < f32::EPSILON);
        assert_eq!(boat.hull_count(), 8);
    }

    #[test]
    fn test_collision_containment() {
        let mut boat = Boat::new(Vec2::ZERO);
        boat.teleport(Vec2::ZERO, -90.0);
        boat.set_velocity(Vec2::new(120.0, 0.0));
        let mut land = MockLand {
            wall_x: Some(400.0),
            ..Default::default()
        };

        let mut collided = false;
        for _ in 0..600 {
            collided |= boat.update(1.0 / 60.0, Vec2::new(100.0, 0.0), &mut land);
            for pos in boat.hull_world_positions() {
                assert!(pos.x < 400.0, "hull tile on land at {pos}");
            }
        }
        assert!(collided);
        assert!(land.queries > 0);
    }

    #[test]
    fn test_collision_restores_state() {
        let mut boat = Boat::new(Vec2::ZERO);
        boat.toggle_sail();
        boat.set_velocity(Vec2::new(0.0, 1000.0));
        let mut land = MockLand::default();
        // Every tile at y >= 4 (world pixels >= 128) is land.
        for x in -10..10 {
            for y in 4..20 {
                land.tiles.insert((x, y));
            }
        }

        assert!(boat.update(0.1, Vec2::ZERO, &mut land));
        assert_eq!(boat.position(), Vec2::ZERO);
        assert!(boat.angle().abs() < f32::EPSILON);
        assert!(boat.velocity().y < 0.0);
    }

    #[test]
    fn test_kick_off_idle_pushes_astern() {
        let mut boat = Boat::new(Vec2::ZERO);
        let mut land = MockLand::default();
        let mut rng = fastrand::Rng::with_seed(7);

        assert!(boat.kick_off(&mut land, &mut rng));
        let v = boat.velocity();
        assert!((v.length() - KICK_SPEED).abs() < 1e-3);
        // Astern, jittered by 45 degrees either side.
        assert!(v.dot(-boat.heading()) > 0.7 * v.length());
        assert!(boat.angular_velocity().abs() <= 30.0);

        assert!(!boat.kick_off(&mut land, &mut rng));
        boat.update(1.0, Vec2::ZERO, &mut land);
        assert!((boat.kick_cooldown()).abs() < f32::EPSILON);
    }

    #[test]
    fn test_kick_off_pushes_away_from_land() {
        let mut boat = Boat::new(Vec2::ZERO);
        boat.set_velocity(Vec2::new(50.0, 0.0));
        let mut land = MockLand {
            wall_x: Some(60.0),
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(3);

        let before = boat.velocity();
        assert!(boat.kick_off(&mut land, &mut rng));
        let delta = boat.velocity() - before;
        assert!(delta.x < 0.0);
    }

    #[test]
    fn test_kick_off_moving_in_open_water_does_nothing() {
        let mut boat = Boat::new(Vec2::ZERO);
        boat.set_velocity(Vec2::new(0.0, 20.0));
        let mut land = MockLand::default();
        let mut rng = fastrand::Rng::with_seed(3);
        assert!(!boat.kick_off(&mut land, &mut rng));
        assert_eq!(boat.velocity(), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_walkable_and_transforms() {
        let mut boat = Boat::new(Vec2::new(1000.0, -500.0));
        assert!(boat.is_tile_walkable(Vec2::new(0.0, 0.0)));
        assert!(boat.is_tile_walkable(Vec2::new(-20.0, 60.0)));
        assert!(!boat.is_tile_walkable(Vec2::new(40.0, 0.0)));
        assert!(!boat.is_tile_walkable(Vec2::new(0.0, 70.0)));

        boat.teleport(Vec2::new(1000.0, -500.0), 37.0);
        let local = Vec2::new(12.0, -40.0);
        let back = boat.world_to_local(boat.local_to_world(local));
        assert!((back - local).length() < 1e-3);

        boat.teleport(Vec2::new(1000.0, -500.0), 0.0);
        assert!((boat.rudder_world_position() - Vec2::new(1000.0, -548.0)).length() < 1e-3);
    }

    #[test]
    fn test_nearest_part_within_one_cell() {
        let mut boat = Boat::new(Vec2::ZERO);
        // Rudder sits at local (0, -48).
        let index = boat.nearest_part(Vec2::new(0.0, -40.0), 1.0).expect("rudder");
        assert_eq!(boat.interact_part(index), PartInteraction::Steer);
        assert!(boat.nearest_part(Vec2::new(140.0, 140.0), 1.0).is_none());
    }
}
