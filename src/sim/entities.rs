//! Entity populations: asteroids, debris, particles, loot, dust clouds and
//! trajectory markers.
//!
//! Everything here ages independently of the rocket. Update passes prune
//! dead members with `retain`, so after any pass a list holds only
//! entities with `life > 0`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gravity;
use super::state::{Planet, World};
use crate::consts::*;
use crate::level::SpawnSector;
use crate::settings::DevSettings;
use crate::{polar_to_cartesian, rand_range};

/// Asteroids spawn this far from the world centre (× world width)
pub const ASTEROID_SPAWN_DISTANCE: f32 = 1.2;
/// Loot pull acceleration toward the rocket (before speed regulator)
pub const LOOT_PULL_SPEED: f32 = 400.0;
/// Per-frame loot velocity retention
pub const LOOT_DAMPING: f32 = 0.98;
pub const LOOT_LIFETIME: f32 = 30.0;
pub const DUST_CLOUD_LIFETIME: f32 = 10.0;
/// Outward push on drifting dust clouds (before speed regulator)
const DUST_DRIFT_ACCEL: f32 = 15.0;
const DUST_DRIFT_DAMPING: f32 = 0.99;

/// A procedural rock drifting toward the planets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    /// Spin rate (rad/s)
    pub spin: f32,
    /// Outline relative to `pos`, unrotated
    pub points: Vec<Vec2>,
    pub color: u32,
}

/// Rock fragments left by an impact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub life: f32,
    pub angle: f32,
    pub spin: f32,
}

/// Explosion spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub life: f32,
    pub initial_life: f32,
    pub color: u32,
}

/// Loot size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Small,
    Medium,
    Large,
}

impl LootKind {
    /// 60% small, 30% medium, 10% large
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.6 {
            LootKind::Small
        } else if roll < 0.9 {
            LootKind::Medium
        } else {
            LootKind::Large
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            LootKind::Small => 16.0,
            LootKind::Medium => 24.0,
            LootKind::Large => 32.0,
        }
    }

    /// Distance at which the rocket starts pulling this loot in
    pub fn magnetic_radius(&self) -> f32 {
        match self {
            LootKind::Small => 120.0,
            LootKind::Medium => 160.0,
            LootKind::Large => 200.0,
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            LootKind::Small => 1,
            LootKind::Medium => 3,
            LootKind::Large => 5,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            LootKind::Small => 0xFFD700,
            LootKind::Medium => 0xFFA500,
            LootKind::Large => 0xFF4500,
        }
    }
}

/// A collectible dropped by a destroyed asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: LootKind,
    pub radius: f32,
    pub magnetic_radius: f32,
    pub value: u32,
    pub life: f32,
    /// Seconds since spawn (drives the pop-in animation)
    pub age: f32,
}

impl Loot {
    pub fn new(kind: LootKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            kind,
            radius: kind.radius(),
            magnetic_radius: kind.magnetic_radius(),
            value: kind.value(),
            life: LOOT_LIFETIME,
            age: 0.0,
        }
    }
}

/// Per-point wobble parameters, fixed at creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointAnim {
    pub phase: f32,
    pub speed: f32,
    pub max_offset: f32,
}

/// One animated outline of a dust cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudLayer {
    pub points: Vec<Vec2>,
    pub anim: Vec<PointAnim>,
    /// Current displacement of each point, recomputed every update
    pub offsets: Vec<Vec2>,
}

impl CloudLayer {
    fn generate<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Self {
        let count = rand_range(rng, 8.0, 12.0).round() as usize;
        let mut points = Vec::with_capacity(count);
        let mut anim = Vec::with_capacity(count);
        for j in 0..count {
            let angle = j as f32 / count as f32 * std::f32::consts::TAU;
            let dist = rand_range(rng, radius * 0.5, radius);
            points.push(polar_to_cartesian(dist, angle));
            anim.push(PointAnim {
                phase: rand_range(rng, 0.0, std::f32::consts::TAU),
                speed: rand_range(
                    rng,
                    std::f32::consts::PI * 0.5,
                    std::f32::consts::PI * 1.5,
                ),
                max_offset: rand_range(rng, radius * 0.1, radius * 0.3),
            });
        }
        Self {
            offsets: vec![Vec2::ZERO; count],
            points,
            anim,
        }
    }

    /// Slide each point along its tangent by a sinusoid of cloud age
    fn animate(&mut self, age: f32) {
        for ((point, anim), offset) in self
            .points
            .iter()
            .zip(&self.anim)
            .zip(self.offsets.iter_mut())
        {
            let rest_angle = point.y.atan2(point.x);
            let magnitude = (age * anim.speed + anim.phase).sin() * anim.max_offset;
            *offset = Vec2::new(-rest_angle.sin(), rest_angle.cos()) * magnitude;
        }
    }
}

/// A spreading cloud of dust that raises pollution while the rocket is inside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DustCloud {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius at creation; the cloud grows to 3× over its life
    pub radius: f32,
    pub life: f32,
    pub initial_life: f32,
    pub age: f32,
    pub angle: f32,
    pub spin: f32,
    pub layers: [CloudLayer; 2],
    pub pollution_amount: f32,
}

impl DustCloud {
    /// 0 when fresh, 1 when expired
    #[inline]
    pub fn progress(&self) -> f32 {
        1.0 - self.life / self.initial_life
    }

    #[inline]
    pub fn current_radius(&self) -> f32 {
        self.radius * (1.0 + self.progress() * 2.0)
    }
}

/// Breadcrumb of the rocket's recent path
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub life: f32,
    pub initial_life: f32,
}

impl TrailPoint {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            life: TRAJECTORY_POINT_LIFETIME,
            initial_life: TRAJECTORY_POINT_LIFETIME,
        }
    }
}

// --- Spawning ---

/// Launch an asteroid from outside the world toward the planets.
///
/// It enters from a random spawn sector and aims at the planet centroid
/// with a random sideways deflection. The deflection is wider when asteroid
/// gravity is on, so the rocks curve in instead of flying straight.
pub fn spawn_asteroid<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    world: &World,
    planets: &[Planet],
    sectors: &[SpawnSector],
    color: u32,
    settings: &DevSettings,
) -> Asteroid {
    let sector = if sectors.is_empty() {
        SpawnSector::FULL_CIRCLE
    } else {
        sectors[rng.random_range(0..sectors.len())]
    };
    let angle = rand_range(rng, sector.start, sector.end).to_radians();
    let pos = world.center() + polar_to_cartesian(world.width * ASTEROID_SPAWN_DISTANCE, angle);

    let centroid = if planets.is_empty() {
        world.center()
    } else {
        planets.iter().map(|p| p.pos).sum::<Vec2>() / planets.len() as f32
    };
    let to_target = centroid - pos;
    let direct_angle = to_target.y.atan2(to_target.x);
    let deflection = if settings.asteroids_have_gravity {
        rand_range(rng, -0.6, 0.6)
    } else {
        rand_range(rng, -0.05, 0.05)
    };
    let heading = direct_angle + std::f32::consts::FRAC_PI_2 * deflection;

    let speed = rand_range(rng, 150.0, 300.0)
        * settings.asteroid_speed_multiplier
        * settings.speed_regulator;
    let radius = rand_range(rng, 15.0, 35.0);
    let point_count = rand_range(rng, 6.0, 8.0).round() as usize;
    let points = (0..point_count)
        .map(|j| {
            let a = j as f32 / point_count as f32 * std::f32::consts::TAU;
            polar_to_cartesian(rand_range(rng, radius * 0.8, radius), a)
        })
        .collect();

    Asteroid {
        id,
        pos,
        vel: polar_to_cartesian(speed, heading),
        radius,
        angle: 0.0,
        spin: rand_range(rng, -std::f32::consts::PI, std::f32::consts::PI),
        points,
        color,
    }
}

pub fn spawn_dust_cloud<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, radius: f32) -> DustCloud {
    let layers = [
        CloudLayer::generate(rng, radius),
        CloudLayer::generate(rng, radius),
    ];
    DustCloud {
        pos,
        vel: Vec2::ZERO,
        radius,
        life: DUST_CLOUD_LIFETIME,
        initial_life: DUST_CLOUD_LIFETIME,
        age: 0.0,
        angle: rand_range(rng, 0.0, std::f32::consts::TAU),
        spin: rand_range(
            rng,
            -std::f32::consts::PI * 0.3,
            std::f32::consts::PI * 0.3,
        ),
        layers,
        pollution_amount: 1.0,
    }
}

/// Drop loot at `pos`, unless the settings confine loot to the play zones
/// and `pos` is outside all of them. Returns whether anything spawned.
pub fn spawn_loot<R: Rng + ?Sized>(
    loot: &mut Vec<Loot>,
    rng: &mut R,
    pos: Vec2,
    planets: &[Planet],
    settings: &DevSettings,
) -> bool {
    if settings.loot_only_in_zone && !gravity::inside_play_area(planets, pos) {
        return false;
    }
    let kind = LootKind::from_roll(rng.random::<f32>());
    let sr = settings.speed_regulator;
    let vel = Vec2::new(
        rand_range(rng, -30.0, 30.0) * sr,
        rand_range(rng, -30.0, 30.0) * sr,
    );
    loot.push(Loot::new(kind, pos, vel));
    true
}

pub fn spawn_debris<R: Rng + ?Sized>(
    debris: &mut Vec<Debris>,
    rng: &mut R,
    pos: Vec2,
    count: usize,
    speed_regulator: f32,
) {
    for _ in 0..count {
        debris.push(Debris {
            pos,
            vel: Vec2::new(
                rand_range(rng, -50.0, 50.0) * speed_regulator,
                rand_range(rng, -50.0, 50.0) * speed_regulator,
            ),
            radius: rand_range(rng, 4.0, 10.0),
            life: rand_range(rng, 0.5, 1.5),
            angle: rand_range(rng, 0.0, std::f32::consts::TAU),
            spin: rand_range(rng, -std::f32::consts::PI, std::f32::consts::PI),
        });
    }
}

/// Burst of `count` sparks flying out in random directions
pub fn spawn_explosion<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    count: usize,
    color: u32,
    life: f32,
    speed_regulator: f32,
) {
    for _ in 0..count {
        let angle = rand_range(rng, 0.0, std::f32::consts::TAU);
        let speed = rand_range(rng, 50.0, 200.0) * speed_regulator;
        particles.push(Particle {
            pos,
            vel: polar_to_cartesian(speed, angle),
            radius: rand_range(rng, 2.0, 8.0),
            life: rand_range(rng, 0.2, life + 0.2),
            initial_life: life + 0.2,
            color,
        });
    }
}

// --- Aging ---

pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.life -= dt;
        p.pos += p.vel * dt;
    }
    particles.retain(|p| p.life > 0.0);
}

pub fn update_debris(debris: &mut Vec<Debris>, dt: f32) {
    for d in debris.iter_mut() {
        d.life -= dt;
        d.pos += d.vel * dt;
        d.angle += d.spin * dt;
    }
    debris.retain(|d| d.life > 0.0);
}

pub fn update_trail(trail: &mut Vec<TrailPoint>, dt: f32) {
    for t in trail.iter_mut() {
        t.life -= dt;
    }
    trail.retain(|t| t.life > 0.0);
}

/// The rocket as seen by loot: where it is and how close counts as touching
#[derive(Debug, Clone, Copy)]
pub struct Collector {
    pub pos: Vec2,
    pub radius: f32,
}

/// Age, attract, collect and move loot.
///
/// With a collector present, loot touching it is removed and its value
/// reported; loot inside its magnetic radius accelerates toward it at
/// `pull_speed`. Returns the values collected this pass, in list order.
pub fn update_loot(
    loot: &mut Vec<Loot>,
    collector: Option<Collector>,
    pull_speed: f32,
    dt: f32,
) -> Vec<u32> {
    let mut collected = Vec::new();
    loot.retain_mut(|l| {
        l.life -= dt;
        l.age += dt;

        if let Some(rocket) = collector {
            let to_rocket = rocket.pos - l.pos;
            let dist = to_rocket.length();
            if dist < rocket.radius + l.radius {
                collected.push(l.value);
                return false;
            }
            if dist < l.magnetic_radius {
                l.vel += to_rocket / dist * pull_speed * dt;
            }
        }

        l.vel *= LOOT_DAMPING;
        l.pos += l.vel * dt;
        l.life > 0.0
    });
    collected
}

/// Age and animate dust clouds. With `drift_from` set, clouds are pushed
/// away from that point.
pub fn update_dust_clouds(
    clouds: &mut Vec<DustCloud>,
    drift_from: Option<Vec2>,
    speed_regulator: f32,
    dt: f32,
) {
    clouds.retain_mut(|cloud| {
        cloud.age += dt;
        cloud.life -= dt;
        if cloud.life <= 0.0 {
            return false;
        }
        cloud.angle += cloud.spin * dt;
        for layer in cloud.layers.iter_mut() {
            layer.animate(cloud.age);
        }

        if let Some(center) = drift_from {
            let away = (cloud.pos - center).normalize_or_zero();
            cloud.vel += away * DUST_DRIFT_ACCEL * dt * speed_regulator;
            cloud.vel *= DUST_DRIFT_DAMPING;
            cloud.pos += cloud.vel * dt;
        }
        true
    });
}

/// Pull asteroids that are inside a play zone toward every planet.
pub fn apply_asteroid_gravity(
    asteroids: &mut [Asteroid],
    planets: &[Planet],
    settings: &DevSettings,
    dt: f32,
) {
    for a in asteroids.iter_mut() {
        let field = gravity_field_all(planets, a.pos, settings);
        a.vel += field * settings.asteroid_speed_multiplier * dt;
    }
}

/// Asteroids feel every planet once they are inside any zone, not just
/// the planets whose zone they are in.
fn gravity_field_all(planets: &[Planet], pos: Vec2, settings: &DevSettings) -> Vec2 {
    if !gravity::inside_play_area(planets, pos) {
        return Vec2::ZERO;
    }
    planets
        .iter()
        .map(|p| {
            let delta = p.pos - pos;
            let dist = delta.length();
            if dist > 0.0 {
                delta / dist
                    * gravity::gravity_force(
                        dist,
                        p.gravity_factor,
                        settings.gravity_mode,
                        settings.speed_regulator,
                    )
            } else {
                Vec2::ZERO
            }
        })
        .sum()
}

pub fn advance_asteroids(asteroids: &mut [Asteroid], dt: f32) {
    for a in asteroids.iter_mut() {
        a.pos += a.vel * dt;
        a.angle += a.spin * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> World {
        World::from_viewport(Viewport::new(1000.0, 800.0)).unwrap()
    }

    fn planet(pos: Vec2, radius: f32) -> Planet {
        Planet {
            pos,
            radius,
            gravity_factor: 1.0,
            color: 0,
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_explosion(&mut particles, &mut rng, Vec2::ZERO, 50, 0xFF0000, 1.0, 1.0);
        assert_eq!(particles.len(), 50);
        assert!(particles.iter().all(|p| p.life >= 0.2 && p.life < 1.2));

        for _ in 0..5 {
            update_particles(&mut particles, 0.1);
            assert!(particles.iter().all(|p| p.life > 0.0));
        }
        for _ in 0..10 {
            update_particles(&mut particles, 0.1);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_debris_moves_and_expires() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut debris = Vec::new();
        spawn_debris(&mut debris, &mut rng, Vec2::new(10.0, 10.0), 5, 1.0);
        assert_eq!(debris.len(), 5);
        let moving = debris.iter().filter(|d| d.vel != Vec2::ZERO).count();
        update_debris(&mut debris, 0.25);
        assert!(debris.iter().all(|d| d.life > 0.0));
        assert_eq!(moving, 5);
        update_debris(&mut debris, 1.5);
        assert!(debris.is_empty());
    }

    #[test]
    fn test_asteroid_spawns_outside_and_heads_inward() {
        let mut rng = Pcg32::seed_from_u64(3);
        let world = world();
        let planets = vec![planet(world.center(), 100.0)];
        let settings = DevSettings::default();
        for id in 0..50 {
            let a = spawn_asteroid(
                &mut rng,
                id,
                &world,
                &planets,
                &[SpawnSector::FULL_CIRCLE],
                0xABCDEF,
                &settings,
            );
            let from_center = a.pos - world.center();
            assert!((from_center.length() - world.width * ASTEROID_SPAWN_DISTANCE).abs() < 0.1);
            assert!(a.vel.dot(-from_center) > 0.0, "asteroid should close in");
            assert!((6..=8).contains(&a.points.len()));
            assert!((15.0..35.0).contains(&a.radius));
            assert!(a.points.iter().all(|p| p.length() <= a.radius + 1e-3));
            assert_eq!(a.color, 0xABCDEF);
        }
    }

    #[test]
    fn test_asteroid_respects_sector() {
        let mut rng = Pcg32::seed_from_u64(4);
        let world = world();
        let planets = vec![planet(world.center(), 100.0)];
        let sector = SpawnSector {
            start: 80.0,
            end: 100.0,
        };
        for id in 0..20 {
            let a = spawn_asteroid(
                &mut rng,
                id,
                &world,
                &planets,
                &[sector],
                0,
                &DevSettings::default(),
            );
            // Screen y grows downward, so 80..100 degrees is straight below
            assert!(a.pos.y > world.center().y + 1000.0);
        }
    }

    #[test]
    fn test_loot_only_in_zone() {
        let mut rng = Pcg32::seed_from_u64(5);
        let planets = vec![planet(Vec2::ZERO, 10.0)];
        let mut loot = Vec::new();
        let settings = DevSettings::default();
        assert!(!spawn_loot(&mut loot, &mut rng, Vec2::new(1000.0, 0.0), &planets, &settings));
        assert!(spawn_loot(&mut loot, &mut rng, Vec2::new(20.0, 0.0), &planets, &settings));

        let anywhere = DevSettings {
            loot_only_in_zone: false,
            ..Default::default()
        };
        assert!(spawn_loot(&mut loot, &mut rng, Vec2::new(1000.0, 0.0), &planets, &anywhere));
        assert_eq!(loot.len(), 2);
        assert!(loot.iter().all(|l| l.life == LOOT_LIFETIME && l.age == 0.0));
    }

    #[test]
    fn test_loot_kind_table() {
        assert_eq!(LootKind::from_roll(0.0), LootKind::Small);
        assert_eq!(LootKind::from_roll(0.6), LootKind::Medium);
        assert_eq!(LootKind::from_roll(0.95), LootKind::Large);
        assert_eq!(LootKind::Large.value(), 5);
        assert_eq!(LootKind::Medium.magnetic_radius(), 160.0);
    }

    #[test]
    fn test_loot_pulled_then_collected_once() {
        let rocket = Collector {
            pos: Vec2::ZERO,
            radius: 12.0,
        };
        // Small loot: radius 16, magnetic 120
        let mut loot = vec![Loot::new(LootKind::Small, Vec2::new(100.0, 0.0), Vec2::ZERO)];

        let collected = update_loot(&mut loot, Some(rocket), 400.0, 0.05);
        assert!(collected.is_empty());
        assert_eq!(loot.len(), 1);
        assert!(loot[0].vel.x < 0.0, "loot should accelerate toward the rocket");
        assert!(loot[0].pos.x < 100.0);

        let mut total = 0;
        for _ in 0..200 {
            total += update_loot(&mut loot, Some(rocket), 400.0, 0.05)
                .iter()
                .sum::<u32>();
            if loot.is_empty() {
                break;
            }
        }
        assert!(loot.is_empty());
        assert_eq!(total, 1);
        assert!(update_loot(&mut loot, Some(rocket), 400.0, 0.05).is_empty());
    }

    #[test]
    fn test_loot_ignores_rocket_without_collector() {
        let mut loot = vec![Loot::new(LootKind::Large, Vec2::new(5.0, 0.0), Vec2::ZERO)];
        let collected = update_loot(&mut loot, None, 400.0, 0.1);
        assert!(collected.is_empty());
        assert_eq!(loot.len(), 1);
        assert_eq!(loot[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_loot_expires() {
        let mut loot = vec![Loot::new(LootKind::Small, Vec2::ZERO, Vec2::ZERO)];
        loot[0].life = 0.05;
        update_loot(&mut loot, None, 400.0, 0.1);
        assert!(loot.is_empty());
    }

    #[test]
    fn test_dust_cloud_grows_and_expires() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut clouds = vec![spawn_dust_cloud(&mut rng, Vec2::new(100.0, 100.0), 20.0)];
        for layer in &clouds[0].layers {
            assert!((8..=12).contains(&layer.points.len()));
            assert_eq!(layer.points.len(), layer.anim.len());
            assert_eq!(layer.points.len(), layer.offsets.len());
        }
        assert_eq!(clouds[0].current_radius(), 20.0);

        update_dust_clouds(&mut clouds, None, 1.0, 0.1);
        update_dust_clouds(&mut clouds, None, 1.0, 0.1);
        update_dust_clouds(&mut clouds, None, 1.0, 0.1);
        assert!(clouds[0].current_radius() > 20.0);
        assert!(clouds[0].layers[0].offsets.iter().any(|o| *o != Vec2::ZERO));
        assert_eq!(clouds[0].pos, Vec2::new(100.0, 100.0));

        for _ in 0..100 {
            update_dust_clouds(&mut clouds, None, 1.0, 0.1);
        }
        assert!(clouds.is_empty());
    }

    #[test]
    fn test_dust_cloud_drifts_outward() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut clouds = vec![spawn_dust_cloud(&mut rng, Vec2::new(600.0, 400.0), 20.0)];
        for _ in 0..10 {
            update_dust_clouds(&mut clouds, Some(Vec2::new(500.0, 400.0)), 1.0, 0.1);
        }
        assert!(clouds[0].pos.x > 600.0);
    }

    #[test]
    fn test_asteroid_gravity_only_inside_zone() {
        let planets = vec![planet(Vec2::ZERO, 100.0)];
        let settings = DevSettings::default();
        let mut asteroids = vec![
            Asteroid {
                id: 1,
                pos: Vec2::new(200.0, 0.0),
                vel: Vec2::ZERO,
                radius: 20.0,
                angle: 0.0,
                spin: 0.0,
                points: Vec::new(),
                color: 0,
            },
            Asteroid {
                id: 2,
                pos: Vec2::new(5000.0, 0.0),
                vel: Vec2::ZERO,
                radius: 20.0,
                angle: 0.0,
                spin: 0.0,
                points: Vec::new(),
                color: 0,
            },
        ];
        apply_asteroid_gravity(&mut asteroids, &planets, &settings, 0.1);
        assert!(asteroids[0].vel.x < 0.0);
        assert_eq!(asteroids[1].vel, Vec2::ZERO);
    }
}
