//! Collision and boundary resolution
//!
//! Everything here is circle-vs-circle: bodies touch when the distance
//! between centres is strictly less than the sum of their radii.

use glam::Vec2;

use super::entities::Asteroid;
use super::rocket::Rocket;
use super::state::{EndReason, Planet};

/// An asteroid destroyed against a planet or another asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Where effects should spawn
    pub pos: Vec2,
    /// Size of the resulting dust cloud
    pub radius: f32,
}

#[inline]
fn overlaps(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Decide whether the rocket's run ends this step.
///
/// Leaving every play zone wins over any contact, and planet contact wins
/// over asteroid contact.
pub fn rocket_end_condition(
    inside_any_zone: bool,
    rocket: &Rocket,
    planets: &[Planet],
    asteroids: &[Asteroid],
    check_asteroids: bool,
) -> Option<EndReason> {
    if !inside_any_zone {
        return Some(EndReason::Bounds);
    }
    let hit_planet = planets
        .iter()
        .any(|p| overlaps(rocket.pos, rocket.collision_radius, p.pos, p.radius));
    let hit_asteroid = check_asteroids
        && asteroids
            .iter()
            .any(|a| overlaps(rocket.pos, rocket.collision_radius, a.pos, a.radius));
    (hit_planet || hit_asteroid).then_some(EndReason::Collision)
}

/// Remove asteroids that have reached a planet surface
pub fn asteroid_planet_impacts(asteroids: &mut Vec<Asteroid>, planets: &[Planet]) -> Vec<Impact> {
    let mut impacts = Vec::new();
    asteroids.retain(|a| {
        let hit = planets
            .iter()
            .any(|p| overlaps(a.pos, a.radius, p.pos, p.radius));
        if hit {
            log::debug!("Asteroid {} hit a planet at {:?}", a.id, a.pos);
            impacts.push(Impact {
                pos: a.pos,
                radius: a.radius,
            });
        }
        !hit
    });
    impacts
}

/// Destroy overlapping asteroid pairs.
///
/// Each asteroid pairs with the first later asteroid it overlaps, and is
/// removed at most once. Removal happens after the scan, so indices stay
/// stable while pairs are found.
pub fn asteroid_pair_collisions(asteroids: &mut Vec<Asteroid>) -> Vec<Impact> {
    let mut removed = vec![false; asteroids.len()];
    let mut collisions = Vec::new();

    for i in 0..asteroids.len() {
        if removed[i] {
            continue;
        }
        let a = &asteroids[i];
        for j in (i + 1)..asteroids.len() {
            if removed[j] {
                continue;
            }
            let b = &asteroids[j];
            if overlaps(a.pos, a.radius, b.pos, b.radius) {
                log::debug!("Asteroids {} and {} collided", a.id, b.id);
                removed[i] = true;
                removed[j] = true;
                collisions.push(Impact {
                    pos: (a.pos + b.pos) / 2.0,
                    radius: (a.radius + b.radius) / 2.0,
                });
                break;
            }
        }
    }

    let mut flags = removed.into_iter();
    asteroids.retain(|_| !flags.next().unwrap_or(false));
    collisions
}
