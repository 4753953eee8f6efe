use glam::Vec3;
use uuid::Uuid;

/// Hard cap on live particles per system, keeps the pool bounded no matter
/// what emission rate the user dials in.
const MAX_PARTICLES: usize = 4096;

/// One simulated particle.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
}

/// Particle-system component.
///
/// The scene core runs the CPU simulation (spawn, integrate, expire) as
/// this node kind's per-frame state update; turning live particles into
/// billboards is the renderer's side of the contract.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub uuid: Uuid,

    /// Particles spawned per second.
    pub emission_rate: f32,
    /// Seconds a particle lives.
    pub lifetime: f32,
    /// Initial speed along the emitter's +Y.
    pub speed: f32,
    /// Fraction of gravity applied (0 = floats, 1 = full gravity).
    pub gravity_factor: f32,
    pub particle_scale: f32,
    pub random_rotation: bool,

    // Simulation state.
    particles: Vec<Particle>,
    spawn_accumulator: f32,
}

impl ParticleSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            emission_rate: 24.0,
            lifetime: 2.0,
            speed: 2.0,
            gravity_factor: 0.0,
            particle_scale: 1.0,
            random_rotation: true,
            particles: Vec::new(),
            spawn_accumulator: 0.0,
        }
    }

    /// Advances the simulation by `dt` seconds in emitter-local space.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        // Age and expire.
        let lifetime = self.lifetime;
        for p in &mut self.particles {
            p.age += dt;
        }
        self.particles.retain(|p| p.age < lifetime);

        // Integrate.
        let gravity = Vec3::new(0.0, -9.81 * self.gravity_factor, 0.0);
        for p in &mut self.particles {
            p.velocity += gravity * dt;
            p.position += p.velocity * dt;
        }

        // Spawn.
        self.spawn_accumulator += self.emission_rate * dt;
        while self.spawn_accumulator >= 1.0 && self.particles.len() < MAX_PARTICLES {
            self.spawn_accumulator -= 1.0;
            self.particles.push(Particle {
                position: Vec3::ZERO,
                velocity: Vec3::Y * self.speed,
                age: 0.0,
            });
        }
        // Drop whole particles we had no room for, fractions carry over.
        self.spawn_accumulator = self.spawn_accumulator.fract();
    }

    /// Resets the simulation (used when leaving play mode).
    pub fn reset(&mut self) {
        self.particles.clear();
        self.spawn_accumulator = 0.0;
    }

    #[inline]
    #[must_use]
    pub fn live_particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mints a fresh identity for a cloned system; simulation state is not
    /// carried over.
    #[must_use]
    pub(crate) fn duplicate(&self) -> Self {
        let mut clone = self.clone();
        clone.uuid = Uuid::new_v4();
        clone.reset();
        clone
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
