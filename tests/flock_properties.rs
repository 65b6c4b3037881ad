use flocking::{BoundaryPolicy, Flock, FlockError, FrameBuffer, SimulationParams};
use nannou::prelude::{Vec2, Vec3};

fn seeded(mut params: SimulationParams, seed: u64, boids: usize) -> SimulationParams {
    params.rng_seed = Some(seed);
    params.num_boids = boids;
    params
}

// Spread a planar flock over a small grid so every rule has work to do
fn grid_flock(params: SimulationParams, side: usize, spacing: f32) -> Flock<Vec2> {
    let mut flock = Flock::<Vec2>::new(params).expect("flock");
    for row in 0..side {
        for col in 0..side {
            let position = Vec2::new(200.0 + col as f32 * spacing, 100.0 + row as f32 * spacing);
            flock.spawn(position).expect("spawn");
        }
    }
    flock
}

#[test]
fn speed_never_exceeds_max_speed() {
    let mut volume = Flock::<Vec3>::new(seeded(SimulationParams::volume(), 11, 120)).unwrap();
    let mut planar = grid_flock(seeded(SimulationParams::planar(), 12, 0), 8, 6.0);

    for _ in 0..200 {
        volume.tick().unwrap();
        planar.tick().unwrap();

        for boid in volume.boids() {
            assert!(boid.velocity().length() <= boid.max_speed() + 1e-5);
        }
        for boid in planar.boids() {
            assert!(boid.velocity().length() <= boid.max_speed() + 1e-5);
        }
    }
}

#[test]
fn same_seed_gives_identical_trajectories() {
    let run = |parallel: bool| {
        let mut params = seeded(SimulationParams::volume(), 99, 80);
        params.enable_parallel = parallel;
        let mut flock = Flock::<Vec3>::new(params).unwrap();
        for _ in 0..60 {
            flock.tick().unwrap();
        }
        flock
            .boids()
            .iter()
            .map(|b| (b.position(), b.velocity()))
            .collect::<Vec<_>>()
    };

    let first = run(true);
    let second = run(true);
    let sequential = run(false);
    assert_eq!(first, second);
    assert_eq!(first, sequential);
}

#[test]
fn neighbor_order_does_not_change_the_tick() {
    let mut params = SimulationParams::planar();
    params.num_boids = 0;
    params.enable_parallel = false;

    let starts: Vec<(Vec2, Vec2)> = (0..12)
        .map(|i| {
            let i = i as f32;
            (
                Vec2::new(150.0 + (i * 7.3) % 40.0, 120.0 + (i * 3.1) % 30.0),
                Vec2::new((i * 0.37).sin(), (i * 0.61).cos()),
            )
        })
        .collect();

    let mut forward = Flock::<Vec2>::new(params.clone()).unwrap();
    for &(position, velocity) in &starts {
        forward.spawn_with_velocity(position, velocity).unwrap();
    }
    let mut reversed = Flock::<Vec2>::new(params).unwrap();
    for &(position, velocity) in starts.iter().rev() {
        reversed.spawn_with_velocity(position, velocity).unwrap();
    }

    forward.tick().unwrap();
    reversed.tick().unwrap();

    let n = starts.len();
    for (k, boid) in reversed.boids().iter().enumerate() {
        let twin = &forward.boids()[n - 1 - k];
        assert!((boid.position() - twin.position()).length() < 1e-4);
        assert!((boid.velocity() - twin.velocity()).length() < 1e-4);
    }
}

#[test]
fn lone_boid_only_feels_the_recenter_pull() {
    let mut params = seeded(SimulationParams::volume(), 1, 0);
    params.boundary = BoundaryPolicy::Recenter { weight: 0.5 };
    let mut flock = Flock::<Vec3>::new(params).unwrap();
    flock.spawn_with_velocity(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO).unwrap();
    flock.set_target(Vec3::new(3.0, 0.0, 0.0)).unwrap();

    flock.tick().unwrap();

    // acceleration = 0.5 * (target - position) = (1, 0, 0)
    let boid = &flock.boids()[0];
    assert!((boid.velocity() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    assert!((boid.position() - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn far_target_still_reaches_full_speed() {
    let mut params = seeded(SimulationParams::volume(), 4, 0);
    params.enable_parallel = false;
    let mut flock = Flock::<Vec3>::new(params).unwrap();
    flock.spawn_with_velocity(Vec3::ZERO, Vec3::ZERO).unwrap();
    flock.set_target(Vec3::new(1e30, 0.0, 0.0)).unwrap();

    flock.tick().unwrap();

    let boid = &flock.boids()[0];
    assert!((boid.velocity() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    assert!((boid.position() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn target_may_jump_between_ticks() {
    let mut flock = Flock::<Vec3>::new(seeded(SimulationParams::volume(), 5, 30)).unwrap();
    for i in 0..20 {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        flock.set_target(Vec3::new(sign * 50.0, -sign * 20.0, 3.0)).unwrap();
        flock.tick().unwrap();
    }
    assert!(flock.boids().iter().all(|b| b.is_finite()));
}

#[test]
fn wrap_relocates_only_the_crossing_axis() {
    let mut params = seeded(SimulationParams::volume(), 2, 0);
    params.bounds.width = 5.0;
    params.boundary = BoundaryPolicy::Wrap { radius: 3.0 };
    let mut flock = Flock::<Vec3>::new(params).unwrap();
    flock
        .spawn_with_velocity(Vec3::new(-2.5, 1.0, 2.0), Vec3::new(-1.0, 0.0, 0.0))
        .unwrap();

    flock.tick().unwrap();

    assert_eq!(flock.boids()[0].position(), Vec3::new(8.0, 1.0, 2.0));
}

#[test]
fn close_boids_at_rest_push_apart() {
    let mut params = SimulationParams::planar();
    params.num_boids = 0;
    params.boundary = BoundaryPolicy::Open;
    let mut flock = Flock::<Vec2>::new(params).unwrap();
    flock.spawn_with_velocity(Vec2::new(100.0, 100.0), Vec2::ZERO).unwrap();
    flock.spawn_with_velocity(Vec2::new(101.0, 100.0), Vec2::ZERO).unwrap();

    flock.tick().unwrap();

    let left = flock.boids()[0].velocity();
    let right = flock.boids()[1].velocity();
    assert!(left.x < 0.0);
    assert!(right.x > 0.0);
    assert_eq!(left.y, 0.0);
    assert_eq!(right.y, 0.0);
}

#[test]
fn non_finite_state_is_reported() {
    let mut params = seeded(SimulationParams::volume(), 3, 0);
    params.enable_parallel = false;
    let mut flock = Flock::<Vec3>::new(params).unwrap();
    let id = flock
        .spawn_with_velocity(Vec3::new(f32::MAX, 0.0, 0.0), Vec3::ZERO)
        .unwrap();
    flock.set_target(Vec3::new(-f32::MAX, 0.0, 0.0)).unwrap();

    assert_eq!(flock.tick(), Err(FlockError::NonFiniteState { id, tick: 1 }));
    assert_eq!(flock.tick_count(), 0);
}

#[test]
fn sink_sees_the_post_tick_state() {
    let mut flock = Flock::<Vec3>::new(seeded(SimulationParams::volume(), 8, 25)).unwrap();
    let buffer = FrameBuffer::new();
    let frame = buffer.handle();
    flock.add_sink(Box::new(buffer));

    flock.tick().unwrap();

    let frame = frame.lock().unwrap();
    assert_eq!(frame.tick, 1);
    for (rendered, boid) in frame.boids.iter().zip(flock.boids()) {
        assert_eq!(rendered.id, boid.id());
        assert_eq!(rendered.position, boid.position());
        assert_eq!(rendered.velocity, boid.velocity());
    }
    assert_eq!(frame.boids[0].id.to_string(), format!("flock-{}-boid-0", flock.id().0));
}

#[test]
fn spawn_velocity_range_is_configurable() {
    let mut params = seeded(SimulationParams::planar(), 21, 200);
    params.spawn_velocity_range = 0.25;
    let flock = Flock::<Vec2>::new(params).unwrap();
    assert!(flock
        .boids()
        .iter()
        .all(|b| b.velocity().x.abs() <= 0.25 && b.velocity().y.abs() <= 0.25));
    assert!(flock.boids().iter().any(|b| b.velocity() != Vec2::ZERO));
}
