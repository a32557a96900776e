//! End-to-end freeze scenarios driven through the host event queue.

use stasis::{HostEvent, Simulation, SimulationConfig, SimulationError};
use stasis_core::{EffectBook, Location, ModuleState, MotionAttributes, MotionHost};

const START: Location = Location::new(0.0, 64.0, 0.0);

fn player() -> MotionAttributes {
    MotionAttributes {
        walk_speed: 0.25,
        fly_speed: 0.12,
        allow_flight: false,
        flying: false,
    }
}

fn simulation() -> Simulation {
    Simulation::new(SimulationConfig::default()).unwrap()
}

#[test]
fn test_frozen_player_stays_put_until_expiry() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    let tx = sim.sender();

    // Frozen at tick 0 for 100 ticks.
    sim.freeze(id, 100, false).unwrap();

    for tick in 1..100u16 {
        let to = Location::new(f32::from(tick), 64.0, 0.0);
        tx.send(HostEvent::Move { entity: id, to });
        let report = sim.step();
        assert_eq!(report.moves_reverted, 1, "tick {tick}");
        assert_eq!(report.expired, 0, "tick {tick}");
        assert_eq!(sim.world().location(id), Some(START));
    }

    let report = sim.step();
    assert_eq!(report.tick, 100);
    assert_eq!(report.expired, 1);
    assert_eq!(sim.world().motion(id), Some(player()));

    let free = Location::new(7.0, 64.0, 0.0);
    tx.send(HostEvent::Move { entity: id, to: free });
    assert_eq!(sim.step().moves_reverted, 0);
    assert_eq!(sim.world().location(id), Some(free));
}

#[test]
fn test_turning_allowed_player_can_look_around() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    sim.freeze(id, -1, true).unwrap();

    let tx = sim.sender();
    tx.send(HostEvent::Move { entity: id, to: START.looking(90.0, 15.0) });
    tx.send(HostEvent::Move { entity: id, to: Location::new(0.0, 65.0, 0.0) });
    let report = sim.step();

    assert_eq!(report.events, 2);
    assert_eq!(report.moves_reverted, 1);
    assert_eq!(sim.world().location(id), Some(START.looking(90.0, 15.0)));
}

#[test]
fn test_frozen_player_cannot_land() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    sim.freeze(id, -1, false).unwrap();

    let tx = sim.sender();
    tx.send(HostEvent::ToggleFlight { entity: id, flying: false });
    let report = sim.step();

    assert_eq!(report.flights_cancelled, 1);
    assert!(sim.world().motion(id).unwrap().flying);

    assert!(sim.unfreeze(id));
    assert_eq!(sim.world().motion(id), Some(player()));
}

#[test]
fn test_disconnect_restores_and_join_keeps_restored_values() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    sim.freeze(id, 1_000, false).unwrap();

    let tx = sim.sender();
    tx.send(HostEvent::Disconnect { entity: id });
    let report = sim.step();

    assert_eq!(report.released_on_disconnect, 1);
    assert!(!sim.freeze_registry().is_frozen(id));
    assert_eq!(sim.world().motion(id), Some(player()));
    assert!(!sim.world().get(id).unwrap().online);

    tx.send(HostEvent::Join { entity: id });
    sim.step();
    assert!(sim.world().get(id).unwrap().online);
    assert_eq!(sim.world().motion(id), Some(MotionAttributes::DEFAULT));
}

#[test]
fn test_freeze_does_not_outlive_session() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    sim.freeze(id, 100, false).unwrap();

    let tx = sim.sender();
    tx.send(HostEvent::Disconnect { entity: id });
    assert_eq!(sim.step().released_on_disconnect, 1);

    // Offline: no new freeze, movement and flight events are dropped.
    assert!(matches!(
        sim.freeze(id, 100, false),
        Err(SimulationError::Offline(offline)) if offline == id
    ));
    let away = Location::new(9.0, 64.0, 0.0);
    tx.send(HostEvent::Move { entity: id, to: away });
    tx.send(HostEvent::ToggleFlight { entity: id, flying: true });
    let report = sim.step();
    assert_eq!(report.events, 2);
    assert_eq!(report.ignored, 2);
    assert_eq!(report.moves_reverted, 0);
    assert_eq!(report.flights_cancelled, 0);
    assert_eq!(sim.world().location(id), Some(START));
    assert_eq!(sim.world().motion(id), Some(player()));

    tx.send(HostEvent::Join { entity: id });
    sim.step();
    assert!(!sim.freeze_registry().is_frozen(id));
    assert_eq!(sim.world().motion(id), Some(MotionAttributes::DEFAULT));

    tx.send(HostEvent::Move { entity: id, to: away });
    assert_eq!(sim.step().moves_reverted, 0);
    assert_eq!(sim.world().location(id), Some(away));
}

#[test]
fn test_join_without_reset() {
    let config = SimulationConfig {
        reset_speeds_on_join: false,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    let id = sim.spawn(player(), START);

    sim.sender().send(HostEvent::Join { entity: id });
    sim.step();
    assert_eq!(sim.world().motion(id), Some(player()));
}

#[test]
fn test_pause_holds_remaining_duration() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    sim.freeze(id, 20, false).unwrap();

    for _ in 0..10 {
        sim.step();
    }
    assert!(sim.set_freeze_state(ModuleState::Paused));
    for _ in 0..50 {
        assert_eq!(sim.step().expired, 0);
    }

    // The guard keeps working while paused.
    sim.sender().send(HostEvent::Move { entity: id, to: Location::new(1.0, 64.0, 0.0) });
    assert_eq!(sim.step().moves_reverted, 1);

    assert!(sim.set_freeze_state(ModuleState::Active));
    let mut expired_at = None;
    for _ in 0..20 {
        let report = sim.step();
        if report.expired > 0 {
            expired_at = Some(report.tick);
            break;
        }
    }
    // 10 ticks ran before the pause, 51 were spent paused.
    assert_eq!(expired_at, Some(71));
}

#[test]
fn test_stopped_module_lets_frozen_player_move() {
    let mut sim = simulation();
    let id = sim.spawn(player(), START);
    sim.freeze(id, -1, false).unwrap();

    assert!(sim.set_freeze_state(ModuleState::Stopped));
    let to = Location::new(2.0, 64.0, 0.0);
    sim.sender().send(HostEvent::Move { entity: id, to });
    assert_eq!(sim.step().moves_reverted, 0);

    // Still frozen: attributes stay overridden.
    assert!(sim.freeze_registry().is_frozen(id));
    assert_eq!(sim.world().motion(id), Some(MotionAttributes::FROZEN));
}

#[test]
fn test_shared_effect_book() {
    let book = EffectBook::shared();
    let mut sim = Simulation::with_effects(SimulationConfig::default(), book.clone()).unwrap();
    let id = sim.spawn(player(), START);
    let no_jump = sim.config().freeze.jump_effect.id.clone();

    sim.freeze(id, 5, false).unwrap();
    assert!(book.lock().has(id, &no_jump));

    for _ in 0..5 {
        sim.step();
    }
    assert!(!book.lock().has(id, &no_jump));
}

#[test]
fn test_many_players_release_independently() {
    let mut sim = simulation();
    let ids: Vec<_> = (0..20u8)
        .map(|i| sim.spawn(player(), Location::new(f32::from(i), 64.0, 0.0)))
        .collect();

    for (i, &id) in (1..).zip(&ids) {
        sim.freeze(id, i, false).unwrap();
    }

    let mut released = 0;
    for tick in 1..=20 {
        let report = sim.step();
        assert_eq!(report.tick, tick);
        assert_eq!(report.expired, 1);
        released += report.expired;
    }
    assert_eq!(released, 20);
    assert_eq!(sim.freeze_registry().frozen_count(), 0);
}
