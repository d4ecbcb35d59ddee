use std::time::Duration;

use maze_chase_core::{
    Command, Event, Heading, Phase, PursuerIdentity, PursuerState, TileCoord,
};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, PursuerConfig, SimulationConfig, World};

const OPEN_FIELD: [&str; 13] = [
    "###############",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "#.............#",
    "###############",
];

fn open_field_with_leader(spawn: TileCoord, heading: Heading, player: TileCoord) -> World {
    let config = SimulationConfig {
        layout: OPEN_FIELD.iter().map(|row| (*row).to_owned()).collect(),
        player_start: player,
        pursuers: vec![PursuerConfig {
            identity: PursuerIdentity::Leader,
            spawn,
            home: TileCoord::new(6, 7),
            scatter_corner: TileCoord::new(0, 14),
            speed: 2,
            heading,
        }],
        ..SimulationConfig::default()
    };
    World::from_config(&config).expect("open field config")
}

fn tick(world: &mut World, pursuit: &mut Pursuit, now: Duration) -> (Vec<Command>, Vec<Event>) {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { now }, &mut events);

    let mut commands = Vec::new();
    pursuit.handle(
        &events,
        query::player(world).tile,
        query::leader_corner(world),
        &query::pursuer_view(world),
        query::maze(world),
        &mut commands,
    );
    for command in commands.clone() {
        world::apply(world, command, &mut events);
    }
    (commands, events)
}

fn state_of(world: &World, identity: PursuerIdentity) -> Option<PursuerState> {
    query::pursuer_view(world)
        .get(identity)
        .map(|snapshot| snapshot.state)
}

#[test]
fn chasing_leader_turns_toward_the_player() {
    let mut world = open_field_with_leader(
        TileCoord::new(10, 12),
        Heading::Up,
        TileCoord::new(10, 10),
    );
    let mut events = Vec::new();
    world::apply(&mut world, Command::SetPhase { phase: Phase::Chase }, &mut events);
    assert_eq!(state_of(&world, PursuerIdentity::Leader), Some(PursuerState::Chase));

    let mut pursuit = Pursuit::new(1);
    let (commands, _) = tick(&mut world, &mut pursuit, Duration::from_millis(16));

    assert_eq!(
        commands,
        vec![
            Command::SteerPursuer {
                pursuer: PursuerIdentity::Leader,
                heading: Heading::Left,
            },
            Command::AdvancePursuer {
                pursuer: PursuerIdentity::Leader,
            },
        ]
    );
}

#[test]
fn scattering_leader_heads_for_its_corner() {
    let mut world = open_field_with_leader(
        TileCoord::new(10, 12),
        Heading::Left,
        TileCoord::new(10, 10),
    );
    let mut pursuit = Pursuit::new(1);
    let (commands, _) = tick(&mut world, &mut pursuit, Duration::from_millis(16));

    assert!(commands.contains(&Command::SteerPursuer {
        pursuer: PursuerIdentity::Leader,
        heading: Heading::Up,
    }));
}

#[test]
fn pursuers_only_decide_on_tile_boundaries() {
    let mut world = open_field_with_leader(
        TileCoord::new(10, 12),
        Heading::Left,
        TileCoord::new(10, 10),
    );
    let mut pursuit = Pursuit::new(1);
    let _ = tick(&mut world, &mut pursuit, Duration::from_millis(16));

    for step in 2..=8u64 {
        let (commands, _) = tick(&mut world, &mut pursuit, Duration::from_millis(16 * step));
        assert_eq!(
            commands,
            vec![Command::AdvancePursuer {
                pursuer: PursuerIdentity::Leader,
            }]
        );
    }

    let leader = *query::pursuer_view(&world)
        .get(PursuerIdentity::Leader)
        .expect("leader");
    assert!(leader.at_boundary);
    assert_eq!(leader.tile, TileCoord::new(9, 12));
}

#[test]
fn fright_wears_off_after_six_seconds() {
    let mut world = World::from_config(&SimulationConfig::default()).expect("default config");
    let mut pursuit = Pursuit::new(3);
    let start = Duration::from_secs(2);

    let _ = tick(&mut world, &mut pursuit, start);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Frighten {
            pursuer: PursuerIdentity::Leader,
        },
        &mut events,
    );

    let mut now = start;
    while now < start + Duration::from_secs(6) {
        now += Duration::from_millis(500);
        let (_, events) = tick(&mut world, &mut pursuit, now);
        let expired = events.iter().any(|event| {
            matches!(
                event,
                Event::PursuerStateChanged {
                    pursuer: PursuerIdentity::Leader,
                    from: PursuerState::Frightened,
                    ..
                }
            )
        });
        assert_eq!(expired, now == start + Duration::from_secs(6), "at {now:?}");
    }
    assert_eq!(state_of(&world, PursuerIdentity::Leader), Some(PursuerState::Scatter));
}

#[test]
fn retreating_pursuer_rejoins_the_clock_at_home() {
    let mut world = World::from_config(&SimulationConfig::default()).expect("default config");
    let mut events = Vec::new();
    for command in [
        Command::Frighten {
            pursuer: PursuerIdentity::Ambusher,
        },
        Command::Catch {
            pursuer: PursuerIdentity::Ambusher,
        },
    ] {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(
        state_of(&world, PursuerIdentity::Ambusher),
        Some(PursuerState::Retreating)
    );

    let mut pursuit = Pursuit::new(9);
    let (commands, _) = tick(&mut world, &mut pursuit, Duration::from_millis(16));

    assert!(commands.contains(&Command::ReturnHome {
        pursuer: PursuerIdentity::Ambusher,
    }));
    assert_eq!(
        state_of(&world, PursuerIdentity::Ambusher),
        Some(PursuerState::Scatter)
    );
}
