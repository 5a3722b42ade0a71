//! Shipped maps and map parsing errors

use fieldtris::core::{
    Controller, ControllerConfig, EngineContext, EngineError, MapError, MapSpec, Positionable,
    RunState, ScriptedPieces,
};
use fieldtris::types::{GameEvent, PieceKind, Point};

const CLASSIC: &str = include_str!("../maps/classic.txt");
const PILLAR: &str = include_str!("../maps/pillar.txt");

fn drop_until_locked(game: &mut Controller) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while !events.iter().any(|e| matches!(e, GameEvent::Locked(_))) {
        assert_eq!(game.gravity_tick(), RunState::Running);
        events.extend(game.drain_events());
    }
    events
}

#[test]
fn test_classic_map_shape() {
    let map = MapSpec::parse(CLASSIC).unwrap();
    assert_eq!((map.width, map.height), (12, 21));
    assert_eq!(map.walls.len(), 20 * 2 + 12);
    assert!(map.walls.contains(&Point::new(0, 0)));
    assert!(map.walls.contains(&Point::new(11, 20)));
    assert!(!map.walls.contains(&Point::new(5, 0)));
}

#[test]
fn test_piece_lands_on_classic_floor() {
    let map = MapSpec::parse(CLASSIC).unwrap();
    let ctx = EngineContext::new(ScriptedPieces::repeat(PieceKind::I));
    let mut game = Controller::new(&map, ControllerConfig::default(), ctx).unwrap();
    game.start();
    let id = game.current_id().unwrap();
    assert_eq!(game.spawn_origin(), Point::new(5, 0));

    let events = drop_until_locked(&mut game);
    assert_eq!(events[0], GameEvent::Locked(id));
    let landed = game.objects().piece(id).unwrap();
    assert!(landed.cells().iter().all(|c| c.y == 19));
}

#[test]
fn test_piece_lands_on_pillar() {
    let map: MapSpec = PILLAR.parse().unwrap();
    assert_eq!((map.width, map.height), (14, 21));
    assert_eq!(map.walls.len(), 20 * 2 + 4 + 14);

    let ctx = EngineContext::new(ScriptedPieces::repeat(PieceKind::O));
    let mut game = Controller::new(&map, ControllerConfig::default(), ctx).unwrap();
    game.start();
    let id = game.current_id().unwrap();

    drop_until_locked(&mut game);
    assert_eq!(game.objects().piece(id).unwrap().origin(), Point::new(6, 12));
}

#[test]
fn test_ragged_map_reports_line() {
    let err = MapSpec::parse("#..#\n#.#\n####\n").unwrap_err();
    assert_eq!(
        err,
        MapError::Ragged {
            line: 2,
            expected: 4,
            found: 3
        }
    );
}

#[test]
fn test_unknown_glyph_reports_position() {
    let err = MapSpec::parse("....\n..x.\n").unwrap_err();
    assert_eq!(
        err,
        MapError::UnknownGlyph {
            line: 2,
            column: 3,
            glyph: 'x'
        }
    );
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_windows_line_endings_and_trailing_blank_lines() {
    let map = MapSpec::parse("#.#\r\n###\r\n\r\n\n").unwrap();
    assert_eq!((map.width, map.height), (3, 2));
    assert_eq!(map.walls.len(), 5);
}

#[test]
fn test_map_errors_convert_into_engine_errors() {
    fn load(text: &str) -> Result<MapSpec, EngineError> {
        Ok(MapSpec::parse(text)?)
    }
    assert!(matches!(load(""), Err(EngineError::Map(MapError::Empty))));
}

#[test]
fn test_spawn_outside_map_is_rejected() {
    let map = MapSpec::empty(4, 4);
    let config = ControllerConfig {
        spawn: Some(Point::new(4, 0)),
        ..ControllerConfig::default()
    };
    let ctx = EngineContext::new(ScriptedPieces::repeat(PieceKind::T));
    assert!(matches!(
        Controller::new(&map, config, ctx),
        Err(EngineError::SpawnOutOfBounds(_))
    ));
}
