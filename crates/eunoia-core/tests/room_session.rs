//! End-to-end behaviour of a room session driven the way the host drives
//! it: explicit frame steps, key presses, and backend instructions.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use eunoia_core::config::EngineConfig;
use eunoia_core::input::InputCommand;
use eunoia_core::reply::{ReplySource, ScriptedReplies, decode_reply, resolve_reply};
use eunoia_core::session::RoomSession;
use eunoia_room::{RoomLayout, create_starting_room, default_furniture};
use eunoia_types::{
    Action, CopingRequest, Direction, ExerciseCategory, GridBounds, Instruction, Position,
    RoomEvent, Tile,
};

const FRAME: Duration = Duration::from_millis(16);

fn session() -> RoomSession {
    RoomSession::new(create_starting_room().unwrap(), &EngineConfig::default())
}

fn session_at(start: Tile) -> RoomSession {
    let layout = RoomLayout::new(20, GridBounds::default(), start, default_furniture()).unwrap();
    RoomSession::new(layout, &EngineConfig::default())
}

fn run(session: &mut RoomSession, frames: u32) -> Vec<RoomEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(session.step(FRAME).unwrap().events);
    }
    events
}

fn navigations(events: &[RoomEvent]) -> Vec<CopingRequest> {
    events
        .iter()
        .filter_map(|e| match e {
            RoomEvent::NavigateToExercises { request } => Some(request.clone()),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Walkability
// ---------------------------------------------------------------------------

#[test]
fn tiles_outside_bounds_are_never_walkable() {
    let layout = create_starting_room().unwrap();
    for v in -3..=22 {
        let v = f64::from(v);
        for edge in [-1.0, 0.0, 1.0, 19.0, 20.0, 21.0] {
            assert!(!layout.is_walkable(edge, v), "({edge}, {v})");
            assert!(!layout.is_walkable(v, edge), "({v}, {edge})");
        }
    }
}

#[test]
fn solid_footprints_block_and_their_border_does_not() {
    let layout = create_starting_room().unwrap();
    let bed = layout.get("bed").unwrap();
    let (ox, oy) = (bed.origin.x, bed.origin.y);
    let (w, d) = (
        i32::try_from(bed.footprint.width).unwrap(),
        i32::try_from(bed.footprint.depth).unwrap(),
    );
    for x in ox..ox + w {
        for y in oy..oy + d {
            assert!(!layout.is_walkable(f64::from(x), f64::from(y)), "bed tile ({x}, {y})");
        }
    }
    // Left edge, right edge, and the row in front of the bed.
    for y in oy..oy + d {
        assert!(layout.is_walkable(f64::from(ox - 1), f64::from(y)));
        assert!(layout.is_walkable(f64::from(ox + w), f64::from(y)));
    }
    assert!(layout.is_walkable(f64::from(ox), f64::from(oy + d)));
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[test]
fn blocked_key_press_leaves_position_unchanged() {
    // (13, 7) is the bed's interaction point; one step down enters the bed.
    let mut s = session_at(Tile::new(13, 7));
    let before = s.view();
    let events = s.handle_input(InputCommand::Move(Direction::Down));
    assert_eq!(s.view(), before);
    assert!(!events.iter().any(|e| matches!(e, RoomEvent::ActionChanged { .. })));
}

#[test]
fn continuous_travel_converges_and_walks_throughout() {
    let mut s = session();
    s.set_target(Some(Position::new(13.0, 10.0))).unwrap();

    let mut arrived = false;
    for _ in 0..500 {
        let report = s.step(FRAME).unwrap();
        if report
            .events
            .iter()
            .any(|e| matches!(e, RoomEvent::Arrived { .. }))
        {
            arrived = true;
            break;
        }
        assert_eq!(s.view().action, Action::Walking);
    }

    assert!(arrived, "never arrived");
    let view = s.view();
    assert!(view.position.is_near(Position::new(13.0, 10.0), 0.1));
    assert_eq!(view.position, Position::new(13.0, 10.0));
    assert_eq!(view.action, Action::Idle);
    assert!(view.target.is_none());
}

#[test]
fn travel_into_furniture_reports_blocked() {
    let mut s = session_at(Tile::new(13, 7));
    s.set_target(Some(Position::new(17.0, 7.0))).unwrap();
    let events = run(&mut s, 50);
    assert!(events.contains(&RoomEvent::Blocked {
        position: Position::new(13.0, 7.0),
        target: Position::new(17.0, 7.0),
    }));
    assert_eq!(s.view().action, Action::Idle);
    assert!(!events.iter().any(|e| matches!(e, RoomEvent::Arrived { .. })));
}

// ---------------------------------------------------------------------------
// Poses
// ---------------------------------------------------------------------------

#[test]
fn same_pose_twice_nudges_one_tile_opposite_facing() {
    let mut s = session();
    // Walk down one tile so the character faces down (x + 1).
    s.handle_input(InputCommand::Move(Direction::Down));
    run(&mut s, 20);
    assert_eq!(s.view().direction, Direction::Down);
    let start = s.view().position;

    s.trigger(Action::Sitting);
    assert_eq!(s.view().action, Action::Sitting);
    s.trigger(Action::Sitting);

    let view = s.view();
    assert_eq!(view.action, Action::Idle);
    assert_eq!(view.position, Position::new(start.x - 1.0, start.y));
}

#[test]
fn expiring_pose_returns_to_idle() {
    let mut s = session();
    s.trigger(Action::Drinking);
    run(&mut s, 300);
    assert_eq!(s.view().action, Action::Drinking);
    let events = run(&mut s, 20);
    assert!(events.contains(&RoomEvent::ActionChanged {
        from: Action::Drinking,
        to: Action::Idle,
    }));
}

#[test]
fn persistent_pose_holds() {
    let mut s = session();
    s.trigger(Action::Sleeping);
    run(&mut s, 1_000);
    assert_eq!(s.view().action, Action::Sleeping);
}

#[test]
fn configured_persistence_is_honoured() {
    let config =
        EngineConfig::parse("poses:\n  duration_ms: 100\n  persistent: [drinking]\n").unwrap();
    let mut s = RoomSession::new(create_starting_room().unwrap(), &config);
    s.trigger(Action::Drinking);
    run(&mut s, 50);
    assert_eq!(s.view().action, Action::Drinking);
    s.trigger(Action::Sitting);
    run(&mut s, 10);
    assert_eq!(s.view().action, Action::Idle);
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

#[test]
fn sleep_on_bed_walks_to_bed_and_sleeps() {
    let mut s = session();
    let events = s.apply_instruction(&Instruction::new("Time to rest.", "CALM", "SLEEP", "BED"));
    assert_eq!(s.view().target, Some(Position::new(13.0, 7.0)));
    assert!(events.contains(&RoomEvent::Speak {
        text: "Time to rest.".to_owned(),
    }));

    let events = run(&mut s, 500);
    assert!(events.contains(&RoomEvent::Arrived {
        position: Position::new(13.0, 7.0),
    }));
    let view = s.view();
    assert_eq!(view.action, Action::Sleeping);
    assert_eq!(view.position, Position::new(13.0, 7.0));
    assert_eq!(view.display_position, Position::new(15.0, 7.0));
}

#[test]
fn unrecognized_action_results_in_idle() {
    let mut s = session();
    s.apply_instruction(&Instruction::new("Woo!", "", "DANCE", "NONE"));
    assert_eq!(s.view().action, Action::Idle);
    run(&mut s, 10);
    assert_eq!(s.view().action, Action::Idle);
}

#[test]
fn breathe_navigates_exactly_once_after_delay() {
    let mut s = session();
    let instruction =
        Instruction::new("Let's take a slow breath together.", "CALM", "BREATHE", "NONE");
    let events = s.apply_instruction(&instruction);
    assert!(navigations(&events).is_empty());
    assert_eq!(s.view().action, Action::Breathing);

    // 1.9 s: not yet.
    let events = run(&mut s, 119);
    assert!(navigations(&events).is_empty());

    // Past 2 s: exactly once, and never again.
    let events = run(&mut s, 200);
    assert_eq!(
        navigations(&events),
        vec![CopingRequest {
            category: Some(ExerciseCategory::Breathing),
            query: None,
        }]
    );
}

#[test]
fn breathe_on_rug_walks_there_and_breathes() {
    let mut s = session();
    let instruction = Instruction::new("Anxious? Come sit on the mat.", "CALM", "BREATHE", "MAT");
    s.apply_instruction(&instruction);
    let events = run(&mut s, 500);
    assert_eq!(s.view().position, Position::new(11.0, 11.0));
    assert_eq!(s.view().action, Action::Breathing);
    assert_eq!(
        navigations(&events),
        vec![CopingRequest {
            category: Some(ExerciseCategory::All),
            query: Some("anxiety".to_owned()),
        }]
    );
}

#[test]
fn backend_failure_shows_anxious_fallback() {
    let mut s = session();
    let instruction = resolve_reply(decode_reply("502 Bad Gateway"));
    let events = s.apply_instruction(&instruction);
    assert_eq!(s.view().action, Action::Anxious);
    assert!(events.iter().any(|e| matches!(e, RoomEvent::Speak { .. })));
}

#[test]
fn offline_replies_drive_emotions() {
    let mut s = session();
    let mut source = ScriptedReplies::new();
    let instruction = resolve_reply(source.reply("I feel sad"));
    s.apply_instruction(&instruction);
    assert_eq!(s.view().action, Action::Concerned);
}
