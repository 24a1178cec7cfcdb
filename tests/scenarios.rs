use aimlink::pointer::{HostCall, RecordingPointerHost, INITIAL_POINTER_STATE};
use aimlink::sink::RecordingSink;
use aimlink::{
    AimState, AppConfig, EventOutcome, KeyCode, KeyEvent, PlatformEvent, PointerMode,
    PointerState, PopupVisibility, SensitivityConfig, Session,
};

fn reference_config() -> AppConfig {
    AppConfig {
        sensitivity: SensitivityConfig {
            base_axis_sensitivity: 0.064,
            look_sensitivity_x: 0.45,
            look_sensitivity_y: 0.45,
            scope_sensitivity_x: 0.45,
            scope_sensitivity_y: 0.45,
            platform_scale: 34.72,
        },
        ..Default::default()
    }
}

fn session() -> (Session, RecordingSink, RecordingPointerHost) {
    let sink = RecordingSink::new();
    let host = RecordingPointerHost::new();
    let session = Session::new(
        reference_config(),
        Box::new(sink.clone()),
        Box::new(host.clone()),
    )
    .expect("reference config is valid");
    (session, sink, host)
}

fn press(session: &mut Session, code: KeyCode) {
    session.handle(PlatformEvent::Key(KeyEvent::down(code)));
    session.handle(PlatformEvent::Key(KeyEvent::up(code)));
}

fn motion(session: &mut Session, dx: f64, dy: f64, aim: AimState) -> Option<(f64, f64)> {
    match session.handle(PlatformEvent::Motion { dx, dy, aim }) {
        EventOutcome::Forwarded { dx, dy } => Some((dx, dy)),
        EventOutcome::Discarded => None,
        other => panic!("unexpected outcome for motion: {other:?}"),
    }
}

#[test]
fn reference_tuning_maps_hip_motion_near_one_to_one() {
    let (mut session, _sink, _host) = session();
    press(&mut session, KeyCode::LEFT_ALT);

    let (x, y) = motion(&mut session, 10.0, 10.0, AimState::HipFire).unwrap();
    let expected = 10.0 * 0.064 * 0.45 * 34.72;
    assert!((x - expected).abs() < 1e-4, "x = {x}");
    assert!((y - expected).abs() < 1e-4, "y = {y}");
    assert!((x - 10.0).abs() < 0.01);
}

#[test]
fn popup_key_from_initial_state_shows_popup_only() {
    let (mut session, _sink, host) = session();
    assert_eq!(session.pointer_state(), INITIAL_POINTER_STATE);

    press(&mut session, KeyCode::P);

    assert_eq!(
        session.pointer_state(),
        PointerState {
            mode: PointerMode::Free,
            popup: PopupVisibility::Shown,
        }
    );
    assert_eq!(host.calls(), vec![HostCall::PopupVisible(true)]);
}

#[test]
fn trigger_locks_forwards_and_unlocks() {
    let (mut session, sink, host) = session();

    press(&mut session, KeyCode::LEFT_ALT);
    assert_eq!(
        session.pointer_state(),
        PointerState {
            mode: PointerMode::Locked,
            popup: PopupVisibility::Hidden,
        }
    );

    let multipliers = session.settings().multipliers();
    let forwarded = motion(&mut session, 5.0, -3.0, AimState::Scoped).unwrap();
    assert_eq!(
        forwarded,
        (5.0 * multipliers.ads_x, -3.0 * multipliers.ads_y)
    );

    press(&mut session, KeyCode::LEFT_ALT);
    assert_eq!(session.pointer_state(), INITIAL_POINTER_STATE);
    assert_eq!(motion(&mut session, 5.0, -3.0, AimState::Scoped), None);

    assert_eq!(sink.deltas(), vec![forwarded]);
    assert_eq!(
        host.calls(),
        vec![HostCall::Captured(true), HostCall::Captured(false)]
    );
}

#[test]
fn rejected_update_leaves_multipliers_bit_identical() {
    let (mut session, _sink, _host) = session();
    let before = session.settings().multipliers().to_bits();

    let outcome = session.handle(PlatformEvent::Config(SensitivityConfig {
        base_axis_sensitivity: 0.0,
        ..reference_config().sensitivity
    }));

    assert!(matches!(outcome, EventOutcome::ConfigRejected(ref e) if e.is_invalid_config()));
    assert_eq!(session.settings().multipliers().to_bits(), before);
}

#[test]
fn config_push_takes_effect_on_next_motion() {
    let (mut session, _sink, _host) = session();
    press(&mut session, KeyCode::LEFT_ALT);

    let doubled = SensitivityConfig {
        platform_scale: 69.44,
        ..reference_config().sensitivity
    };
    assert!(matches!(
        session.handle(PlatformEvent::Config(doubled)),
        EventOutcome::ConfigApplied(1)
    ));

    let m = doubled.derive_multipliers();
    assert_eq!(
        motion(&mut session, 2.0, 1.0, AimState::HipFire),
        Some((2.0 * m.hip_x, m.hip_y))
    );
}

#[test]
fn unrelated_keys_do_not_disturb_lock() {
    let (mut session, _sink, host) = session();
    press(&mut session, KeyCode::LEFT_ALT);
    press(&mut session, KeyCode::TAB);
    press(&mut session, KeyCode::ESCAPE);

    assert!(session.pointer_state().is_locked());
    assert_eq!(host.calls(), vec![HostCall::Captured(true)]);
}
