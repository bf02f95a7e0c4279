// Host-side tests for the autoplay unlock gate.

use sinbound_core::{UnlockGate, UnlockPolicy, UserGesture, HOME_UNLOCK, PLAYER_UNLOCK, RADIO_UNLOCK};

fn key<'a>(code: &'a str, key: &'a str) -> UserGesture<'a> {
    UserGesture::Key { code, key }
}

#[test]
fn gate_fires_once() {
    let mut gate = UnlockGate::new(PLAYER_UNLOCK);
    assert!(!gate.is_unlocked());
    assert!(gate.offer(UserGesture::PointerDown));
    assert!(gate.is_unlocked());
    assert!(!gate.offer(UserGesture::PointerDown));
    assert!(!gate.offer(key("KeyA", "a")));
}

#[test]
fn home_accepts_pointer_or_space() {
    assert!(HOME_UNLOCK.accepts(UserGesture::PointerDown));
    assert!(HOME_UNLOCK.accepts(key("Space", " ")));
    assert!(HOME_UNLOCK.accepts(key("", " ")));
    assert!(!HOME_UNLOCK.accepts(key("Enter", "Enter")));
}

#[test]
fn radio_accepts_arrows_only() {
    let mut gate = UnlockGate::new(RADIO_UNLOCK);
    assert!(!gate.offer(key("Space", " ")));
    assert!(!gate.is_unlocked());
    assert!(gate.offer(key("ArrowRight", "ArrowRight")));
    assert_eq!(gate.policy(), RADIO_UNLOCK);
}

#[test]
fn any_gesture_accepts_every_key() {
    for (code, k) in [("KeyQ", "q"), ("Escape", "Escape"), ("Digit1", "1")] {
        assert!(UnlockPolicy::AnyGesture.accepts(key(code, k)));
    }
}
