//! One-shot gate that waits for a user gesture the autoplay policy accepts.

/// A user input that may satisfy the autoplay policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserGesture<'a> {
    PointerDown,
    /// `code` is the physical key (`"Space"`), `key` the produced value (`" "`).
    Key { code: &'a str, key: &'a str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockPolicy {
    /// Any pointer or key press.
    AnyGesture,
    /// Pointer presses, or keys whose code or value is listed.
    PointerOrKeys(&'static [&'static str]),
}

pub const HOME_UNLOCK: UnlockPolicy = UnlockPolicy::PointerOrKeys(&["Space", " "]);
pub const RADIO_UNLOCK: UnlockPolicy = UnlockPolicy::PointerOrKeys(&["ArrowLeft", "ArrowRight"]);
pub const PLAYER_UNLOCK: UnlockPolicy = UnlockPolicy::AnyGesture;

impl UnlockPolicy {
    pub fn accepts(&self, gesture: UserGesture<'_>) -> bool {
        match (self, gesture) {
            (UnlockPolicy::AnyGesture, _) => true,
            (UnlockPolicy::PointerOrKeys(_), UserGesture::PointerDown) => true,
            (UnlockPolicy::PointerOrKeys(keys), UserGesture::Key { code, key }) => {
                keys.iter().any(|k| *k == code || *k == key)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct UnlockGate {
    policy: UnlockPolicy,
    unlocked: bool,
}

impl UnlockGate {
    pub fn new(policy: UnlockPolicy) -> Self {
        Self {
            policy,
            unlocked: false,
        }
    }

    /// Returns true exactly once: on the first accepted gesture.
    pub fn offer(&mut self, gesture: UserGesture<'_>) -> bool {
        if self.unlocked || !self.policy.accepts(gesture) {
            return false;
        }
        self.unlocked = true;
        log::debug!("[autoplay] unlocked by {:?}", gesture);
        true
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn policy(&self) -> UnlockPolicy {
        self.policy
    }
}
