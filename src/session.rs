//! Operator session state.

/// Mutable state of one operator session.
///
/// Lives for the process lifetime and is only ever touched from the
/// shell's input-processing thread. Identity persistence itself belongs
/// to the engine; this records which file the operator is working with.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Path of the currently loaded identity file, if any.
    pub identity_path: Option<String>,
    /// Whether the identity should be persisted automatically. Policy
    /// enforcement lives outside this layer (e.g. a periodic trigger).
    pub autosave: bool,
    /// Whether the operator asked the engine to participate in the network.
    pub connected: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an autosave directive token, returning the resulting state.
    ///
    /// Case-insensitive: `on`/`true`/`1` enable, `off`/`false`/`0` disable,
    /// anything else (including no token) toggles. The toggle on an
    /// unrecognized token is intentional fallback behavior, not an error.
    pub fn apply_autosave(&mut self, token: Option<&str>) -> bool {
        let directive = token.map(str::to_ascii_lowercase);
        self.autosave = match directive.as_deref() {
            Some("on") | Some("true") | Some("1") => true,
            Some("off") | Some("false") | Some("0") => false,
            _ => !self.autosave,
        };
        self.autosave
    }
}
