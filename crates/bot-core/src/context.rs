//! Caller context for tool dispatch.

/// Who asked for a tool, where, and with what privilege.
///
/// Built by the orchestrator from the inbound message and passed through the
/// dispatcher to every handler. The `is_admin` flag is advisory at the
/// dispatch layer; each handler re-checks it before acting.
#[derive(Debug, Clone)]
pub struct CallerContext {
    /// Guild the request originated in.
    pub guild_id: u64,
    /// Channel the request originated in.
    pub channel_id: u64,
    /// User id of the requester.
    pub caller_id: u64,
    /// Display name of the requester.
    pub caller_name: String,
    /// Whether the requester holds administrator privilege.
    pub is_admin: bool,
}
