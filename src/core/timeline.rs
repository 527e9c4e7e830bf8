use super::{Request, Time};

/// Returns whether the request may be served at time `t`, i.e. whether `t`
/// lies inside the half-open window `[release, deadline)`.
#[must_use]
pub const fn is_feasible(request: &Request, t: Time) -> bool {
    request.release <= t && t < request.deadline
}

/// Returns whether moving from `prev` to `next` costs an extra time unit
/// because the two requests are not geographically chained.
#[must_use]
pub const fn needs_jump(prev: &Request, next: &Request) -> bool {
    prev.destination != next.origin
}
