use crate::domain::models::actor::{Actor, Role};

/// Pure authorization rules. Admin always passes; everyone else only
/// reaches resources they own. There are no implicit grants: every
/// mutating or privacy-sensitive operation calls one of these explicitly.

pub fn is_admin(actor: &Actor) -> bool {
    actor.role == Role::Admin
}

/// Owner-only resources: a booking belongs to exactly one user.
pub fn can_access_booking(actor: &Actor, owner_id: &str) -> bool {
    is_admin(actor) || actor.id == owner_id
}

/// Organizer-only resources: event management and the event's booking list.
pub fn can_manage_event(actor: &Actor, organizer_id: &str) -> bool {
    is_admin(actor) || actor.id == organizer_id
}

/// Only organizers and admins may publish events.
pub fn can_create_events(actor: &Actor) -> bool {
    matches!(actor.role, Role::Organizer | Role::Admin)
}
