//! List endpoints and the mutations that go with them.
//!
//! A [`Resource`] ties an entity type to its endpoint, response shape and
//! filter set so one [`ListStore`](crate::list::ListStore) serves all views.

use crate::filter::{BookingFilters, CheckInFilters, Filters, NoFilters};
use crate::gateway::{FetchRequest, ListShape};
use crate::models::{Booking, BookingDraft, BookingUpdate, CheckInBooking, Entity, EntityId, Room, RoomDraft};
use crate::mutation::{Mutation, MutationError, Reconcile};

pub trait Resource: Send + Sync + 'static {
    type Entity: Entity;
    type Filters: Filters;

    /// Short name used in logs and CLI output.
    const NAME: &'static str;
    /// Backend list endpoint.
    const PATH: &'static str;
    const SHAPE: ListShape;

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// `/admin/bookings`
pub struct Bookings;

impl Resource for Bookings {
    type Entity = Booking;
    type Filters = BookingFilters;

    const NAME: &'static str = "bookings";
    const PATH: &'static str = "/admin/bookings";
    const SHAPE: ListShape = ListShape::Enveloped("bookings");
}

impl Bookings {
    /// New booking from the back-office form.
    pub fn create(draft: &BookingDraft) -> Mutation {
        Mutation::create(FetchRequest::post(Self::PATH).multipart(draft.to_form()))
    }

    /// Edit from the booking modal. The modal reloads the whole list
    /// unless the backend echoes the booking back.
    pub fn update(id: EntityId, update: &BookingUpdate) -> Result<Mutation, MutationError> {
        let body = serde_json::to_value(update).map_err(|e| MutationError::validation(e.to_string()))?;
        Ok(Mutation::update(id, FetchRequest::put(Self::item_path(id)).json(body))
            .reconcile(Reconcile::ReplaceOrReload))
    }
}

/// `/admin/checkins`
pub struct CheckIns;

impl Resource for CheckIns {
    type Entity = CheckInBooking;
    type Filters = CheckInFilters;

    const NAME: &'static str = "checkins";
    const PATH: &'static str = "/admin/checkins";
    const SHAPE: ListShape = ListShape::Enveloped("bookings");
}

impl CheckIns {
    /// Mark a guest as arrived.
    pub fn check_in(id: EntityId) -> Mutation {
        Mutation::action(id, FetchRequest::post(format!("{}/checkin", Bookings::item_path(id))))
    }
}

/// `/admin/rooms`, served as one bare array.
pub struct Rooms;

impl Resource for Rooms {
    type Entity = Room;
    type Filters = NoFilters;

    const NAME: &'static str = "rooms";
    const PATH: &'static str = "/admin/rooms";
    const SHAPE: ListShape = ListShape::Enveloped("rooms");
}

impl Rooms {
    /// Create or update depending on `draft.id`. The form is checked
    /// before anything is sent.
    pub fn save(draft: &RoomDraft) -> Result<Mutation, MutationError> {
        draft.validate().map_err(MutationError::validation)?;
        let form = draft.to_form();
        Ok(match draft.id {
            Some(id) => Mutation::update(id, FetchRequest::post(Self::item_path(id)).multipart(form)),
            None => Mutation::create(FetchRequest::post(Self::PATH).multipart(form)),
        })
    }

    pub fn delete(id: EntityId) -> Mutation {
        Mutation::delete(id, FetchRequest::delete(Self::item_path(id)))
    }
}
