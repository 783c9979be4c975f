//! `/api/bookings` routes

resource_routes! {
    kind: crate::domain::ResourceKind::Bookings,
    tag: "bookings",
    collection: "/api/bookings",
    item: "/api/bookings/{id}",
    upsert: upsert_booking => "Create or replace a booking",
    get: get_booking => "Fetch a booking by id",
    delete: delete_booking => "Delete a booking by id",
}
