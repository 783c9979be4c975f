//! `/api/resources` routes

resource_routes! {
    kind: crate::domain::ResourceKind::Resources,
    tag: "resources",
    collection: "/api/resources",
    item: "/api/resources/{id}",
    upsert: upsert_resource => "Create or replace a resource",
    get: get_resource => "Fetch a resource by id",
    delete: delete_resource => "Delete a resource by id",
}
