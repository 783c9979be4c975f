//! `/api/projects` routes

resource_routes! {
    kind: crate::domain::ResourceKind::Projects,
    tag: "projects",
    collection: "/api/projects",
    item: "/api/projects/{id}",
    upsert: upsert_project => "Create or replace a project",
    get: get_project => "Fetch a project by id",
    delete: delete_project => "Delete a project by id",
}
