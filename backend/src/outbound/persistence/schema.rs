//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Customer records. `rut` is the primary key and therefore unique.
    clientes (rut) {
        /// Natural identifier.
        rut -> Varchar,
        /// Display name.
        nombre -> Varchar,
        /// Age in whole years.
        edad -> Int4,
    }
}
