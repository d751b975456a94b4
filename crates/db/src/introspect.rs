//! Fixed introspection queries over `information_schema`.
//!
//! The table name is interpolated directly into the SQL text, exactly as the
//! tool has always behaved. Callers own the trust decision for that name; the
//! query builders are kept as plain functions so the produced text stays
//! testable.

/// Column metadata for one table in the `public` schema, ordered by table
/// name then ordinal position.
pub fn column_query(table_name: &str) -> String {
    format!(
        "SELECT table_name, column_name, data_type, column_default, is_nullable \
         FROM information_schema.columns \
         WHERE table_schema = 'public' AND table_name = '{table_name}' \
         ORDER BY table_name, ordinal_position"
    )
}

/// Constraint metadata for one table: constraints joined with their key
/// columns, left-joined with the referenced columns for foreign keys.
pub fn constraint_query(table_name: &str) -> String {
    format!(
        "SELECT tc.table_name, tc.constraint_name, tc.constraint_type, \
                kcu.column_name, ccu.table_name AS foreign_table_name, \
                ccu.column_name AS foreign_column_name \
         FROM information_schema.table_constraints tc \
         JOIN information_schema.key_column_usage kcu \
           ON tc.constraint_name = kcu.constraint_name \
         LEFT JOIN information_schema.constraint_column_usage ccu \
           ON ccu.constraint_name = tc.constraint_name \
         WHERE tc.table_schema = 'public' AND tc.table_name = '{table_name}'"
    )
}
