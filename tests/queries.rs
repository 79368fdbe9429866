#[cfg(test)]
mod tests {
    use roster::db::entities;
    use roster::db::query::{self, QueryKind};

    /// Every registered entity must generate a consistent statement set:
    /// one placeholder per data column on insert, one extra for the id on
    /// update, and fixed shapes for the rest.
    #[test]
    fn test_generator_properties_hold_for_every_entity() {
        for spec in entities::ALL {
            let columns = spec.column_names();

            let insert = query::insert(spec.table, &columns).unwrap();
            assert_eq!(insert.params, columns.len());
            assert_eq!(insert.kind, QueryKind::Write);

            let update = query::update(spec.table, &columns).unwrap();
            assert_eq!(update.params, columns.len() + 1);
            assert_eq!(update.kind, QueryKind::Write);
            assert!(update.text.ends_with(&format!("WHERE id = ${}", columns.len() + 1)));

            let select = query::select_all(spec.table);
            assert_eq!(select.params, 0);
            assert_eq!(select.kind, QueryKind::Read);
            assert!(select.text.contains(&format!("\"{}\"", spec.table)));
            assert!(select.text.ends_with("ORDER BY id"));

            let delete = query::delete(spec.table);
            assert_eq!(delete.params, 1);
            assert_eq!(delete.kind, QueryKind::Write);

            let count = query::count(spec.table);
            assert_eq!(count.params, 0);
            assert_eq!(count.kind, QueryKind::Read);
        }
    }

    #[test]
    fn test_group_statement_texts() {
        let spec = &entities::ST_GROUP;
        let columns = spec.column_names();

        assert_eq!(
            query::insert(spec.table, &columns).unwrap().text,
            "INSERT INTO \"StGroup\" (f_title, f_comment) VALUES ($1, $2)"
        );
        assert_eq!(
            query::update(spec.table, &columns).unwrap().text,
            "UPDATE \"StGroup\" SET f_title = $1, f_comment = $2 WHERE id = $3"
        );
        assert_eq!(query::select_all(spec.table).text, "SELECT * FROM \"StGroup\" ORDER BY id");
        assert_eq!(query::select_by_id(spec.table).text, "SELECT * FROM \"StGroup\" WHERE id = $1");
        assert_eq!(query::delete(spec.table).text, "DELETE FROM \"StGroup\" WHERE id = $1");
        assert_eq!(query::count(spec.table).text, "SELECT COUNT(*) FROM \"StGroup\"");
    }

    #[test]
    fn test_values_never_reach_statement_text() {
        // Statement text depends only on the schema. Whatever a record's
        // values are, they bind as parameters and the text is identical.
        let spec = &entities::TEACHER;
        let columns = spec.column_names();
        let first = query::insert(spec.table, &columns).unwrap();
        let second = query::insert(spec.table, &columns).unwrap();
        assert_eq!(first, second);
        assert!(!first.text.contains('\''));
    }
}
