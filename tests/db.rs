use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct PragmaValue {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn pool_connects_to_migrated_database() {
    let test_db = common::TestDb::new("test_pool_connects.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_foreign_keys.db");
    let mut conn = test_db.pool().get().unwrap();

    let value = sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaValue>(&mut conn)
        .unwrap();

    assert_eq!(value.foreign_keys, 1);
}
