//! Integration tests for the storage engine and the KeyStore contract.

use keyfield_core::{
    Advance, Cursor, Error, FieldType, KeyStore, Record, SchemaError, StorageConfig,
    StorageEngine, Value,
};

struct TestContext {
    engine: StorageEngine,
    _storage_dir: tempfile::TempDir,
}

impl TestContext {
    fn new() -> Self {
        let storage_dir = tempfile::tempdir().unwrap();
        let engine = StorageEngine::open(StorageConfig::new(storage_dir.path())).unwrap();

        Self {
            engine,
            _storage_dir: storage_dir,
        }
    }

    fn store(&self) -> &dyn KeyStore {
        &self.engine
    }
}

fn setup_shop_schema(ctx: &TestContext) {
    let store = ctx.store();
    store.new_key("CUSTOMER").unwrap();
    store.new_item("NAME", "CUSTOMER").unwrap();
    store.new_item("EMAIL", "CUSTOMER").unwrap();
    store.new_key("ORDER").unwrap();
    store.new_item("TOTAL", "ORDER").unwrap();
    store.new_foreign_key("BUYER", "ORDER", "CUSTOMER").unwrap();
}

fn enumerate(store: &dyn KeyStore, key: &str, field: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut cursor = Cursor::Start;
    loop {
        match store.advance(key, cursor).unwrap() {
            Advance::Next(next) => {
                values.push(store.value(field, next).unwrap().to_string());
                cursor = next;
            }
            Advance::EndOfList => break,
        }
    }
    values
}

#[test]
fn test_schema_listing_through_store() {
    let ctx = TestContext::new();
    setup_shop_schema(&ctx);
    let store = ctx.store();

    let keys: Vec<String> = store.all_keys().unwrap().into_iter().map(|f| f.name).collect();
    assert_eq!(keys, vec!["CUSTOMER", "ORDER"]);

    let all = store.all_fields().unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(
        all.iter().filter(|f| f.field_type() == FieldType::ForeignKey).count(),
        1
    );

    let order_children: Vec<String> = store
        .children_of("ORDER")
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(order_children, vec!["TOTAL", "BUYER"]);
}

#[test]
fn test_enumeration_follows_insertion() {
    let ctx = TestContext::new();
    setup_shop_schema(&ctx);

    for (id, name) in [("1", "Alice"), ("2", "Bob"), ("3", "Carol")] {
        ctx.engine
            .insert_record("CUSTOMER", Record::new(id).with_value("NAME", name))
            .unwrap();
    }

    assert_eq!(enumerate(ctx.store(), "CUSTOMER", "CUSTOMER"), vec!["1", "2", "3"]);
    assert_eq!(
        enumerate(ctx.store(), "CUSTOMER", "NAME"),
        vec!["Alice", "Bob", "Carol"]
    );
    assert_eq!(enumerate(ctx.store(), "CUSTOMER", "EMAIL"), vec!["", "", ""]);
    assert!(enumerate(ctx.store(), "ORDER", "ORDER").is_empty());
}

#[test]
fn test_records_are_scoped_per_key() {
    let ctx = TestContext::new();
    setup_shop_schema(&ctx);

    ctx.engine.insert_record("CUSTOMER", Record::new("1")).unwrap();
    ctx.engine
        .insert_record(
            "ORDER",
            Record::new("A1")
                .with_value("TOTAL", 30i64)
                .with_value("BUYER", "1"),
        )
        .unwrap();

    assert_eq!(ctx.engine.record_count("CUSTOMER").unwrap(), 1);
    assert_eq!(ctx.engine.record_count("ORDER").unwrap(), 1);
    assert_eq!(enumerate(ctx.store(), "ORDER", "TOTAL"), vec!["30"]);
    assert_eq!(enumerate(ctx.store(), "ORDER", "BUYER"), vec!["1"]);
}

#[test]
fn test_schema_errors_have_readable_messages() {
    let ctx = TestContext::new();
    setup_shop_schema(&ctx);

    let err = ctx.store().new_item("NAME", "ORDER").unwrap_err();
    assert_eq!(err.to_string(), "field 'NAME' already exists");

    let err = ctx.store().delete_field("CUSTOMER").unwrap_err();
    assert_eq!(err.to_string(), "key 'CUSTOMER' still has child fields");

    let err = ctx.store().new_item("X", "NAME").unwrap_err();
    assert!(matches!(err, Error::Schema(SchemaError::NotAKey(_))));
}

#[test]
fn test_reopen_preserves_schema_and_records() {
    let dir = tempfile::tempdir().unwrap();

    {
        let engine = StorageEngine::open(StorageConfig::new(dir.path())).unwrap();
        engine.new_key("CUSTOMER").unwrap();
        engine.new_item("NAME", "CUSTOMER").unwrap();
        engine
            .insert_record("CUSTOMER", Record::new("1").with_value("NAME", "Alice"))
            .unwrap();
        engine.flush().unwrap();
    }

    {
        let engine = StorageEngine::open(StorageConfig::new(dir.path())).unwrap();
        let children = engine.children_of("CUSTOMER").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(enumerate(&engine, "CUSTOMER", "NAME"), vec!["Alice"]);

        // Positions keep increasing after reopen, so new children sort last.
        engine.new_item("EMAIL", "CUSTOMER").unwrap();
        let names: Vec<String> = engine
            .children_of("CUSTOMER")
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["NAME", "EMAIL"]);

        let Advance::Next(first) = engine.advance("CUSTOMER", Cursor::Start).unwrap() else {
            panic!("expected a record after reopen");
        };
        assert!(engine.value("EMAIL", first).unwrap().is_null());
    }
}

#[test]
fn test_value_of_missing_record() {
    let ctx = TestContext::new();
    setup_shop_schema(&ctx);

    assert!(matches!(
        ctx.store().value("NAME", Cursor::At(42)),
        Err(Error::NotFound)
    ));
    assert!(matches!(
        ctx.store().value("NAME", Cursor::Start),
        Err(Error::NotFound)
    ));
    assert_eq!(Value::Null.to_string(), "");
}
