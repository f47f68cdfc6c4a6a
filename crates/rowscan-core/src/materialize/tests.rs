use super::*;
use crate::{
    ScanError,
    naming::SnakeCase,
    resolve::Mapper,
    test_fixtures::{Account, Address, Mismatched, TestEntity},
    traits::Record,
    value::Value,
};

fn resolve<R: Record>(columns: &[&str]) -> Vec<AccessPath> {
    Mapper::new(SnakeCase)
        .resolve::<R, _>(columns)
        .expect("resolve")
}

#[test]
fn targets_follow_column_order() {
    let mut entity = TestEntity::default();
    let paths = resolve::<TestEntity>(&["some_data", "id"]);

    {
        let mut targets = build_targets(&mut entity, &paths, TestEntity::MODEL.path)
            .expect("targets");
        assert_eq!(targets.len(), 2);
        targets[0].assign(Value::from("payload")).expect("assign");
        targets[1].assign(Value::from("e1")).expect("assign");
    }

    assert_eq!(entity.id, "e1");
    assert_eq!(entity.some_data, "payload");
}

#[test]
fn missing_paths_become_discard_targets() {
    let mut entity = TestEntity::default();
    let paths = resolve::<TestEntity>(&["id", "extra"]);

    let mut targets =
        build_targets(&mut entity, &paths, TestEntity::MODEL.path).expect("targets");

    assert!(!targets[0].is_discard());
    assert!(targets[1].is_discard());
    targets[1]
        .assign(Value::from("anything"))
        .expect("discard accepts any value");
}

#[test]
fn duplicate_columns_keep_the_last_write() {
    let mut entity = TestEntity::default();
    let paths = resolve::<TestEntity>(&["id", "id"]);

    {
        let mut targets = build_targets(&mut entity, &paths, TestEntity::MODEL.path)
            .expect("targets");
        assert!(targets[0].is_discard());
        assert!(!targets[1].is_discard());
        targets[0].assign(Value::from("first")).expect("assign");
        targets[1].assign(Value::from("second")).expect("assign");
    }

    assert_eq!(entity.id, "second");
}

#[test]
fn optional_embed_stays_unallocated_when_not_addressed() {
    let mut account = Account::default();
    let paths = resolve::<Account>(&["id", "full_name", "created_by"]);

    {
        let mut targets =
            build_targets(&mut account, &paths, Account::MODEL.path).expect("targets");
        targets[0].assign(Value::Int(7)).expect("assign");
        targets[1].assign(Value::from("Ada")).expect("assign");
        targets[2].assign(Value::from("root")).expect("assign");
    }

    assert_eq!(account.id, 7);
    assert_eq!(account.name, "Ada");
    assert_eq!(account.audit.created_by, "root");
    assert_eq!(account.address, None);
}

#[test]
fn optional_embed_is_allocated_on_first_addressed_column() {
    let mut account = Account::default();
    let paths = resolve::<Account>(&["address.city", "address.street"]);

    {
        let mut targets =
            build_targets(&mut account, &paths, Account::MODEL.path).expect("targets");
        targets[0].assign(Value::from("Oslo")).expect("assign");
    }

    assert_eq!(
        account.address,
        Some(Address {
            street: String::new(),
            city: "Oslo".to_string(),
        })
    );
}

#[test]
fn existing_optional_embed_is_reused() {
    let mut account = Account {
        address: Some(Address {
            street: "Main".to_string(),
            city: "Bergen".to_string(),
        }),
        ..Account::default()
    };
    let paths = resolve::<Account>(&["address.city"]);

    {
        let mut targets =
            build_targets(&mut account, &paths, Account::MODEL.path).expect("targets");
        targets[0].assign(Value::from("Oslo")).expect("assign");
    }

    let address = account.address.expect("address kept");
    assert_eq!(address.street, "Main");
    assert_eq!(address.city, "Oslo");
}

#[test]
fn model_and_field_access_disagreeing_is_an_invalid_destination() {
    let mut record = Mismatched::default();
    let paths = resolve::<Mismatched>(&["value.created_by"]);

    let err = build_targets(&mut record, &paths, Mismatched::MODEL.path)
        .err()
        .expect("layout error");

    assert!(matches!(err, ScanError::InvalidDestination { .. }));
    assert!(
        err.to_string().contains("continues past a scalar field"),
        "{err}"
    );
}

#[test]
fn access_path_past_the_field_list_is_an_invalid_destination() {
    let mut entity = TestEntity::default();
    let paths = vec![AccessPath::new(vec![9], false)];

    let err = build_targets(&mut entity, &paths, TestEntity::MODEL.path)
        .err()
        .expect("layout error");

    assert!(matches!(err, ScanError::InvalidDestination { .. }));
}
