use super::*;
use crate::{
    naming::{Lowercase, Verbatim},
    test_fixtures::{Account, Keyword, Ledger, SELF_EMBEDDING, Shadowed, TestEntity},
};

fn paths<R: Record>(mapper: &Mapper, columns: &[&str]) -> Vec<Vec<usize>> {
    mapper
        .resolve::<R, _>(columns)
        .expect("resolve")
        .into_iter()
        .map(|path| path.steps().to_vec())
        .collect()
}

#[test]
fn snake_case_fields_resolve_in_column_order() {
    let mapper = Mapper::new(SnakeCase);

    assert_eq!(
        paths::<TestEntity>(&mapper, &["created_at", "id", "some_data"]),
        vec![vec![2], vec![0], vec![1]]
    );
}

#[test]
fn unknown_column_resolves_to_missing_path() {
    let mapper = Mapper::new(SnakeCase);
    let resolved = mapper
        .resolve::<TestEntity, _>(&["id", "nope"])
        .expect("resolve");

    assert!(!resolved[0].is_missing());
    assert!(resolved[1].is_missing());
    assert_eq!(resolved[1], AccessPath::missing());
}

#[test]
fn rename_replaces_the_normalized_name() {
    let mapper = Mapper::new(SnakeCase);
    let resolved = paths::<Account>(&mapper, &["full_name", "name"]);

    assert_eq!(resolved[0], vec![1]);
    assert!(resolved[1].is_empty(), "renamed field must not answer to its own name");
}

#[test]
fn skipped_field_is_not_addressable() {
    let mapper = Mapper::new(SnakeCase);

    assert!(paths::<Account>(&mapper, &["cached"])[0].is_empty());
    assert!(Account::MODEL.field("cached").is_none());
}

#[test]
fn flatten_and_prefix_keys() {
    let mapper = Mapper::new(SnakeCase);
    let resolved = paths::<Account>(
        &mapper,
        &["created_by", "updated_by", "address.street", "address.city", "street"],
    );

    // `cached` is skipped, so audit is field 2 and address field 3
    assert_eq!(
        resolved,
        vec![vec![2, 0], vec![2, 1], vec![3, 0], vec![3, 1], vec![]]
    );
}

#[test]
fn prefixes_compose_through_nested_embeds() {
    let mapper = Mapper::new(SnakeCase);
    let resolved = paths::<Ledger>(
        &mapper,
        &[
            "balance",
            "account.id",
            "account.full_name",
            "account.created_by",
            "account.address.city",
        ],
    );

    assert_eq!(
        resolved,
        vec![vec![0], vec![1, 0], vec![1, 1], vec![1, 2, 0], vec![1, 3, 1]]
    );
}

#[test]
fn optional_leaves_are_flagged() {
    let mapper = Mapper::new(SnakeCase);
    let resolved = mapper
        .resolve::<Account, _>(&["id", "updated_by"])
        .expect("resolve");

    assert!(!resolved[0].is_optional());
    assert!(resolved[1].is_optional());
}

#[test]
fn shallowest_field_wins_a_shared_key() {
    let mapper = Mapper::new(SnakeCase);

    assert_eq!(
        paths::<Shadowed>(&mapper, &["id", "label"]),
        vec![vec![1], vec![0, 1]]
    );
}

#[test]
fn raw_identifiers_answer_to_plain_names() {
    let mapper = Mapper::new(SnakeCase);

    assert_eq!(
        paths::<Keyword>(&mapper, &["type", "ref"]),
        vec![vec![0], vec![1]]
    );
}

#[test]
fn naming_strategy_controls_keys() {
    let verbatim = Mapper::new(Verbatim);
    assert_eq!(paths::<TestEntity>(&verbatim, &["some_data"]), vec![vec![1]]);

    let lowercase = Mapper::new(Lowercase);
    assert_eq!(paths::<TestEntity>(&lowercase, &["created_at"]), vec![vec![2]]);

    let upper = Mapper::new(|ident: &str| ident.to_uppercase());
    assert_eq!(
        paths::<TestEntity>(&upper, &["ID", "SOME_DATA", "id"]),
        vec![vec![0], vec![1], vec![]]
    );
}

#[test]
fn explicit_column_tags_bypass_naming() {
    let upper = Mapper::new(|ident: &str| ident.to_uppercase());

    assert_eq!(
        paths::<Account>(&upper, &["full_name", "ID"]),
        vec![vec![1], vec![0]]
    );
}

#[test]
fn index_is_built_once_per_type() {
    let mapper = Mapper::new(SnakeCase);
    let first = mapper.index::<TestEntity>().expect("index");
    let second = mapper.index::<TestEntity>().expect("index");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.destination(), TestEntity::MODEL.path);
    assert_eq!(first.len(), 3);

    let other = mapper.index::<Account>().expect("index");
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(format!("{mapper:?}"), "Mapper { cached: 2 }");
}

#[test]
fn global_mapper_is_shared() {
    assert!(Arc::ptr_eq(&Mapper::global(), &Mapper::global()));
}

#[test]
fn concurrent_first_use_yields_one_index() {
    let mapper = Arc::new(Mapper::new(SnakeCase));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mapper = Arc::clone(&mapper);
            std::thread::spawn(move || mapper.index::<Ledger>().expect("index"))
        })
        .collect();

    let indexes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread"))
        .collect();
    let cached = mapper.index::<Ledger>().expect("index");

    assert!(indexes.iter().all(|index| Arc::ptr_eq(index, &cached)));
}

#[test]
fn self_embedding_model_hits_the_depth_limit() {
    let err = FieldIndex::build(&SELF_EMBEDDING, &SnakeCase).expect_err("depth limit");

    assert!(matches!(err, ScanError::InvalidDestination { .. }));
    assert!(err.to_string().contains("deeper than 32 levels"), "{err}");
}
