//! Kept in its own test binary so the process-wide cache starts empty.

use std::path::PathBuf;

use tackroom_catalog::cached_taxonomy;

fn write_dataset(name: &str, rows: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tackroom-cached-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(
        &path,
        format!("top_level,parent_category,subcategory_handle,product_type,action,merge_to,notes\n{rows}"),
    )
    .unwrap();
    path
}

#[test]
fn first_loaded_dataset_is_kept_for_the_process() {
    let horse = write_dataset("horse.csv", "horse,boots,,Tendon Boots,include,,\n");
    let dog = write_dataset("dog.csv", "dog,toys,,Dog Toys,include,,\n");

    let first = cached_taxonomy(&horse);
    let second = cached_taxonomy(&dog);

    assert!(std::ptr::eq(first, second));
    assert!(second.has_path("horse/boots"));
    assert!(!second.has_path("dog/toys"));
    assert_eq!(
        second.resolve_allowed_product_types("horse", Some("boots"), None),
        vec!["Tendon Boots"]
    );
}
