use std::fs;
use tempfile::TempDir;

use reciperag_core::corpus::{load_recipes, RecipeBook};
use reciperag_core::Error;

#[test]
fn load_recipes_reads_json_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("recipes.json");
    fs::write(
        &path,
        r#"[{"id":"r1","title":"Pasta","content":"Ingredients:\nX\nInstructions:\nY"},
            {"id":"r2","title":"Soup","content":"Boil."}]"#,
    )
    .unwrap();

    let book = load_recipes(&path).expect("load");
    assert_eq!(book.len(), 2);
    assert_eq!(book.get("r2").map(|r| r.title.as_str()), Some("Soup"));
    assert!(book.get("r3").is_none());
    assert_eq!(book.recipes()[0].id, "r1");
}

#[test]
fn missing_file_is_not_found_with_absolute_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nope.json");
    match load_recipes(&path) {
        Err(Error::NotFound(msg)) => assert!(msg.contains(&path.display().to_string())),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn malformed_json_and_duplicates_are_corpus_errors() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_recipes(&path), Err(Error::Corpus(_))));

    let dup = r#"[{"id":"r1","title":"a","content":"x"},{"id":"r1","title":"b","content":"y"}]"#;
    assert!(matches!(RecipeBook::from_json_str(dup), Err(Error::Corpus(_))));
}

#[test]
fn empty_array_loads() {
    let book = RecipeBook::from_json_str("[]").expect("empty corpus");
    assert!(book.is_empty());
}

#[test]
fn shipped_corpus_is_well_formed() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/recipes.json");
    let book = load_recipes(&path).expect("shipped corpus");
    assert_eq!(book.len(), 46);
    assert!(book.get("r1").is_some());
    assert!(book.get("r50").is_some());
    for recipe in book.recipes() {
        assert!(recipe.content.contains("Instructions:\n"), "{} lacks instructions", recipe.id);
    }
}
