use tempfile::TempDir;

use reciperag_core::traits::VectorIndex;
use reciperag_core::types::{CollectionSpec, IndexedVector, Section};
use reciperag_core::Error;
use reciperag_vector::LanceIndex;

fn unit(dim: usize, hot: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[hot] = 1.0;
    v
}

fn doc(id: &str, hot: usize) -> IndexedVector {
    IndexedVector {
        recipe_id: id.into(),
        title: format!("Title {id}"),
        section: None,
        content: format!("Content {id}"),
        embedding: unit(4, hot),
    }
}

#[tokio::test]
async fn collection_lifecycle_and_nearest_order() {
    let tmp = TempDir::new().unwrap();
    let index = LanceIndex::open(tmp.path()).await.unwrap();
    let spec = CollectionSpec::document("RecipeBaseline", 4);

    assert!(!index.has_collection("RecipeBaseline").await.unwrap());
    assert_eq!(index.collection_dim("RecipeBaseline").await.unwrap(), None);
    index.recreate_collection(&spec).await.unwrap();
    assert_eq!(index.collection_dim("RecipeBaseline").await.unwrap(), Some(4));
    assert!(index.has_collection("RecipeBaseline").await.unwrap());
    assert_eq!(index.count("RecipeBaseline").await.unwrap(), 0);

    let written = index.insert(&spec, &[doc("r1", 0), doc("r2", 1), doc("r3", 2)]).await.unwrap();
    assert_eq!(written, 3);
    assert_eq!(index.count("RecipeBaseline").await.unwrap(), 3);

    let query = vec![0.1, 0.9, 0.0, 0.0];
    let hits = index.nearest("RecipeBaseline", &query, 2).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].recipe_id, "r2");
    assert_eq!(hits[1].recipe_id, "r1");
    assert!(hits[0].distance <= hits[1].distance);
    assert_eq!(hits[0].section, None);
    assert_eq!(hits[0].content, "Content r2");

    // Recreate wipes prior rows.
    index.recreate_collection(&spec).await.unwrap();
    assert_eq!(index.count("RecipeBaseline").await.unwrap(), 0);
}

#[tokio::test]
async fn sectioned_collection_round_trips_sections() {
    let tmp = TempDir::new().unwrap();
    let index = LanceIndex::open(tmp.path()).await.unwrap();
    let spec = CollectionSpec::sectioned("RecipeChunks", 4);
    index.recreate_collection(&spec).await.unwrap();

    let mut ing = doc("r1", 0);
    ing.section = Some(Section::Ingredients);
    let mut ins = doc("r1", 3);
    ins.section = Some(Section::Instructions);
    index.insert(&spec, &[ing, ins]).await.unwrap();

    let hits = index.nearest("RecipeChunks", &unit(4, 3), 5).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].section, Some(Section::Instructions));
    assert_eq!(hits[1].section, Some(Section::Ingredients));
}

#[tokio::test]
async fn missing_collection_is_not_found_and_drop_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let index = LanceIndex::open(tmp.path()).await.unwrap();
    assert!(matches!(index.count("Nope").await, Err(Error::NotFound(_))));
    assert!(matches!(index.nearest("Nope", &unit(4, 0), 3).await, Err(Error::NotFound(_))));
    index.drop_collection("Nope").await.unwrap();
}

#[tokio::test]
async fn regular_file_path_is_connectivity_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("not-a-dir");
    std::fs::write(&file, b"plain file").unwrap();
    assert!(matches!(LanceIndex::open(&file).await, Err(Error::Connectivity(_))));
}
