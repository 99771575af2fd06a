use arrow_array::types::Float32Type;
use arrow_array::{ArrayRef, FixedSizeListArray, RecordBatch, StringArray};
use std::sync::Arc;

use reciperag_core::error::{Error, Result};
use reciperag_core::types::{CollectionLayout, CollectionSpec, IndexedVector};

use crate::schema::{build_arrow_schema, list_size};

/// Convert records to one Arrow batch in the collection's schema.
///
/// Every embedding must have the collection's width, and `section` must be set
/// exactly when the layout is sectioned.
pub fn records_to_batch(spec: &CollectionSpec, records: &[IndexedVector]) -> Result<RecordBatch> {
    let width = list_size(spec.dim)?;
    let sectioned = spec.layout == CollectionLayout::Sectioned;
    let mut ids = Vec::with_capacity(records.len());
    let mut titles = Vec::with_capacity(records.len());
    let mut sections = Vec::with_capacity(records.len());
    let mut contents = Vec::with_capacity(records.len());
    let mut vectors: Vec<Option<Vec<Option<f32>>>> = Vec::with_capacity(records.len());

    for r in records {
        if r.embedding.len() != spec.dim {
            return Err(Error::Operation(format!(
                "record {} has embedding dim {}, collection {} expects {}",
                r.recipe_id,
                r.embedding.len(),
                spec.name,
                spec.dim
            )));
        }
        match (sectioned, r.section) {
            (true, Some(section)) => sections.push(section.as_str()),
            (false, None) => {}
            _ => {
                return Err(Error::Operation(format!(
                    "record {} does not match the {:?} layout of {}",
                    r.recipe_id, spec.layout, spec.name
                )))
            }
        }
        ids.push(r.recipe_id.as_str());
        titles.push(r.title.as_str());
        contents.push(r.content.as_str());
        vectors.push(Some(r.embedding.iter().map(|&x| Some(x)).collect()));
    }

    let mut columns: Vec<ArrayRef> =
        vec![Arc::new(StringArray::from(ids)), Arc::new(StringArray::from(titles))];
    if sectioned {
        columns.push(Arc::new(StringArray::from(sections)));
    }
    columns.push(Arc::new(StringArray::from(contents)));
    let vector_col = FixedSizeListArray::from_iter_primitive::<Float32Type, _, _>(vectors, width);
    columns.push(Arc::new(vector_col));

    RecordBatch::try_new(build_arrow_schema(spec.layout, spec.dim)?, columns)
        .map_err(|e| Error::Operation(format!("failed to build record batch: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reciperag_core::types::Section;

    fn rec(section: Option<Section>, dim: usize) -> IndexedVector {
        IndexedVector {
            recipe_id: "r1".into(),
            title: "Pasta".into(),
            section,
            content: "Boil.".into(),
            embedding: vec![0.5; dim],
        }
    }

    #[test]
    fn builds_batches_for_both_layouts() {
        let doc = records_to_batch(&CollectionSpec::document("B", 4), &[rec(None, 4)]).unwrap();
        assert_eq!(doc.num_rows(), 1);
        assert_eq!(doc.num_columns(), 4);
        let sec = records_to_batch(
            &CollectionSpec::sectioned("C", 4),
            &[rec(Some(Section::Ingredients), 4), rec(Some(Section::Instructions), 4)],
        )
        .unwrap();
        assert_eq!(sec.num_rows(), 2);
        assert_eq!(sec.num_columns(), 5);
    }

    #[test]
    fn rejects_wrong_dim_and_layout_mismatch() {
        assert!(records_to_batch(&CollectionSpec::document("B", 4), &[rec(None, 3)]).is_err());
        let sectioned_record = rec(Some(Section::Ingredients), 4);
        assert!(records_to_batch(&CollectionSpec::document("B", 4), &[sectioned_record]).is_err());
        assert!(records_to_batch(&CollectionSpec::sectioned("C", 4), &[rec(None, 4)]).is_err());
    }

    #[test]
    fn oversized_collection_dim_is_invalid_config() {
        let spec = CollectionSpec::document("B", i32::MAX as usize + 1);
        assert!(matches!(records_to_batch(&spec, &[]), Err(Error::InvalidConfig(_))));
    }
}
