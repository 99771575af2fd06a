use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

use reciperag_core::error::{Error, Result};
use reciperag_core::types::CollectionLayout;

pub const COL_RECIPE_ID: &str = "recipe_id";
pub const COL_TITLE: &str = "title";
pub const COL_SECTION: &str = "section";
pub const COL_CONTENT: &str = "content";
pub const COL_VECTOR: &str = "vector";

/// Arrow `FixedSizeList` length for a vector width.
pub fn list_size(dim: usize) -> Result<i32> {
    i32::try_from(dim).map_err(|_| {
        Error::InvalidConfig(format!("vector dimension {dim} exceeds the Arrow list limit"))
    })
}

/// Arrow schema for a collection. Sectioned collections carry a `section` column.
pub fn build_arrow_schema(layout: CollectionLayout, dim: usize) -> Result<Arc<Schema>> {
    let mut fields = vec![
        Field::new(COL_RECIPE_ID, DataType::Utf8, false),
        Field::new(COL_TITLE, DataType::Utf8, false),
    ];
    if layout == CollectionLayout::Sectioned {
        fields.push(Field::new(COL_SECTION, DataType::Utf8, false));
    }
    fields.push(Field::new(COL_CONTENT, DataType::Utf8, false));
    let item = Arc::new(Field::new("item", DataType::Float32, true));
    fields.push(Field::new(COL_VECTOR, DataType::FixedSizeList(item, list_size(dim)?), true));
    Ok(Arc::new(Schema::new(fields)))
}

/// Width of the stored `vector` column, if the schema has one.
pub fn vector_dim(schema: &Schema) -> Option<usize> {
    match schema.field_with_name(COL_VECTOR).ok()?.data_type() {
        DataType::FixedSizeList(_, n) => usize::try_from(*n).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_column_only_for_sectioned_layout() {
        let doc = build_arrow_schema(CollectionLayout::Document, 8).unwrap();
        let sec = build_arrow_schema(CollectionLayout::Sectioned, 8).unwrap();
        assert!(doc.field_with_name(COL_SECTION).is_err());
        assert!(sec.field_with_name(COL_SECTION).is_ok());
        assert_eq!(doc.fields().len() + 1, sec.fields().len());
        assert_eq!(vector_dim(&sec), Some(8));
        assert_eq!(vector_dim(&doc), Some(8));
    }

    #[test]
    fn oversized_dim_is_rejected() {
        let too_wide = i32::MAX as usize + 1;
        assert!(matches!(list_size(too_wide), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            build_arrow_schema(CollectionLayout::Document, too_wide),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(list_size(1536).unwrap(), 1536);
    }

    #[test]
    fn schema_without_vector_column_has_no_dim() {
        let schema = Schema::new(vec![Field::new(COL_TITLE, DataType::Utf8, false)]);
        assert_eq!(vector_dim(&schema), None);
    }
}
