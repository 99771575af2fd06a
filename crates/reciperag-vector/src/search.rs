use arrow_array::{Array, Float32Array, RecordBatch, StringArray};

use reciperag_core::error::{Error, Result};
use reciperag_core::types::{Neighbor, Section};

use crate::schema::{COL_CONTENT, COL_RECIPE_ID, COL_SECTION, COL_TITLE};

fn string_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| Error::Operation(format!("search result is missing column '{name}'")))
}

/// Read neighbors out of one search result batch.
///
/// A missing `section` column means a document collection; a missing
/// `_distance` column is an error.
pub fn batch_to_neighbors(batch: &RecordBatch) -> Result<Vec<Neighbor>> {
    let ids = string_col(batch, COL_RECIPE_ID)?;
    let titles = string_col(batch, COL_TITLE)?;
    let contents = string_col(batch, COL_CONTENT)?;
    let sections = batch
        .column_by_name(COL_SECTION)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>());
    let distances = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
        .ok_or_else(|| Error::Operation("search result is missing '_distance'".to_string()))?;

    let mut out = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let section = match sections {
            Some(col) if !col.is_null(i) => Section::parse(col.value(i)),
            _ => None,
        };
        out.push(Neighbor {
            recipe_id: ids.value(i).to_string(),
            title: titles.value(i).to_string(),
            section,
            content: contents.value(i).to_string(),
            distance: distances.value(i),
        });
    }
    Ok(out)
}
