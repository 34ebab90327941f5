mod row_merger;

pub use row_merger::RowMerger;
