//! Table write descriptions handed to a dialect

mod column;
mod request;

pub use column::{ColumnDef, ColumnRef};
pub(crate) use request::{check_column_names, check_table_name};
pub use request::{UpsertRequest, UpsertStatement};
