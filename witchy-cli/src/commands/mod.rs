mod db;
mod lookup;

pub(crate) use db::run_db;
pub(crate) use lookup::{run_lookup, Query};
