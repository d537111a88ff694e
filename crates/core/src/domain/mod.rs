pub mod forms;
pub mod order;
pub mod series;
pub mod stats;
pub mod user;

/// Records that carry a server-assigned (or provisional) numeric id.
pub trait Keyed {
    fn id(&self) -> i64;
}

/// Removes the first record with `id`, leaving every other record in place.
pub fn remove_by_id<T: Keyed>(records: &mut Vec<T>, id: i64) -> Option<T> {
    let idx = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(idx))
}
