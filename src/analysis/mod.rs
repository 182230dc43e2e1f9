/// Analysis layer: pure aggregations over a loaded [`Manifest`].
///
/// Every function here is a single linear pass over the passenger rows:
/// derive → group → aggregate. Nothing is cached; the crate-root entry
/// points reload the source on every call.
///
/// [`Manifest`]: crate::data::model::Manifest
pub mod age_division;
pub mod demographics;
pub mod family;
pub mod surname;
