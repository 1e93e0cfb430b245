pub mod ic;
pub mod place;
