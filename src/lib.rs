pub mod case;
pub mod error;
pub mod plot;
pub mod richardson;
pub mod summary;
pub mod table;
pub mod verification;
