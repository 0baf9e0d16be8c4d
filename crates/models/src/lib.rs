//! SeaORM entities for the pet registry plus the field rules that belong to
//! the data itself (phone shape, species encoding, birth date parsing).

pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod owner;
pub mod pet;

#[cfg(test)]
mod tests;
