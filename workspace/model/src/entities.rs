//! This file serves as the root for all SeaORM entity modules.
//! The data model is small: recorded movements (`entry`) partitioned by
//! scope, plus the label catalog the entry form offers (`label`).

pub mod entry;
pub mod label;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::entry::Entity as Entry;
    pub use super::label::Entity as Label;
}
