#[macro_use]
extern crate serde;

#[macro_use]
extern crate log;

#[macro_use]
extern crate vohala_result;

macro_rules! auto_derived {
    ( $( $item:item )+ ) => {
        $(
            #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
            $item
        )+
    };
}

mod database;
mod models;

pub mod events;

pub use database::Database;
pub use models::*;

pub use vohala_result::{Error, ErrorType, Result};
