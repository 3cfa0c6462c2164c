//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
    pub mod api_error;
    pub mod json_body;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
pub use web_api::{api_error, json_body};
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
    pub mod coerce;
}

pub use shared::models::*;
pub use shared::dto::*;
pub use shared::coerce;
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod task_id;
    pub mod task_store;
}

pub use data_access::task_store;
//---------------------------------------
