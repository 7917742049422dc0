pub mod detail;
pub mod form;
pub mod listing;
pub mod model;
pub mod util;
