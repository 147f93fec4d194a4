pub mod descriptor;
pub mod identity;
pub mod selection_model;
pub mod selection_set;
pub mod selection_state;
pub mod similarity;
