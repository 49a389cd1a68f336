pub mod layout;
pub mod predictor;
