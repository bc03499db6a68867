//! Concrete [`ModelClient`](crate::workforce::model_client::ModelClient)
//! implementations.

pub mod openai;
